use image::{DynamicImage, RgbImage};
use log::{info, warn};

use crate::archive::{archive_file_name, ArchiveAssembler, AssemblyReport};
use crate::config::RunConfig;
use crate::errors::{SplitError, SplitResult};
use crate::plan::{build_plan, ExtractionPlan};
use crate::preview::{crop_band, preview_cells, render_overlay, PreviewCell};
use crate::raster::PageRasterizer;
use crate::utils::logger::Logger;

/// Outcome of splitting a document
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Month the run extracted
    pub target_month: u32,
    /// Entries that were written
    pub plan: ExtractionPlan,
    /// Archive and counts
    pub report: AssemblyReport,
    /// Suggested archive file name, e.g. `menu_01.zip`
    pub archive_name: String,
}

impl SplitOutcome {
    /// Whether no day of the target month was found
    ///
    /// The archive is still a valid, empty ZIP in that case.
    pub fn is_empty(&self) -> bool {
        self.report.emitted_count == 0
    }

    /// Number of images written
    pub fn emitted_count(&self) -> usize {
        self.report.emitted_count
    }
}

/// Preview of one page
pub struct PagePreview {
    /// Zero-based page index
    pub page_index: usize,
    /// Day columns with their dates
    pub cells: Vec<PreviewCell>,
    /// Page with band and column edges drawn on it
    pub overlay: RgbImage,
    /// The band cut out of the page
    pub band_crop: DynamicImage,
}

/// Main interface to the calendar splitter
pub struct CalendarSplitter<'a> {
    logger: &'a Logger,
    show_progress: bool,
}

impl<'a> CalendarSplitter<'a> {
    /// Create a new splitter
    ///
    /// # Arguments
    /// * `logger` - Journal that receives the extraction plan of every run
    pub fn new(logger: &'a Logger) -> Self {
        CalendarSplitter { logger, show_progress: false }
    }

    /// Draw a progress bar while pages are split
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Compute what a run would emit without rendering anything
    pub fn plan(&self, rasterizer: &dyn PageRasterizer, config: &RunConfig) -> SplitResult<ExtractionPlan> {
        config.validate()?;
        build_plan(rasterizer.page_count(), config.anchor, &config.band, config.target_month)
    }

    /// Split a document into per-day images of the configured month
    ///
    /// # Arguments
    /// * `rasterizer` - The document's pages
    /// * `config` - Month, anchor, band and DPI of the run
    ///
    /// # Returns
    /// The finished archive with its plan, or the first error encountered
    pub fn split(&self, rasterizer: &mut dyn PageRasterizer, config: &RunConfig) -> SplitResult<SplitOutcome> {
        info!(
            "Splitting document {} ({} pages) for month {} from {} at {} DPI",
            rasterizer.document_id(),
            rasterizer.page_count(),
            config.target_month,
            config.anchor,
            config.dpi
        );

        let plan = self.plan(rasterizer, config)?;
        self.logger.print_plan(&plan)?;

        let report = ArchiveAssembler::new()
            .with_progress(self.show_progress)
            .assemble_zip(&plan, rasterizer, config.dpi)?;

        if report.emitted_count == 0 {
            warn!("No page shows a day of month {}", config.target_month);
        }
        self.logger.log(&format!(
            "Wrote {} images for month {}",
            report.emitted_count, config.target_month
        ))?;

        Ok(SplitOutcome {
            target_month: config.target_month,
            plan,
            report,
            archive_name: archive_file_name(config.target_month),
        })
    }

    /// Render one page with the band and column dates drawn on it
    ///
    /// # Arguments
    /// * `rasterizer` - The document's pages
    /// * `config` - Month, anchor, band and DPI of the run
    /// * `page_index` - Zero-based page to preview
    pub fn preview(
        &self,
        rasterizer: &mut dyn PageRasterizer,
        config: &RunConfig,
        page_index: usize,
    ) -> SplitResult<PagePreview> {
        config.validate()?;
        let page_count = rasterizer.page_count();
        if page_index >= page_count {
            return Err(SplitError::PageIndexOutOfRange { page_index, page_count });
        }

        let page = rasterizer.render(page_index, config.dpi)?;
        let cells = preview_cells(config.anchor, page_index, config.target_month)?;
        for cell in &cells {
            self.logger.log(&format!(
                "Page {} column {}: {}{}",
                page_index + 1,
                cell.column_index,
                cell.label,
                if cell.selected { " (selected)" } else { "" }
            ))?;
        }

        Ok(PagePreview {
            page_index,
            overlay: render_overlay(&page, &config.band, &cells)?,
            band_crop: crop_band(&page, &config.band)?,
            cells,
        })
    }
}

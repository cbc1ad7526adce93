//! Realising an extraction plan into an archive

use log::{debug, info};

use crate::errors::SplitResult;
use crate::extractor::{crop_region, encode_png};
use crate::plan::ExtractionPlan;
use crate::raster::{check_page_index, PageRasterizer};
use crate::utils::progress::ProgressTracker;

use super::writer::{ArchiveWriter, ZipArchiveWriter};

/// Result of a completed assembly
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    /// Finished archive bytes
    pub archive: Vec<u8>,
    /// Number of images written, counting replaced names each time
    pub emitted_count: usize,
    /// Number of pages rendered
    pub pages_rendered: usize,
}

/// Renders the pages a plan needs and writes the cropped day images
///
/// Pages are handled in ascending order and each page is rendered once.
/// A page's raster is released before the next page is rendered.
#[derive(Debug, Default)]
pub struct ArchiveAssembler {
    show_progress: bool,
}

impl ArchiveAssembler {
    /// Create an assembler without a progress bar
    pub fn new() -> Self {
        ArchiveAssembler { show_progress: false }
    }

    /// Draw a per-page progress bar while assembling
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Assemble a plan into a ZIP archive
    pub fn assemble_zip(
        &self,
        plan: &ExtractionPlan,
        rasterizer: &mut dyn PageRasterizer,
        dpi: u32,
    ) -> SplitResult<AssemblyReport> {
        self.assemble(plan, rasterizer, dpi, ZipArchiveWriter::new())
    }

    /// Assemble a plan into the given archive writer
    ///
    /// # Arguments
    /// * `plan` - Entries to emit, grouped by page
    /// * `rasterizer` - Source of rendered pages
    /// * `dpi` - Resolution the plan's rectangles were measured at
    /// * `writer` - Archive to fill
    ///
    /// # Returns
    /// The finished archive and the number of images written. An empty plan
    /// yields an empty, well-formed archive. Any error aborts the whole run.
    pub fn assemble<W: ArchiveWriter>(
        &self,
        plan: &ExtractionPlan,
        rasterizer: &mut dyn PageRasterizer,
        dpi: u32,
        mut writer: W,
    ) -> SplitResult<AssemblyReport> {
        let pages = plan.pages();
        let progress = if self.show_progress {
            ProgressTracker::new(pages.len() as u64, "Splitting pages")
        } else {
            ProgressTracker::hidden(pages.len() as u64)
        };

        let page_count = rasterizer.page_count();
        let mut emitted_count = 0;
        let mut pages_rendered = 0;

        for (page_index, entries) in plan.page_groups() {
            check_page_index(page_index, page_count)?;

            progress.set_message(&format!("page {}/{}", page_index + 1, page_count));
            let page = rasterizer.render(page_index, dpi)?;
            pages_rendered += 1;

            for entry in entries {
                let cell = crop_region(&page, &entry.rect)?;
                let bytes = encode_png(&cell)?;
                let name = entry.archive_name();
                debug!(
                    "Page {} column {} ({}) -> {} ({}x{})",
                    page_index + 1,
                    entry.column_index,
                    entry.date,
                    name,
                    cell.width(),
                    cell.height()
                );
                writer.insert(&name, bytes)?;
                emitted_count += 1;
            }

            progress.increment(1);
        }

        progress.finish(&format!("{} images", emitted_count));
        info!(
            "Wrote {} images from {} pages into {} archive entries",
            emitted_count,
            pages_rendered,
            writer.len()
        );

        Ok(AssemblyReport {
            archive: writer.finish()?,
            emitted_count,
            pages_rendered,
        })
    }
}

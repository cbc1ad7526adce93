//! Page preview command
//!
//! Renders one page with the band and the day columns drawn on it, so the
//! band and anchor can be checked before a full split.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;

use crate::api::CalendarSplitter;
use crate::commands::command_traits::Command;
use crate::config::RunConfig;
use crate::errors::{SplitError, SplitResult};
use crate::raster::PdfiumRasterizer;
use crate::utils::logger::Logger;

/// Command for previewing the band on one page
pub struct PreviewCommand<'a> {
    /// Path to the input PDF
    input_file: String,
    /// Zero-based page to preview
    page_index: usize,
    /// Path of the overlay image
    output_file: String,
    /// Directory holding the Pdfium library
    pdfium_lib: Option<String>,
    /// Month, anchor, band and DPI
    config: RunConfig,
    /// Journal for recording operations
    logger: &'a Logger,
}

impl<'a> PreviewCommand<'a> {
    /// Create a new preview command
    ///
    /// The page is given 1-based on the command line, as page numbers are
    /// shown to people.
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SplitResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| SplitError::GenericError("Missing input file".to_string()))?
            .clone();

        let page_number = *args.get_one::<u32>("preview")
            .ok_or_else(|| SplitError::GenericError("Missing preview page".to_string()))?;
        if page_number == 0 {
            return Err(SplitError::InvalidConfig("Preview pages are numbered from 1".to_string()));
        }

        let output_file = args.get_one::<String>("output")
            .cloned()
            .unwrap_or_else(|| format!("preview_p{}.png", page_number));

        Ok(PreviewCommand {
            input_file,
            page_index: page_number as usize - 1,
            output_file,
            pdfium_lib: args.get_one::<String>("pdfium-lib").cloned(),
            config: super::config_from_args(args)?,
            logger,
        })
    }

    /// Path of the band crop, next to the overlay image
    fn band_output_path(&self) -> PathBuf {
        let path = Path::new(&self.output_file);
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        parent.join(format!("{}_band.png", stem))
    }
}

impl<'a> Command for PreviewCommand<'a> {
    fn execute(&self) -> SplitResult<()> {
        let mut rasterizer = PdfiumRasterizer::from_file(
            Path::new(&self.input_file),
            self.pdfium_lib.as_deref().map(Path::new),
        )?;

        let preview = CalendarSplitter::new(self.logger)
            .preview(&mut rasterizer, &self.config, self.page_index)?;

        preview.overlay.save(&self.output_file)?;
        let band_path = self.band_output_path();
        preview.band_crop.save(&band_path)?;
        info!("Preview written to {} and {}", self.output_file, band_path.display());

        println!("Page {}:", self.page_index + 1);
        for cell in &preview.cells {
            let marker = if cell.selected { "*" } else { " " };
            println!("  {} {:>5}", marker, cell.label);
        }
        println!("Preview: {}", self.output_file);
        println!("Band:    {}", band_path.display());
        Ok(())
    }
}

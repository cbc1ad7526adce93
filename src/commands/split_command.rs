//! Document split command
//!
//! This module implements the command that splits every page of a calendar
//! PDF into day images and writes the selected month's images to a ZIP file.

use std::fs;
use std::path::Path;

use clap::ArgMatches;
use log::{info, warn};

use crate::api::CalendarSplitter;
use crate::commands::command_traits::Command;
use crate::config::RunConfig;
use crate::errors::{SplitError, SplitResult};
use crate::raster::PdfiumRasterizer;
use crate::utils::logger::Logger;

/// Command for splitting a calendar PDF into per-day images
pub struct SplitCommand<'a> {
    /// Path to the input PDF
    input_file: String,
    /// Path of the archive to write; the suggested name when absent
    output_file: Option<String>,
    /// Directory holding the Pdfium library
    pdfium_lib: Option<String>,
    /// Month, anchor, band and DPI
    config: RunConfig,
    /// Whether to draw a progress bar
    show_progress: bool,
    /// Journal for recording operations
    logger: &'a Logger,
}

impl<'a> SplitCommand<'a> {
    /// Create a new split command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Journal for recording operations
    ///
    /// # Returns
    /// A new SplitCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SplitResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| SplitError::GenericError("Missing input file".to_string()))?
            .clone();
        info!("Input file: {}", input_file);

        let output_file = args.get_one::<String>("output").cloned();
        let pdfium_lib = args.get_one::<String>("pdfium-lib").cloned();
        let config = super::config_from_args(args)?;

        Ok(SplitCommand {
            input_file,
            output_file,
            pdfium_lib,
            config,
            show_progress: !args.get_flag("no-progress"),
            logger,
        })
    }
}

impl<'a> Command for SplitCommand<'a> {
    fn execute(&self) -> SplitResult<()> {
        let mut rasterizer = PdfiumRasterizer::from_file(
            Path::new(&self.input_file),
            self.pdfium_lib.as_deref().map(Path::new),
        )?;

        let outcome = CalendarSplitter::new(self.logger)
            .with_progress(self.show_progress)
            .split(&mut rasterizer, &self.config)?;

        if outcome.is_empty() {
            warn!("No images written; check the anchor date and month");
            println!(
                "No images found for month {}. Check the anchor date and month settings.",
                outcome.target_month
            );
            return Ok(());
        }

        let output_file = self.output_file.clone().unwrap_or_else(|| outcome.archive_name.clone());
        fs::write(&output_file, &outcome.report.archive)?;
        info!("Archive written to {}", output_file);

        println!(
            "Created {} images for month {}: {}",
            outcome.emitted_count(),
            outcome.target_month,
            output_file
        );
        Ok(())
    }
}

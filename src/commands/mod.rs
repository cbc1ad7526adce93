//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod split_command;
pub mod preview_command;

pub use command_traits::{Command, CommandFactory};
pub use split_command::SplitCommand;
pub use preview_command::PreviewCommand;

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::config::{ConfigOverrides, RunConfig};
use crate::errors::SplitResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct CalsplitCommandFactory;

impl CalsplitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        CalsplitCommandFactory
    }
}

impl Default for CalsplitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for CalsplitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SplitResult<Box<dyn Command + 'a>> {
        if args.get_one::<u32>("preview").is_some() {
            Ok(Box::new(PreviewCommand::new(args, logger)?))
        } else {
            // Default to splitting the whole document
            Ok(Box::new(SplitCommand::new(args, logger)?))
        }
    }
}

/// Build the run configuration from defaults, `--config` and flags
pub(crate) fn config_from_args(args: &ArgMatches) -> SplitResult<RunConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => {
            info!("Loading configuration from {}", path);
            RunConfig::from_file(Path::new(path))?
        }
        None => RunConfig::default(),
    };

    config.apply_overrides(&ConfigOverrides {
        target_month: args.get_one::<u32>("month").copied(),
        anchor: args.get_one::<String>("anchor").cloned(),
        band: args.get_one::<String>("band").cloned(),
        dpi: args.get_one::<u32>("dpi").copied(),
    })?;
    config.validate()?;

    info!(
        "Month {}, anchor {}, band {}, {} DPI",
        config.target_month, config.anchor, config.band, config.dpi
    );
    Ok(config)
}

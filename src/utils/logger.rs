//! Logger utility for application-wide logging
//!
//! This module provides a logger that works alongside the standard log
//! crate and adds file output. The same type doubles as the run journal that
//! records which page and column every emitted image came from.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Metadata, LevelFilter};

use crate::plan::ExtractionPlan;

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output; `None` discards messages
    file: Mutex<Option<File>>,
    /// Most verbose level accepted when installed as the global logger
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger writing to a file
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: LevelFilter::Info,
        })
    }

    /// Creates a logger that discards everything
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
            level: LevelFilter::Off,
        }
    }

    /// Sets the most verbose level this logger accepts
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs the entries of an extraction plan as a table
    ///
    /// # Arguments
    ///
    /// * `plan` - The plan about to be written
    pub fn print_plan(&self, plan: &ExtractionPlan) -> io::Result<()> {
        self.log(&format!("Extraction plan ({} entries):", plan.len()))?;

        for entry in plan.entries() {
            let message = format!(
                "  Page: {}, Column: {}, Date: {}, Rect: {}, Entry: {}",
                entry.page_index + 1,
                entry.column_index,
                entry.date,
                entry.rect,
                entry.archive_name()
            );
            self.log(&message)?;
        }

        Ok(())
    }

    /// Static method to initialize the global logger
    pub fn init_global_logger(log_file: &str, level: LevelFilter) -> io::Result<()> {
        let global_logger = Logger::new(log_file)?.with_level(level);

        // Only called once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            // Also print to the console, away from any piped output
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_log_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.log");
        let logger = Logger::new(path.to_str().unwrap()).unwrap();

        logger.log("first").unwrap();
        logger.log("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_disabled_logger_discards() {
        let logger = Logger::disabled();
        assert!(logger.log("nothing").is_ok());
        assert!(!logger.enabled(&Metadata::builder().level(log::Level::Error).build()));
    }

    #[test]
    fn test_level_filter() {
        let logger = Logger::disabled().with_level(LevelFilter::Info);
        assert!(logger.enabled(&Metadata::builder().level(log::Level::Warn).build()));
        assert!(!logger.enabled(&Metadata::builder().level(log::Level::Debug).build()));
    }
}

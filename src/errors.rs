//! Error types for calendar splitting
//!
//! Every failure aborts the whole run. An empty result (no day of the target
//! month on any page) is not an error and is reported through the run outcome
//! instead.

use std::fmt;
use std::io;

use chrono::NaiveDate;

/// Errors raised while planning or assembling a split run
#[derive(Debug)]
pub enum SplitError {
    /// I/O error
    IoError(io::Error),
    /// Band rectangle (or a column index into it) is unusable
    InvalidGeometry(String),
    /// A plan entry refers to a page the document does not have
    PageIndexOutOfRange { page_index: usize, page_count: usize },
    /// The page rasterizer failed (corrupt document, missing library, ...)
    RenderFailure(String),
    /// A cropped cell could not be encoded
    EncodeFailure(String),
    /// The archive could not be written
    ArchiveFailure(String),
    /// Run configuration is out of range or unparsable
    InvalidConfig(String),
    /// Date arithmetic left the representable calendar range
    DateOutOfRange { anchor: NaiveDate, offset_days: u64 },
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::IoError(e) => write!(f, "I/O error: {}", e),
            SplitError::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            SplitError::PageIndexOutOfRange { page_index, page_count } => write!(
                f,
                "Page index {} out of range (document has {} pages)",
                page_index, page_count
            ),
            SplitError::RenderFailure(msg) => write!(f, "Failed to render page: {}", msg),
            SplitError::EncodeFailure(msg) => write!(f, "Failed to encode image: {}", msg),
            SplitError::ArchiveFailure(msg) => write!(f, "Failed to write archive: {}", msg),
            SplitError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            SplitError::DateOutOfRange { anchor, offset_days } => write!(
                f,
                "Date {} + {} days is outside the supported calendar range",
                anchor, offset_days
            ),
            SplitError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SplitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SplitError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SplitError {
    fn from(error: io::Error) -> Self {
        SplitError::IoError(error)
    }
}

impl From<image::ImageError> for SplitError {
    fn from(error: image::ImageError) -> Self {
        SplitError::EncodeFailure(error.to_string())
    }
}

impl From<zip::result::ZipError> for SplitError {
    fn from(error: zip::result::ZipError) -> Self {
        SplitError::ArchiveFailure(error.to_string())
    }
}

impl From<String> for SplitError {
    fn from(msg: String) -> Self {
        SplitError::GenericError(msg)
    }
}

/// Result type for split operations
pub type SplitResult<T> = Result<T, SplitError>;

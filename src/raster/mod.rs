//! Page rasterization
//!
//! The splitter never reads a document format itself. It asks a
//! `PageRasterizer` for a page rendered at a DPI and works on the pixels.

mod pdfium;
mod cache;
mod memory;

use std::fmt;

use image::DynamicImage;
use sha2::{Digest, Sha256};

use crate::errors::SplitResult;

pub use self::pdfium::PdfiumRasterizer;
pub use self::cache::CachingRasterizer;
pub use self::memory::MemoryRasterizer;

/// Content fingerprint of a document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Fingerprint raw document bytes (SHA-256, hex encoded)
    pub fn from_bytes(bytes: &[u8]) -> Self {
        DocumentId(hex::encode(Sha256::digest(bytes)))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell documents apart in logs
        write!(f, "{}", &self.0[..12.min(self.0.len())])
    }
}

/// Source of rendered document pages
pub trait PageRasterizer {
    /// Fingerprint of the document being rendered
    fn document_id(&self) -> &DocumentId;

    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Render one page at the given resolution
    ///
    /// # Arguments
    /// * `page_index` - Zero-based page index
    /// * `dpi` - Resolution in dots per inch
    ///
    /// # Returns
    /// The rendered page, `PageIndexOutOfRange` for a page the document does
    /// not have, or `RenderFailure` when rendering fails
    fn render(&mut self, page_index: usize, dpi: u32) -> SplitResult<DynamicImage>;
}

/// Check a page index against the document's page count
pub fn check_page_index(page_index: usize, page_count: usize) -> SplitResult<()> {
    if page_index >= page_count {
        return Err(crate::errors::SplitError::PageIndexOutOfRange { page_index, page_count });
    }
    Ok(())
}

//! Rasterizer over pages that are already images

use image::DynamicImage;
use log::debug;
use sha2::{Digest, Sha256};

use crate::errors::SplitResult;

use super::{check_page_index, DocumentId, PageRasterizer};

/// Serves pre-rendered page images, for example pages scanned straight to
/// image files
///
/// The images are returned at their native size whatever DPI is requested,
/// so the band must be measured on these images.
pub struct MemoryRasterizer {
    pages: Vec<DynamicImage>,
    document_id: DocumentId,
    render_count: usize,
}

impl MemoryRasterizer {
    /// Create a rasterizer from page images, first page first
    pub fn new(pages: Vec<DynamicImage>) -> Self {
        let mut hasher = Sha256::new();
        for page in &pages {
            hasher.update(page.width().to_le_bytes());
            hasher.update(page.height().to_le_bytes());
            hasher.update(page.as_bytes());
        }
        let document_id = DocumentId::from_bytes(&hasher.finalize());

        MemoryRasterizer {
            pages,
            document_id,
            render_count: 0,
        }
    }

    /// Number of successful `render` calls so far
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl PageRasterizer for MemoryRasterizer {
    fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn render(&mut self, page_index: usize, dpi: u32) -> SplitResult<DynamicImage> {
        check_page_index(page_index, self.pages.len())?;
        debug!("Serving in-memory page {} (requested {} DPI)", page_index + 1, dpi);
        self.render_count += 1;
        Ok(self.pages[page_index].clone())
    }
}

//! PDF rendering through the Pdfium library

use std::fs;
use std::path::Path;

use image::DynamicImage;
use log::{debug, info};
use pdfium_render::prelude::{PdfRenderConfig, Pdfium, PdfiumError};

use crate::errors::{SplitError, SplitResult};

use super::{check_page_index, DocumentId, PageRasterizer};

/// PDF points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Renders pages of an in-memory PDF document
///
/// The document bytes are kept for the rasterizer's lifetime and the document
/// is reopened for every render, so no Pdfium handle outlives a call.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
    bytes: Vec<u8>,
    document_id: DocumentId,
    page_count: usize,
}

impl PdfiumRasterizer {
    /// Create a rasterizer for PDF bytes
    ///
    /// # Arguments
    /// * `bytes` - The whole PDF document
    /// * `library_path` - Directory containing the Pdfium shared library;
    ///   the system library search path is used when `None`
    pub fn from_bytes(bytes: Vec<u8>, library_path: Option<&Path>) -> SplitResult<Self> {
        let bindings = match library_path {
            Some(dir) => {
                info!("Binding Pdfium from {}", dir.display());
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(render_failure)?;
        let pdfium = Pdfium::new(bindings);

        let page_count = {
            let document = pdfium.load_pdf_from_byte_slice(&bytes, None).map_err(render_failure)?;
            document.pages().len() as usize
        };
        let document_id = DocumentId::from_bytes(&bytes);
        info!("Loaded PDF {} with {} pages", document_id, page_count);

        Ok(PdfiumRasterizer {
            pdfium,
            bytes,
            document_id,
            page_count,
        })
    }

    /// Create a rasterizer for a PDF file
    pub fn from_file(path: &Path, library_path: Option<&Path>) -> SplitResult<Self> {
        info!("Reading PDF {}", path.display());
        let bytes = fs::read(path)?;
        Self::from_bytes(bytes, library_path)
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn render(&mut self, page_index: usize, dpi: u32) -> SplitResult<DynamicImage> {
        check_page_index(page_index, self.page_count)?;
        let index = u16::try_from(page_index).map_err(|_| SplitError::PageIndexOutOfRange {
            page_index,
            page_count: self.page_count,
        })?;

        debug!("Rendering page {} at {} DPI", page_index + 1, dpi);
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(render_failure)?;
        let page = document.pages().get(index).map_err(render_failure)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / POINTS_PER_INCH);
        let bitmap = page.render_with_config(&config).map_err(render_failure)?;
        let image = DynamicImage::ImageRgb8(bitmap.as_image().into_rgb8());
        debug!("Rendered page {} as {}x{}", page_index + 1, image.width(), image.height());

        Ok(image)
    }
}

fn render_failure(error: PdfiumError) -> SplitError {
    SplitError::RenderFailure(error.to_string())
}

//! Memoising page rasterizer

use std::num::NonZeroUsize;

use image::DynamicImage;
use log::debug;
use lru::LruCache;

use crate::errors::SplitResult;

use super::{DocumentId, PageRasterizer};

const DEFAULT_CAPACITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    document: DocumentId,
    page_index: usize,
    dpi: u32,
}

/// Keeps recently rendered pages keyed by document, page and DPI
///
/// A cache hit returns a copy of the earlier render; results are otherwise
/// the same as rendering through the wrapped rasterizer. Whoever creates the
/// cache owns its lifetime.
pub struct CachingRasterizer<R> {
    delegate: R,
    cache: LruCache<CacheKey, DynamicImage>,
    hits: u64,
    misses: u64,
}

impl<R: PageRasterizer> CachingRasterizer<R> {
    /// Wrap a rasterizer with the default capacity
    pub fn new(delegate: R) -> Self {
        Self::with_capacity(delegate, DEFAULT_CAPACITY)
    }

    /// Wrap a rasterizer keeping at most `capacity` pages (at least one)
    pub fn with_capacity(delegate: R, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        CachingRasterizer {
            delegate,
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Number of renders served from the cache
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of renders passed to the wrapped rasterizer
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// The wrapped rasterizer
    pub fn into_inner(self) -> R {
        self.delegate
    }
}

impl<R: PageRasterizer> PageRasterizer for CachingRasterizer<R> {
    fn document_id(&self) -> &DocumentId {
        self.delegate.document_id()
    }

    fn page_count(&self) -> usize {
        self.delegate.page_count()
    }

    fn render(&mut self, page_index: usize, dpi: u32) -> SplitResult<DynamicImage> {
        let key = CacheKey {
            document: self.delegate.document_id().clone(),
            page_index,
            dpi,
        };

        if let Some(image) = self.cache.get(&key) {
            // Cache hit.
            self.hits += 1;
            debug!("Page {} at {} DPI served from cache", page_index + 1, dpi);
            return Ok(image.clone());
        }

        // Cache miss.
        self.misses += 1;
        let image = self.delegate.render(page_index, dpi)?;
        self.cache.put(key, image.clone());
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SplitError;
    use crate::raster::MemoryRasterizer;
    use image::{GenericImageView, Rgb, RgbImage};

    fn pages(count: usize) -> MemoryRasterizer {
        let images = (0..count)
            .map(|i| DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([i as u8, 0, 0]))))
            .collect();
        MemoryRasterizer::new(images)
    }

    #[test]
    fn test_repeated_render_hits_cache() {
        let mut rasterizer = CachingRasterizer::new(pages(3));
        let first = rasterizer.render(1, 150).unwrap();
        let second = rasterizer.render(1, 150).unwrap();

        assert_eq!(first.to_rgb8(), second.to_rgb8());
        assert_eq!(rasterizer.hits(), 1);
        assert_eq!(rasterizer.misses(), 1);
        assert_eq!(rasterizer.into_inner().render_count(), 1);
    }

    #[test]
    fn test_dpi_is_part_of_key() {
        let mut rasterizer = CachingRasterizer::new(pages(2));
        rasterizer.render(0, 150).unwrap();
        rasterizer.render(0, 300).unwrap();
        assert_eq!(rasterizer.misses(), 2);
        assert_eq!(rasterizer.hits(), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut rasterizer = CachingRasterizer::with_capacity(pages(3), 2);
        rasterizer.render(0, 150).unwrap();
        rasterizer.render(1, 150).unwrap();
        rasterizer.render(2, 150).unwrap();
        rasterizer.render(0, 150).unwrap();
        assert_eq!(rasterizer.misses(), 4);

        rasterizer.render(0, 150).unwrap();
        assert_eq!(rasterizer.hits(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut rasterizer = CachingRasterizer::new(pages(1));
        assert!(matches!(rasterizer.render(3, 150), Err(SplitError::PageIndexOutOfRange { .. })));
        assert_eq!(rasterizer.page_count(), 1);
        assert_eq!(rasterizer.render(0, 150).unwrap().dimensions(), (8, 4));
    }
}

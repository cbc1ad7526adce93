//! Cropping of day cells and PNG encoding

use std::io::Cursor;

use image::{imageops, DynamicImage, ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::errors::SplitResult;
use crate::geometry::Rect;

use super::region::Region;

/// Fill colour for parts of a rectangle that fall outside the page
const PADDING: Rgb<u8> = Rgb([0, 0, 0]);

/// Cut a rectangle out of a rendered page
///
/// The rectangle's edges are rounded to the nearest pixel. The result always
/// has the rounded rectangle's size: any part outside the page is filled with
/// black rather than dropped, so a cell is never skipped for geometric
/// reasons.
///
/// # Returns
/// The cell, or `InvalidGeometry` when the rounded rectangle is empty or too
/// large to allocate
pub fn crop_region(image: &DynamicImage, rect: &Rect) -> SplitResult<DynamicImage> {
    let (width, height) = rect.pixel_size()?;
    let bounds = rect.to_pixel_bounds();
    let (left, top, _, _) = bounds;

    if let Some(visible) = Region::clip(bounds, image.width(), image.height()) {
        if visible.width == width && visible.height == height {
            return Ok(DynamicImage::ImageRgb8(
                image.crop_imm(visible.x, visible.y, visible.width, visible.height).to_rgb8(),
            ));
        }

        debug!("Rectangle {} extends past the {}x{} page; padding", rect, image.width(), image.height());
        let mut canvas = RgbImage::from_pixel(width, height, PADDING);
        let part = image.crop_imm(visible.x, visible.y, visible.width, visible.height).to_rgb8();
        imageops::replace(&mut canvas, &part, visible.x as i64 - left, visible.y as i64 - top);
        return Ok(DynamicImage::ImageRgb8(canvas));
    }

    debug!("Rectangle {} lies outside the {}x{} page", rect, image.width(), image.height());
    Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, PADDING)))
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &DynamicImage) -> SplitResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

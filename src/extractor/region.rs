//! Region structure for cutting pixels out of a page
//!
//! A `Region` is the integer, in-bounds part of a requested rectangle.
//! Coordinates follow the usual image convention where (0,0) is the top-left
//! corner of the page.

/// Region of a raster image (in pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Clip pixel bounds `(left, top, right, bottom)` to an image of the given size
    ///
    /// # Returns
    /// The part of the bounds that lies inside the image, or `None` when the
    /// bounds miss the image entirely
    pub fn clip(bounds: (i64, i64, i64, i64), image_width: u32, image_height: u32) -> Option<Self> {
        let (left, top, right, bottom) = bounds;
        let x_start = left.clamp(0, image_width as i64);
        let y_start = top.clamp(0, image_height as i64);
        let x_end = right.clamp(0, image_width as i64);
        let y_end = bottom.clamp(0, image_height as i64);

        if x_end <= x_start || y_end <= y_start {
            return None;
        }

        Some(Region::new(
            x_start as u32,
            y_start as u32,
            (x_end - x_start) as u32,
            (y_end - y_start) as u32,
        ))
    }
}

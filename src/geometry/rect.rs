//! Rectangle in page pixel space

use std::fmt;

use crate::errors::{SplitError, SplitResult};

/// Bytes per pixel of a cut-out cell
const RGB_CHANNELS: usize = 3;

/// Axis-aligned rectangle in image pixel coordinates
///
/// `(x0, y0)` is the top-left corner and `(x1, y1)` the bottom-right corner.
/// Coordinates may be fractional; they are rounded only when pixels are
/// actually cut out of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    /// Parse a rectangle from a string (format: "x0,y0,x1,y1")
    pub fn from_string(rect_str: &str) -> SplitResult<Self> {
        let parts: Vec<&str> = rect_str.split(',').collect();
        if parts.len() != 4 {
            return Err(SplitError::InvalidConfig(
                "Band must have 4 comma-separated values (x0,y0,x1,y1)".to_string(),
            ));
        }

        let parse = |value: &str, name: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| SplitError::InvalidConfig(format!("Invalid {} value: {}", name, value.trim())))
        };

        Ok(Rect::new(
            parse(parts[0], "x0")?,
            parse(parts[1], "y0")?,
            parse(parts[2], "x1")?,
            parse(parts[3], "y1")?,
        ))
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Check that the rectangle has finite coordinates and a positive area
    pub fn validate(&self) -> SplitResult<()> {
        let coords = [self.x0, self.y0, self.x1, self.y1];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(SplitError::InvalidGeometry(format!("non-finite coordinate in {}", self)));
        }
        if self.width() <= 0.0 {
            return Err(SplitError::InvalidGeometry(format!(
                "band {} has non-positive width (x1 must be greater than x0)",
                self
            )));
        }
        if self.height() <= 0.0 {
            return Err(SplitError::InvalidGeometry(format!(
                "band {} has non-positive height (y1 must be greater than y0)",
                self
            )));
        }
        Ok(())
    }

    /// Edges rounded to whole pixels as `(left, top, right, bottom)`
    pub fn to_pixel_bounds(&self) -> (i64, i64, i64, i64) {
        (
            self.x0.round() as i64,
            self.y0.round() as i64,
            self.x1.round() as i64,
            self.y1.round() as i64,
        )
    }

    /// Size in whole pixels of the rounded rectangle as `(width, height)`
    ///
    /// Fails with `InvalidGeometry` when the rounded rectangle is empty or
    /// too large to hold as an RGB image in memory.
    pub fn pixel_size(&self) -> SplitResult<(u32, u32)> {
        let (left, top, right, bottom) = self.to_pixel_bounds();
        let width = right.saturating_sub(left);
        let height = bottom.saturating_sub(top);
        if width <= 0 || height <= 0 {
            return Err(SplitError::InvalidGeometry(format!(
                "{} rounds to an empty {}x{} pixel area",
                self,
                width.max(0),
                height.max(0)
            )));
        }

        let too_large = || SplitError::InvalidGeometry(format!("{} is too large to cut out of a page", self));
        let width = u32::try_from(width).map_err(|_| too_large())?;
        let height = u32::try_from(height).map_err(|_| too_large())?;
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(RGB_CHANNELS))
            .ok_or_else(too_large)?;

        Ok((width, height))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}

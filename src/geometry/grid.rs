//! Partitioning of a week band into day columns

use crate::errors::{SplitError, SplitResult};

use super::rect::Rect;

/// Number of equal-width columns in a week band
pub const COLUMN_COUNT: usize = 7;

/// Sub-rectangle of the band covering one day column
///
/// The band is split into seven columns of width `(x1 - x0) / 7`. Column `i`
/// starts at `x0 + i * step`; its right edge is `left + step`, except for the
/// last column whose right edge is `band.x1` itself so that rounding never
/// leaves a sliver of the band unassigned. The vertical extent is the band's.
pub fn column_rect(band: &Rect, column_index: usize) -> SplitResult<Rect> {
    band.validate()?;
    if column_index >= COLUMN_COUNT {
        return Err(SplitError::InvalidGeometry(format!(
            "column index {} outside 0..{}",
            column_index, COLUMN_COUNT
        )));
    }

    let step = band.width() / COLUMN_COUNT as f64;
    let left = band.x0 + column_index as f64 * step;
    let right = if column_index < COLUMN_COUNT - 1 { left + step } else { band.x1 };

    Ok(Rect::new(left, band.y0, right, band.y1))
}

/// All seven column rectangles, Monday first
pub fn column_rects(band: &Rect) -> SplitResult<Vec<Rect>> {
    (0..COLUMN_COUNT).map(|i| column_rect(band, i)).collect()
}

//! Page preview for checking band placement and dates
//!
//! The preview draws the week band and the left edge of every day column
//! onto a rendered page. Columns whose date is in the target month are drawn
//! blue, the others gray, so a misplaced anchor or band is visible before
//! a whole document is split.

use chrono::{Datelike, NaiveDate};
use image::{DynamicImage, Rgb, RgbImage};

use crate::calendar::{cells_for_page, is_selected};
use crate::errors::SplitResult;
use crate::extractor::crop_region;
use crate::geometry::{column_rect, Rect};

pub const BAND_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const SELECTED_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const UNSELECTED_COLOR: Rgb<u8> = Rgb([128, 128, 128]);

const BAND_LINE_WIDTH: i64 = 5;
const COLUMN_LINE_WIDTH: i64 = 2;

/// A day column as shown in the preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCell {
    pub column_index: usize,
    pub date: NaiveDate,
    /// "month/day", e.g. "1/31"
    pub label: String,
    /// Whether the date is in the target month
    pub selected: bool,
}

/// The seven columns of a page with their dates and selection state
pub fn preview_cells(anchor: NaiveDate, page_index: usize, target_month: u32) -> SplitResult<Vec<PreviewCell>> {
    Ok(cells_for_page(anchor, page_index)?
        .into_iter()
        .map(|cell| PreviewCell {
            column_index: cell.column_index,
            date: cell.date,
            label: format!("{}/{}", cell.date.month(), cell.date.day()),
            selected: is_selected(cell.date, target_month),
        })
        .collect())
}

/// Draw the band outline and column edges onto a copy of the page
pub fn render_overlay(page: &DynamicImage, band: &Rect, cells: &[PreviewCell]) -> SplitResult<RgbImage> {
    band.validate()?;
    let mut canvas = page.to_rgb8();
    let (left, top, right, bottom) = band.to_pixel_bounds();

    // Outline grows inwards from the band edges
    fill_rect(&mut canvas, (left, top, right + 1, top + BAND_LINE_WIDTH), BAND_COLOR);
    fill_rect(&mut canvas, (left, bottom + 1 - BAND_LINE_WIDTH, right + 1, bottom + 1), BAND_COLOR);
    fill_rect(&mut canvas, (left, top, left + BAND_LINE_WIDTH, bottom + 1), BAND_COLOR);
    fill_rect(&mut canvas, (right + 1 - BAND_LINE_WIDTH, top, right + 1, bottom + 1), BAND_COLOR);

    for cell in cells {
        let column = column_rect(band, cell.column_index)?;
        let x = column.x0.round() as i64;
        let color = if cell.selected { SELECTED_COLOR } else { UNSELECTED_COLOR };
        let half = COLUMN_LINE_WIDTH / 2;
        fill_rect(&mut canvas, (x - half, top, x - half + COLUMN_LINE_WIDTH, bottom + 1), color);
    }

    Ok(canvas)
}

/// The band cut out of the page
pub fn crop_band(page: &DynamicImage, band: &Rect) -> SplitResult<DynamicImage> {
    band.validate()?;
    crop_region(page, band)
}

/// Fill `(left, top, right, bottom)` (right/bottom exclusive), clipped to the image
fn fill_rect(image: &mut RgbImage, bounds: (i64, i64, i64, i64), color: Rgb<u8>) {
    let (left, top, right, bottom) = bounds;
    let x_start = left.clamp(0, image.width() as i64) as u32;
    let x_end = right.clamp(0, image.width() as i64) as u32;
    let y_start = top.clamp(0, image.height() as i64) as u32;
    let y_end = bottom.clamp(0, image.height() as i64) as u32;

    for y in y_start..y_end {
        for x in x_start..x_end {
            image.put_pixel(x, y, color);
        }
    }
}

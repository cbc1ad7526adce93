//! Page geometry
//!
//! Rectangles are expressed in pixels of a page rendered at a given DPI.
//! A rectangle measured at one DPI does not line up with a page rendered
//! at another.

mod rect;
mod grid;

pub use self::rect::Rect;
pub use self::grid::{column_rect, column_rects, COLUMN_COUNT};

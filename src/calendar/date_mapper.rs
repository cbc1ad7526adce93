//! Mapping of page/column positions to calendar dates

use chrono::{Days, NaiveDate};

use crate::errors::{SplitError, SplitResult};

/// Number of day columns on every page
pub const DAYS_PER_WEEK: usize = 7;

/// One grid cell of a page together with the date it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    /// Zero-based page index
    pub page_index: usize,
    /// Column index, Monday=0 ... Sunday=6
    pub column_index: usize,
    /// Date shown in this cell
    pub date: NaiveDate,
}

impl CalendarCell {
    /// Derive the cell at the given page and column
    pub fn new(anchor: NaiveDate, page_index: usize, column_index: usize) -> SplitResult<Self> {
        Ok(CalendarCell {
            page_index,
            column_index,
            date: map_date(anchor, page_index, column_index)?,
        })
    }
}

/// Date of a column on a page
///
/// The anchor is the date of column 0 on page 0; every page advances one week
/// and every column one day: `anchor + 7 * page_index + column_index`.
///
/// The anchor is conventionally a Monday, but any date is accepted and the
/// arithmetic stays the same.
pub fn map_date(anchor: NaiveDate, page_index: usize, column_index: usize) -> SplitResult<NaiveDate> {
    let offset_days = (page_index as u64)
        .checked_mul(DAYS_PER_WEEK as u64)
        .and_then(|days| days.checked_add(column_index as u64))
        .ok_or(SplitError::DateOutOfRange { anchor, offset_days: u64::MAX })?;

    anchor
        .checked_add_days(Days::new(offset_days))
        .ok_or(SplitError::DateOutOfRange { anchor, offset_days })
}

/// Date of the first column (Monday) on a page
pub fn page_monday(anchor: NaiveDate, page_index: usize) -> SplitResult<NaiveDate> {
    map_date(anchor, page_index, 0)
}

/// All seven cells of a page, Monday first
pub fn cells_for_page(anchor: NaiveDate, page_index: usize) -> SplitResult<Vec<CalendarCell>> {
    (0..DAYS_PER_WEEK)
        .map(|column_index| CalendarCell::new(anchor, page_index, column_index))
        .collect()
}

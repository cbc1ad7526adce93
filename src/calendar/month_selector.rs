//! Month filter for calendar cells

use chrono::{Datelike, NaiveDate};

/// Whether a date belongs to the target month (1-12)
///
/// Only the month number is compared. A document spanning more than a year
/// selects the same month of every year it covers.
pub fn is_selected(date: NaiveDate, target_month: u32) -> bool {
    date.month() == target_month
}

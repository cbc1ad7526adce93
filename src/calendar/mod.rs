//! Calendar arithmetic for week-per-page documents
//!
//! Each page of the document shows one calendar week laid out in seven
//! columns, Monday first. Dates are never read from the page; they are
//! derived from an anchor date and the page/column position.

mod date_mapper;
mod month_selector;

pub use self::date_mapper::{cells_for_page, map_date, page_monday, CalendarCell, DAYS_PER_WEEK};
pub use self::month_selector::is_selected;

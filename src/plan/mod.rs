//! Extraction planning
//!
//! A plan lists every day image a run will emit, in the order it will be
//! written. It is computed from the page count and configuration alone, so
//! it can be built before any page is rendered.

mod planner;

pub use self::planner::{build_plan, ExtractionEntry, ExtractionPlan};

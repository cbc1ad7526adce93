//! Plan construction

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::calendar::{is_selected, map_date, DAYS_PER_WEEK};
use crate::errors::SplitResult;
use crate::geometry::{column_rects, Rect};

/// One image to emit: which page, which part of it, and under which name
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionEntry {
    /// Zero-based page index
    pub page_index: usize,
    /// Column index, Monday=0 ... Sunday=6
    pub column_index: usize,
    /// Date the cell stands for
    pub date: NaiveDate,
    /// Pixel rectangle of the cell at the run's DPI
    pub rect: Rect,
    /// Day of month without padding ("1" ... "31")
    pub file_name: String,
}

impl ExtractionEntry {
    /// Name of the archive entry holding this image
    pub fn archive_name(&self) -> String {
        format!("{}.png", self.file_name)
    }
}

/// Ordered list of extraction entries
///
/// Entries are sorted by page index, then by column index. Entries of the same
/// page are therefore adjacent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionPlan {
    entries: Vec<ExtractionEntry>,
}

impl ExtractionPlan {
    /// All entries in emission order
    pub fn entries(&self) -> &[ExtractionEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan emits nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct page indices referenced by the plan, ascending
    pub fn pages(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = self.entries.iter().map(|e| e.page_index).collect();
        pages.dedup();
        pages
    }

    /// Entries grouped by page, ascending by page index
    pub fn page_groups(&self) -> impl Iterator<Item = (usize, &[ExtractionEntry])> {
        self.entries
            .chunk_by(|a, b| a.page_index == b.page_index)
            .map(|group| (group[0].page_index, group))
    }

    /// Entries that come from one page
    pub fn entries_for_page(&self, page_index: usize) -> impl Iterator<Item = &ExtractionEntry> {
        self.entries.iter().filter(move |e| e.page_index == page_index)
    }
}

/// Compute the ordered extraction plan for a document
///
/// Pages are visited in ascending order and columns Monday to Sunday. Every
/// cell whose date falls in `target_month` yields one entry named after its
/// day of month. The band is validated before anything else, including that
/// every column keeps a usable pixel area once its edges are rounded.
///
/// # Arguments
/// * `page_count` - Number of pages in the document
/// * `anchor` - Date of column 0 on page 0
/// * `band` - Week band rectangle at the run's DPI
/// * `target_month` - Month to extract (1-12)
///
/// # Returns
/// The plan, or `InvalidGeometry` when the band or one of its columns has no
/// usable area
pub fn build_plan(page_count: usize, anchor: NaiveDate, band: &Rect, target_month: u32) -> SplitResult<ExtractionPlan> {
    band.validate()?;
    let columns = column_rects(band)?;
    for column in &columns {
        column.pixel_size()?;
    }

    let mut entries = Vec::new();
    for page_index in 0..page_count {
        for column_index in 0..DAYS_PER_WEEK {
            let date = map_date(anchor, page_index, column_index)?;
            if !is_selected(date, target_month) {
                continue;
            }

            entries.push(ExtractionEntry {
                page_index,
                column_index,
                date,
                rect: columns[column_index],
                file_name: date.day().to_string(),
            });
        }
    }

    debug!(
        "Planned {} entries over {} pages for month {}",
        entries.len(),
        page_count,
        target_month
    );

    Ok(ExtractionPlan { entries })
}

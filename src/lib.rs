pub mod errors;
pub mod calendar;
pub mod geometry;
pub mod extractor;
pub mod plan;
pub mod raster;
pub mod archive;
pub mod preview;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{CalendarSplitter, PagePreview, SplitOutcome};

pub use errors::{SplitError, SplitResult};
pub use config::RunConfig;
pub use geometry::Rect;
pub use plan::{build_plan, ExtractionEntry, ExtractionPlan};
pub use raster::{CachingRasterizer, MemoryRasterizer, PageRasterizer, PdfiumRasterizer};
pub use archive::{archive_file_name, ArchiveAssembler, AssemblyReport, ZipArchiveWriter};

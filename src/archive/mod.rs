//! Packaging of day images into an archive

mod writer;
mod assembler;

pub use self::writer::{ArchiveWriter, ZipArchiveWriter};
pub use self::assembler::{ArchiveAssembler, AssemblyReport};

/// Suggested file name for the archive of a month, e.g. `menu_01.zip`
pub fn archive_file_name(target_month: u32) -> String {
    format!("menu_{:02}.zip", target_month)
}

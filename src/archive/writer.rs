//! Archive writers

use std::collections::HashMap;
use std::io::{Cursor, Write};

use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::SplitResult;

/// Destination for named blobs
pub trait ArchiveWriter {
    /// Add a blob under a name
    ///
    /// Adding a name that is already present replaces the earlier content.
    fn insert(&mut self, name: &str, bytes: Vec<u8>) -> SplitResult<()>;

    /// Number of distinct names held
    fn len(&self) -> usize;

    /// Whether nothing has been inserted
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Complete the archive and return its bytes
    fn finish(self) -> SplitResult<Vec<u8>>;
}

/// Writes a Deflate-compressed ZIP archive
///
/// Entries are kept in the order their names first appeared and written out
/// on `finish`, so a replaced entry appears once with its latest content.
pub struct ZipArchiveWriter {
    entries: Vec<(String, Vec<u8>)>,
    positions: HashMap<String, usize>,
}

impl ZipArchiveWriter {
    /// Create an empty Deflate archive
    pub fn new() -> Self {
        ZipArchiveWriter {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl Default for ZipArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    fn insert(&mut self, name: &str, bytes: Vec<u8>) -> SplitResult<()> {
        match self.positions.get(name) {
            Some(&position) => {
                debug!("Archive entry {} replaced by a later image", name);
                self.entries[position].1 = bytes;
            }
            None => {
                self.positions.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), bytes));
            }
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn finish(self) -> SplitResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for (name, bytes) in &self.entries {
            let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            zip.start_file(name.as_str(), options)?;
            zip.write_all(bytes)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

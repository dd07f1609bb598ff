use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::format::ArchiveFormat;

/// What happened to a file entry during extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    Written,
    /// The destination already existed and was left untouched.
    Skipped,
}

/// A file entry materialized (or found) under the target directory.
#[derive(Clone, Debug)]
pub struct Entry {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub size: u64,
    pub status: EntryStatus,
}

impl Entry {
    pub fn is_written(&self) -> bool {
        self.status == EntryStatus::Written
    }
}

#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub format: ArchiveFormat,
    pub entries: Vec<Entry>,
}

impl ArchiveReport {
    /// Destination paths of every file entry, written or skipped.
    pub fn files(&self) -> BTreeSet<PathBuf> {
        self.entries.iter().map(|e| e.target_path.clone()).collect()
    }

    pub fn written(&self) -> usize {
        self.entries.iter().filter(|e| e.is_written()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.len() - self.written()
    }

    /// Bytes actually written to disk.
    pub fn bytes_written(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.is_written())
            .map(|e| e.size)
            .sum()
    }
}

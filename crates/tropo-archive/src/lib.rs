//! Archive extraction with skip-if-exists cache semantics.
//!
//! # Architecture
//!
//! - `format.rs` - Format detection and tar decompression
//! - `sanitize.rs` - Entry path resolution (zip-slip prevention)
//! - `extract/` - Extraction pipeline and per-format entry sources
//! - `entry.rs` - Report types
//!
//! A destination file that already exists is never read from the archive
//! nor rewritten. Pre-seeded or hand-edited files survive re-extraction.

pub use entry::{ArchiveReport, Entry, EntryStatus};
pub use error::{Error, Result};
pub use extract::{extract, extract_file, extract_from_reader};
pub use format::{ArchiveFormat, Compression, detect_file, detect_format};
pub use sanitize::resolve_entry_path;

pub mod entry;
mod error;
pub mod extract;
pub mod format;
mod sanitize;

use crate::{Error, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// Create an empty file at `path` unless something is already there.
///
/// Existing content is never truncated.
pub fn touch(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|e| Error::Write {
            path: path.to_path_buf(),
            source: e,
        })
}

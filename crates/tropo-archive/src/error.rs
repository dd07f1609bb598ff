use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("unsupported archive format")]
    UnsupportedFormat,

    #[error("archive is corrupted: {reason}")]
    Corrupted { reason: String },

    #[error("invalid entry path: '{entry}'")]
    InvalidPath { entry: String },

    #[error("zip-slip attack detected: entry '{entry}' escapes the target directory")]
    ZipSlip { entry: PathBuf },

    #[error("failed to read entry '{entry}': {source}")]
    EntryRead { entry: PathBuf, source: io::Error },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: tropo_fs::Error,
    },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

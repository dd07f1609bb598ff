use std::path::PathBuf;

use tropo_platform::process::Error as ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("runtime artifact not found: '{path}'")]
    RuntimeMissing { path: PathBuf },

    #[error("failed to resolve runtime directory '{path}': {source}")]
    RuntimeDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("expected '{path}' to be a runtime jar, but it is not a recognized archive")]
    UnrecognizedRuntime { path: PathBuf },

    #[error("failed to extract '{archive}': {source}")]
    Extract {
        archive: PathBuf,
        source: tropo_archive::Error,
    },

    #[error("bootstrap resource '{name}' not found at '{path}'")]
    BootstrapMissing { name: String, path: PathBuf },

    #[error("failed to write path entry for '{name}': {source}")]
    PathEntry {
        name: String,
        source: tropo_fs::Error,
    },

    #[error("couldn't create executable marker: {0}")]
    Marker(#[source] tropo_fs::Error),

    #[error(transparent)]
    Fs(#[from] tropo_fs::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("installing libraries {libraries:?} failed: {source}")]
    Process {
        libraries: Vec<String>,
        source: ProcessError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("failed to prepare output for '{source_path}': {source}")]
    Output {
        source_path: PathBuf,
        source: tropo_fs::Error,
    },

    #[error("processing '{source_path}' failed: {source}")]
    Process {
        source_path: PathBuf,
        source: ProcessError,
    },
}

impl TransformError {
    /// The source file being processed when the batch stopped, if any.
    pub fn source_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Output { source_path, .. } | Self::Process { source_path, .. } => Some(source_path),
            Self::Stage(_) => None,
        }
    }
}

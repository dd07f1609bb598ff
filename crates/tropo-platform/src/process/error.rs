use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("empty argument vector")]
    EmptyArgv,

    #[error("failed to create output file '{path}': {source}")]
    OutputSink { path: PathBuf, source: io::Error },

    #[error("failed to launch {argv:?}: {source}")]
    Launch { argv: Vec<String>, source: io::Error },

    #[error("child {0} was not piped")]
    StreamUnavailable(&'static str),

    #[error("interrupted while waiting for {argv:?}: {source}")]
    Wait { argv: Vec<String>, source: io::Error },

    #[error("process failed with return code {code}: {argv:?}")]
    NonZeroExit { code: i32, argv: Vec<String> },

    #[error("process terminated by a signal: {argv:?}")]
    Terminated { argv: Vec<String> },

    #[error("failed to capture output to '{path}': {source}")]
    Capture { path: PathBuf, source: io::Error },
}

impl Error {
    /// Exit code of a child that ran to completion and failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! The bootstrap egg installed into every runtime.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::error::StageError;

/// File name of the setuptools egg that provides easy_install.
pub const DEFAULT_BOOTSTRAP: &str = "setuptools-0.6c11-py2.5.egg";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootstrapSource {
    /// Bytes compiled into the caller.
    Embedded(&'static [u8]),
    /// An egg on disk.
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapResource {
    name: String,
    source: BootstrapSource,
}

impl BootstrapResource {
    pub fn new(name: impl Into<String>, source: BootstrapSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    pub fn embedded(name: impl Into<String>, bytes: &'static [u8]) -> Self {
        Self::new(name, BootstrapSource::Embedded(bytes))
    }

    /// An egg on disk, named after its file name.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_BOOTSTRAP.to_owned());
        Self::new(name, BootstrapSource::File(path))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &BootstrapSource {
        &self.source
    }

    pub(crate) fn bytes(&self) -> Result<Cow<'static, [u8]>, StageError> {
        match &self.source {
            BootstrapSource::Embedded(bytes) => Ok(Cow::Borrowed(*bytes)),
            BootstrapSource::File(path) => {
                if !path.is_file() {
                    return Err(StageError::BootstrapMissing {
                        name: self.name.clone(),
                        path: path.clone(),
                    });
                }
                Ok(Cow::Owned(tropo_fs::atomic_read(path)?))
            }
        }
    }
}

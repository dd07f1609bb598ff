//! Staging: runtime jar plus bootstrap egg into one directory.
//!
//! Every step is safe to repeat. Extraction never rewrites a file that is
//! already present, so a second staging over the same directory keeps local
//! edits and whatever easy_install installed earlier.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::data::StagedEnvironment;
use crate::error::StageError;
use crate::resource::BootstrapResource;

#[derive(Clone, Debug)]
pub struct Stager {
    runtime_dir: PathBuf,
}

impl Stager {
    pub fn new(runtime_dir: impl Into<PathBuf>) -> Self {
        Self {
            runtime_dir: runtime_dir.into(),
        }
    }

    /// Unpack `runtime_artifact` and `bootstrap` into the runtime directory.
    pub fn stage(
        &self,
        runtime_artifact: &Path,
        bootstrap: &BootstrapResource,
    ) -> Result<StagedEnvironment, StageError> {
        check_runtime(runtime_artifact)?;

        let runtime_dir =
            std::path::absolute(&self.runtime_dir).map_err(|source| StageError::RuntimeDir {
                path: self.runtime_dir.clone(),
                source,
            })?;
        let env = StagedEnvironment::new(runtime_dir, bootstrap.name());

        tropo_fs::ensure_dir(env.runtime_dir())?;
        tropo_fs::ensure_dir(env.build_dir())?;

        extract(runtime_artifact, env.runtime_dir())?;

        info!(bootstrap = bootstrap.name(), "installing easy_install");
        let egg = env.bootstrap_archive();
        tropo_fs::atomic_write(&egg, &bootstrap.bytes()?)?;
        extract(&egg, &env.bootstrap_dir())?;

        let entry = format!("./{}\n", bootstrap.name());
        tropo_fs::atomic_write(env.path_entry_file(), entry.as_bytes()).map_err(|source| {
            StageError::PathEntry {
                name: bootstrap.name().to_owned(),
                source,
            }
        })?;
        info!("installing easy_install done");

        Ok(env)
    }
}

fn check_runtime(artifact: &Path) -> Result<(), StageError> {
    if !artifact.is_file() {
        return Err(StageError::RuntimeMissing {
            path: artifact.to_path_buf(),
        });
    }
    match tropo_archive::detect_file(artifact) {
        Ok(Some(format)) => {
            debug!(?format, path = %artifact.display(), "runtime artifact recognized");
            Ok(())
        }
        Ok(None) => Err(StageError::UnrecognizedRuntime {
            path: artifact.to_path_buf(),
        }),
        Err(source) => Err(StageError::Extract {
            archive: artifact.to_path_buf(),
            source,
        }),
    }
}

fn extract(archive: &Path, destination: &Path) -> Result<(), StageError> {
    tropo_archive::extract_file(archive, destination).map_err(|source| StageError::Extract {
        archive: archive.to_path_buf(),
        source,
    })?;
    Ok(())
}

//! One interpreter run per source file, stdout captured to a template.

use std::path::{Path, PathBuf};

use tracing::info;

use tropo_platform::OutputSink;

use crate::data::StagedEnvironment;
use crate::effects::ScriptRunner;
use crate::error::TransformError;
use crate::launcher::Launcher;

pub const OUTPUT_EXTENSION: &str = "template";

/// Output path for a source path relative to the source root.
///
/// The file name loses everything from its last `.` and gains `.template`.
/// A file name without a `.` is left alone; dots in directory names never
/// count.
pub fn output_path_for(relative: &Path) -> PathBuf {
    let Some(name) = relative.file_name() else {
        return relative.to_path_buf();
    };
    let name = name.to_string_lossy();
    match name.rfind('.') {
        Some(idx) => relative.with_file_name(format!("{}.{OUTPUT_EXTENSION}", &name[..idx])),
        None => relative.to_path_buf(),
    }
}

pub struct BatchTransformer<'a> {
    env: &'a StagedEnvironment,
    launcher: &'a Launcher,
    libraries: &'a [String],
    output_root: PathBuf,
}

impl<'a> BatchTransformer<'a> {
    pub fn new(
        env: &'a StagedEnvironment,
        launcher: &'a Launcher,
        libraries: &'a [String],
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            env,
            launcher,
            libraries,
            output_root: output_root.into(),
        }
    }

    /// Run every matched source in lexicographic order of its relative path.
    ///
    /// Stops at the first failure. Outputs already produced, including a
    /// partial one from the failing run, stay on disk.
    pub async fn transform_all<R: ScriptRunner>(
        &self,
        source_root: &Path,
        matched: &[PathBuf],
        runner: &R,
    ) -> Result<Vec<PathBuf>, TransformError> {
        let mut ordered: Vec<&PathBuf> = matched.iter().collect();
        ordered.sort();

        let mut outputs = Vec::with_capacity(ordered.len());
        for relative in ordered {
            outputs.push(self.transform_one(source_root, relative, runner).await?);
        }
        Ok(outputs)
    }

    async fn transform_one<R: ScriptRunner>(
        &self,
        source_root: &Path,
        relative: &Path,
        runner: &R,
    ) -> Result<PathBuf, TransformError> {
        info!("Processing file: {}", relative.display());

        let source = absolute(&source_root.join(relative));
        let output = self.output_root.join(output_path_for(relative));
        tropo_fs::ensure_parent(&output).map_err(|e| TransformError::Output {
            source_path: source.clone(),
            source: e,
        })?;

        let invocation = self.launcher.invocation(
            self.env,
            &source,
            self.libraries,
            OutputSink::File(output.clone()),
        )?;
        runner
            .run(invocation)
            .await
            .map_err(|e| TransformError::Process {
                source_path: source,
                source: e,
            })?;

        Ok(output)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

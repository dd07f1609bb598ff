//! Argument vectors for the interpreter.

use std::path::Path;

use tropo_platform::path::join_classpath;
use tropo_platform::{Invocation, OutputSink, StdinSource};

use crate::data::{LIB_DIR, StagedEnvironment};
use crate::error::StageError;

pub const DEFAULT_JAVA: &str = "java";
pub const INTERPRETER_MAIN: &str = "org.python.util.jython";
/// Empty file in the runtime directory the interpreter reports as its executable.
pub const EXECUTABLE_MARKER: &str = "jython";

/// Fixed launcher tokens for a staged runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Launcher {
    java: String,
    main_class: String,
    marker: String,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(DEFAULT_JAVA)
    }
}

impl Launcher {
    pub fn new(java: impl Into<String>) -> Self {
        Self {
            java: java.into(),
            main_class: INTERPRETER_MAIN.to_owned(),
            marker: EXECUTABLE_MARKER.to_owned(),
        }
    }

    pub fn java(&self) -> &str {
        &self.java
    }

    /// Launcher flags, then `script`, then the cache flag, then `trailing`.
    ///
    /// The interpreter runs with the runtime directory as its working
    /// directory, so `.` and `Lib` on the classpath resolve inside it.
    pub fn argv(&self, env: &StagedEnvironment, script: &Path, trailing: &[String]) -> Vec<String> {
        let mut argv = Vec::with_capacity(9 + trailing.len());
        argv.push(self.java.clone());
        argv.push("-cp".to_owned());
        argv.push(join_classpath([".", LIB_DIR]));
        argv.push("-Dpython.home=.".to_owned());
        argv.push(format!("-Dpython.executable={}", self.marker));
        argv.push(self.main_class.clone());
        argv.push(script.to_string_lossy().into_owned());
        argv.push("--build-directory".to_owned());
        argv.push(env.build_dir().to_string_lossy().into_owned());
        argv.extend(trailing.iter().cloned());
        argv
    }

    /// Build a ready-to-run invocation, creating the executable marker first.
    pub fn invocation(
        &self,
        env: &StagedEnvironment,
        script: &Path,
        trailing: &[String],
        sink: OutputSink,
    ) -> Result<Invocation, StageError> {
        tropo_fs::touch(env.runtime_dir().join(&self.marker)).map_err(StageError::Marker)?;
        Ok(
            Invocation::new(env.runtime_dir(), self.argv(env, script, trailing))
                .stdout(sink)
                .stdin(StdinSource::Inherit),
        )
    }
}

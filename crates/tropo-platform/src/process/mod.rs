//! Launching the interpreter.
//!
//! One [`Invocation`] maps to one child process. While the child runs, three
//! tasks scoped to the call copy its streams: stdout to the caller's stdout or
//! a file, stderr to the caller's stderr, and the caller's stdin into the
//! child. The child's exit cancels the stdin task; both output drains are
//! joined before the exit code is reported.

mod error;
mod stdio;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use stdio::Sink;

/// Where the child's standard output goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputSink {
    /// The caller's own stdout.
    #[default]
    Inherit,
    /// A file created (or truncated) before launch.
    File(PathBuf),
}

/// What the child reads on standard input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StdinSource {
    /// Forward the caller's stdin until the child exits.
    #[default]
    Inherit,
    /// Closed stdin.
    Null,
    /// Feed these bytes, then close.
    Bytes(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    working_dir: PathBuf,
    argv: Vec<String>,
    stdout: OutputSink,
    stdin: StdinSource,
}

impl Invocation {
    pub fn new(working_dir: impl Into<PathBuf>, argv: Vec<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            argv,
            stdout: OutputSink::Inherit,
            stdin: StdinSource::Inherit,
        }
    }

    pub fn stdout(mut self, sink: OutputSink) -> Self {
        self.stdout = sink;
        self
    }

    /// Shorthand for `stdout(OutputSink::File(path))`.
    pub fn capture_to(self, path: impl Into<PathBuf>) -> Self {
        self.stdout(OutputSink::File(path.into()))
    }

    pub fn stdin(mut self, source: StdinSource) -> Self {
        self.stdin = source;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn output_sink(&self) -> &OutputSink {
        &self.stdout
    }

    pub fn stdin_source(&self) -> &StdinSource {
        &self.stdin
    }
}

/// Runs invocations to completion, one child at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orchestrator;

impl Orchestrator {
    pub fn new() -> Self {
        Self
    }

    /// Launch the child, multiplex its streams and wait for it.
    ///
    /// Returns `Ok(0)` on success. Output already written to a sink file is
    /// kept whatever the exit status.
    pub async fn run(&self, invocation: Invocation) -> Result<i32> {
        let Invocation {
            working_dir,
            argv,
            stdout,
            stdin,
        } = invocation;
        let (program, args) = argv.split_first().ok_or(Error::EmptyArgv)?;

        info!(argv = ?argv, dir = %working_dir.display(), "running");

        let sink = match &stdout {
            OutputSink::Inherit => Sink::Stdout,
            OutputSink::File(path) => {
                let file = tokio::fs::File::create(path)
                    .await
                    .map_err(|source| Error::OutputSink {
                        path: path.clone(),
                        source,
                    })?;
                Sink::File(file)
            }
        };

        let stdin_cfg = match stdin {
            StdinSource::Null => Stdio::null(),
            StdinSource::Inherit | StdinSource::Bytes(_) => Stdio::piped(),
        };

        let spawned = Command::new(program)
            .args(args)
            .current_dir(&working_dir)
            .stdin(stdin_cfg)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(source) => {
                if let OutputSink::File(path) = &stdout {
                    let _ = tokio::fs::remove_file(path).await;
                }
                return Err(Error::Launch { argv, source });
            }
        };

        let child_stdout = child.stdout.take().ok_or(Error::StreamUnavailable("stdout"))?;
        let child_stderr = child.stderr.take().ok_or(Error::StreamUnavailable("stderr"))?;

        let stdout_task = tokio::spawn(stdio::drain_stdout(child_stdout, sink));
        let stderr_task = tokio::spawn(stdio::drain_stderr(child_stderr));
        let stdin_task = child
            .stdin
            .take()
            .map(|pipe| tokio::spawn(stdio::feed_stdin(pipe, stdin)));

        let waited = child.wait().await;

        if let Some(task) = stdin_task {
            task.abort();
        }
        let captured = join(stdout_task).await;
        match join(stderr_task).await {
            Ok(bytes) => debug!(bytes, "stderr drained"),
            Err(e) => warn!(error = %e, "failed to forward child stderr"),
        }

        let status = waited.map_err(|source| Error::Wait {
            argv: argv.clone(),
            source,
        })?;
        let Some(code) = status.code() else {
            return Err(Error::Terminated { argv });
        };
        if code != 0 {
            return Err(Error::NonZeroExit { code, argv });
        }

        match (captured, stdout) {
            (Ok(bytes), _) => debug!(bytes, "stdout drained"),
            (Err(source), OutputSink::File(path)) => return Err(Error::Capture { path, source }),
            (Err(e), OutputSink::Inherit) => warn!(error = %e, "failed to forward child stdout"),
        }

        Ok(code)
    }
}

async fn join(task: JoinHandle<std::io::Result<u64>>) -> std::io::Result<u64> {
    task.await.unwrap_or_else(|e| Err(std::io::Error::other(e)))
}

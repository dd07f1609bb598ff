#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tropo_install::ScriptRunner;
use tropo_platform::process::Error as ProcessError;
use tropo_platform::{Invocation, OutputSink};
use zip::write::SimpleFileOptions;

pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// A runtime jar with the files a staged interpreter needs.
pub fn write_runtime_jar(path: &Path) {
    write_zip(
        path,
        &[
            ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
            ("org/python/util/jython.class", "\u{ca}\u{fe}"),
            ("Lib/os.py", "import posix\n"),
        ],
    );
}

pub fn write_bootstrap_egg(path: &Path) {
    write_zip(
        path,
        &[
            ("easy_install.py", "main()\n"),
            ("tool.py", "print('tool')\n"),
            ("EGG-INFO/PKG-INFO", "Name: tool\n"),
        ],
    );
}

/// Records invocations instead of launching them. Captured runs get the
/// script path written to their output file.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    fail_at: Option<usize>,
}

impl RecordingRunner {
    pub fn failing_at(index: usize) -> Self {
        Self {
            calls: Mutex::default(),
            fail_at: Some(index),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, invocation: Invocation) -> Result<i32, ProcessError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        let argv = invocation.argv().to_vec();
        if let OutputSink::File(path) = invocation.output_sink() {
            std::fs::write(path, format!("{}\n", argv[6])).unwrap();
        }
        calls.push(invocation);
        if self.fail_at == Some(index) {
            return Err(ProcessError::NonZeroExit { code: 1, argv });
        }
        Ok(0)
    }
}

impl ScriptRunner for RecordingRunner {
    fn run(&self, invocation: Invocation) -> impl Future<Output = Result<i32, ProcessError>> {
        std::future::ready(self.record(invocation))
    }
}

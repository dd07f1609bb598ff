//! Process seam between the install steps and the orchestrator.

use tropo_platform::Invocation;
use tropo_platform::Orchestrator;
use tropo_platform::process::Error as ProcessError;

/// Runs one interpreter invocation to completion.
pub trait ScriptRunner {
    fn run(&self, invocation: Invocation) -> impl Future<Output = Result<i32, ProcessError>>;
}

impl ScriptRunner for Orchestrator {
    fn run(&self, invocation: Invocation) -> impl Future<Output = Result<i32, ProcessError>> {
        Orchestrator::run(self, invocation)
    }
}

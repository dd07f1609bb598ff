//! Platform helpers and the process orchestrator.
//!
//! - `path.rs` - Classpath joining with the platform separator
//! - `process/` - Launching a child with its three streams multiplexed

pub mod path;
pub mod process;

pub use process::{Invocation, Orchestrator, OutputSink, StdinSource};

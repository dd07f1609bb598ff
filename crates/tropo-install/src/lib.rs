//! Staging an interpreter runtime and driving it over a batch of sources.
//!
//! # Architecture
//!
//! - `stage.rs` - Unpack the runtime and bootstrap into a runtime directory
//! - `data.rs` - The staged directory layout
//! - `resource.rs` - Where the bootstrap egg comes from
//! - `launcher.rs` - Argument vectors for the interpreter
//! - `effects.rs` - The process seam ([`ScriptRunner`])
//! - `install.rs` - Library installation through easy_install
//! - `transform.rs` - One interpreter run per source file
//!
//! Staging returns an immutable [`StagedEnvironment`]; every later step takes
//! it explicitly.

pub mod data;
pub mod effects;
pub mod error;
pub mod install;
pub mod launcher;
pub mod resource;
pub mod stage;
pub mod transform;

pub use data::StagedEnvironment;
pub use effects::ScriptRunner;
pub use error::{InstallError, StageError, TransformError};
pub use install::install_libraries;
pub use launcher::Launcher;
pub use resource::{BootstrapResource, BootstrapSource, DEFAULT_BOOTSTRAP};
pub use stage::Stager;
pub use transform::{BatchTransformer, output_path_for};

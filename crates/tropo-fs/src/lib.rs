//! Filesystem primitives used while staging a runtime directory.
//!
//! Everything here reports the path it failed on, so callers can surface a
//! single diagnosable error without re-wrapping.

mod error;
mod primitives;

pub use error::{Error, Result};
pub use primitives::dir::{ensure_dir, ensure_parent};
pub use primitives::marker::touch;
pub use primitives::rw::{atomic_read, atomic_write};

//! Layout of a staged runtime directory.
//!
//! ```text
//! <runtime_dir>/
//!   jython                       executable marker (empty)
//!   build/                       package download cache, holds <egg>
//!   Lib/
//!     site-packages/
//!       setuptools.pth           "./<egg>\n"
//!       <egg>/easy_install.py
//! ```

use std::path::{Path, PathBuf};

pub const LIB_DIR: &str = "Lib";
pub const SITE_PACKAGES_DIR: &str = "site-packages";
pub const BUILD_DIR: &str = "build";
pub const PATH_ENTRY_FILE: &str = "setuptools.pth";
pub const EASY_INSTALL_SCRIPT: &str = "easy_install.py";

/// A runtime directory after staging.
///
/// Constructing one only describes a layout; [`crate::Stager::stage`] is what
/// puts the files in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedEnvironment {
    runtime_dir: PathBuf,
    bootstrap_name: String,
}

impl StagedEnvironment {
    pub fn new(runtime_dir: impl Into<PathBuf>, bootstrap_name: impl Into<String>) -> Self {
        Self {
            runtime_dir: runtime_dir.into(),
            bootstrap_name: bootstrap_name.into(),
        }
    }

    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }

    pub fn bootstrap_name(&self) -> &str {
        &self.bootstrap_name
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.runtime_dir.join(LIB_DIR)
    }

    pub fn site_packages(&self) -> PathBuf {
        self.lib_dir().join(SITE_PACKAGES_DIR)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.runtime_dir.join(BUILD_DIR)
    }

    /// Where the bootstrap egg is unpacked.
    pub fn bootstrap_dir(&self) -> PathBuf {
        self.site_packages().join(&self.bootstrap_name)
    }

    /// The cached copy of the bootstrap egg.
    pub fn bootstrap_archive(&self) -> PathBuf {
        self.build_dir().join(&self.bootstrap_name)
    }

    pub fn path_entry_file(&self) -> PathBuf {
        self.site_packages().join(PATH_ENTRY_FILE)
    }

    /// easy_install relative to the runtime directory, as the interpreter sees it.
    pub fn easy_install_script(&self) -> PathBuf {
        Path::new(LIB_DIR)
            .join(SITE_PACKAGES_DIR)
            .join(&self.bootstrap_name)
            .join(EASY_INSTALL_SCRIPT)
    }
}

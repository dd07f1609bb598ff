//! Layered configuration: defaults, `tropo.toml`, `TROPO_*` environment, flags.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tropo_install::{BootstrapResource, DEFAULT_BOOTSTRAP};

use crate::cli::Overrides;

pub const ENV_PREFIX: &str = "TROPO_";
/// Where the bootstrap egg is looked up when none is configured and none is
/// compiled in.
pub const BOOTSTRAP_DIR: &str = "resources";
pub const RUNTIME_GROUP: &str = "org.python";
pub const RUNTIME_ARTIFACT: &str = "jython-standalone";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] Box<figment::Error>),

    #[error(
        "org.python:jython-standalone dependency not found.\n\
         Add a dependency to jython-standalone to your configuration:\n\n{snippet}"
    )]
    RuntimeArtifactMissing { snippet: String },
}

/// A resolved build dependency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub path: PathBuf,
}

impl Dependency {
    fn is(&self, group: &str, artifact: &str) -> bool {
        self.group == group && self.artifact == artifact
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub temp_directory: PathBuf,
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub libraries: Vec<String>,
    pub java: String,
    /// setuptools egg on disk. Unset means the egg compiled in with the
    /// `embedded-bootstrap` feature, or `resources/<egg>` without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<PathBuf>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Runtime jar used as is, without looking at `dependencies`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temp_directory: PathBuf::from("target/troposphere-build-tmp"),
            source_directory: PathBuf::from("src/main/troposphere"),
            output_directory: PathBuf::from("target/generated-sources/troposphere"),
            includes: vec!["**/*.tr".to_owned(), "**/*.TR".to_owned()],
            excludes: Vec::new(),
            libraries: vec!["boto".to_owned(), "troposphere".to_owned()],
            java: "java".to_owned(),
            bootstrap: None,
            dependencies: Vec::new(),
            runtime: None,
        }
    }
}

impl Config {
    pub fn figment(file: &Path, overrides: &Overrides) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    pub fn load(file: &Path, overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::figment(file, overrides)
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// The interpreter jar: `runtime` if set, else the
    /// `org.python:jython-standalone` dependency.
    pub fn runtime_artifact(&self) -> Result<&Path, ConfigError> {
        if let Some(runtime) = &self.runtime {
            return Ok(runtime);
        }
        self.dependencies
            .iter()
            .find(|d| d.is(RUNTIME_GROUP, RUNTIME_ARTIFACT))
            .map(|d| d.path.as_path())
            .ok_or_else(|| ConfigError::RuntimeArtifactMissing {
                snippet: runtime_snippet(),
            })
    }

    pub fn bootstrap_resource(&self) -> BootstrapResource {
        match &self.bootstrap {
            Some(path) => BootstrapResource::from_file(path),
            None => default_bootstrap(),
        }
    }
}

/// The egg named by `TROPO_BOOTSTRAP_EGG` when the binary was built.
#[cfg(feature = "embedded-bootstrap")]
fn default_bootstrap() -> BootstrapResource {
    BootstrapResource::embedded(DEFAULT_BOOTSTRAP, include_bytes!(env!("TROPO_BOOTSTRAP_EGG")))
}

#[cfg(not(feature = "embedded-bootstrap"))]
fn default_bootstrap() -> BootstrapResource {
    BootstrapResource::from_file(Path::new(BOOTSTRAP_DIR).join(DEFAULT_BOOTSTRAP))
}

fn runtime_snippet() -> String {
    #[derive(Serialize)]
    struct Snippet {
        dependencies: [Dependency; 1],
    }

    let example = Snippet {
        dependencies: [Dependency {
            group: RUNTIME_GROUP.to_owned(),
            artifact: RUNTIME_ARTIFACT.to_owned(),
            version: "2.5.2".to_owned(),
            path: PathBuf::from("lib/jython-standalone-2.5.2.jar"),
        }],
    };
    toml::to_string(&example).unwrap_or_default()
}

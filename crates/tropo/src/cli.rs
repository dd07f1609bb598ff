use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "tropo")]
#[command(version, about = "Generate templates by running sources through a staged Jython runtime", long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "tropo.toml")]
    pub config: PathBuf,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Stage the runtime, install libraries and generate every template (default)
    #[default]
    Generate,
    /// Stage the runtime and install libraries only
    Stage,
    /// Print each matched source and the template it would produce
    List,
}

/// Settings given on the command line. Unset flags leave the configured
/// value alone.
#[derive(Debug, Default, Args, Serialize)]
pub struct Overrides {
    /// Directory scanned for sources
    #[arg(long = "source-dir", global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_directory: Option<PathBuf>,

    /// Directory receiving generated templates
    #[arg(long = "output-dir", global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,

    /// Directory the runtime is staged into
    #[arg(long = "temp-dir", global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_directory: Option<PathBuf>,

    /// Runtime jar, bypassing dependency lookup
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<PathBuf>,

    /// setuptools egg to install into the runtime. Without it the egg built
    /// in with the `embedded-bootstrap` feature is used, or else
    /// `resources/setuptools-0.6c11-py2.5.egg`, which must exist
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<PathBuf>,

    /// Java launcher
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java: Option<String>,

    /// Library to install (repeatable, replaces the configured list)
    #[arg(long = "library", global = true)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,

    /// Include pattern (repeatable, replaces the configured list)
    #[arg(long = "include", global = true)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    /// Exclude pattern (repeatable, replaces the configured list)
    #[arg(long = "exclude", global = true)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

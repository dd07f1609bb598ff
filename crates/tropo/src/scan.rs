//! Source discovery with Ant-style include and exclude patterns.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;
use walkdir::WalkDir;

/// Version control and editor droppings, always excluded.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    "**/CVS",
    "**/CVS/**",
    "**/.cvsignore",
    "**/SCCS",
    "**/SCCS/**",
    "**/vssver.scc",
    "**/.svn",
    "**/.svn/**",
    "**/.git",
    "**/.git/**",
    "**/.gitattributes",
    "**/.gitignore",
    "**/.gitmodules",
    "**/.hg",
    "**/.hg/**",
    "**/.hgignore",
    "**/.hgsub",
    "**/.hgsubstate",
    "**/.hgtags",
    "**/.bzr",
    "**/.bzr/**",
    "**/.bzrignore",
    "**/.DS_Store",
];

const MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to scan '{root}': {source}")]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },
}

#[derive(Debug)]
pub struct Scanner {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl Scanner {
    pub fn new<S: AsRef<str>>(includes: &[S], excludes: &[S]) -> Result<Self, ScanError> {
        let defaults = DEFAULT_EXCLUDES.iter().copied();
        Ok(Self {
            includes: compile(includes.iter().map(|s| s.as_ref()))?,
            excludes: compile(excludes.iter().map(|s| s.as_ref()).chain(defaults))?,
        })
    }

    /// Whether a slash-separated path relative to the scan root is selected.
    pub fn is_selected(&self, relative: &str) -> bool {
        self.includes.iter().any(|p| p.matches_with(relative, MATCH))
            && !self.excludes.iter().any(|p| p.matches_with(relative, MATCH))
    }

    /// Selected files under `root`, relative to it, sorted.
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let mut matched = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.map_err(|source| ScanError::Walk {
                root: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if self.is_selected(&slash_path(relative)) {
                matched.push(relative.to_path_buf());
            } else {
                debug!(path = %relative.display(), "not selected");
            }
        }
        matched.sort();
        Ok(matched)
    }
}

fn compile<'a>(patterns: impl Iterator<Item = &'a str>) -> Result<Vec<Pattern>, ScanError> {
    patterns
        .map(|p| {
            Pattern::new(p).map_err(|source| ScanError::Pattern {
                pattern: p.to_owned(),
                source,
            })
        })
        .collect()
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

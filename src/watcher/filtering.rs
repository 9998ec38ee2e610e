//! Which changed paths the watcher passes on for re-indexing

use crate::error::{CodemapError, Result};
use crate::indexer::discovery::{PathFilter, rel_path_string};
use codemap_extractors::detect_language_from_path;
use std::path::{Path, PathBuf};

/// Editor and tool droppings that never reach the debouncer
const WATCH_IGNORE_PATTERNS: &[&str] = &[
    "**/.codemap/**",
    "**/*.swp",
    "**/*.swx",
    "**/*~",
    "**/.#*",
    "**/*.tmp",
];

pub fn build_ignore_patterns() -> Result<Vec<glob::Pattern>> {
    WATCH_IGNORE_PATTERNS
        .iter()
        .map(|p| {
            glob::Pattern::new(p)
                .map_err(|e| CodemapError::Config(format!("Invalid glob pattern {}: {}", p, e)))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct WatchFilter {
    root: PathBuf,
    paths: PathFilter,
    languages: Vec<String>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl WatchFilter {
    pub fn new(root: &Path, paths: PathFilter, languages: Vec<String>) -> Result<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            paths,
            languages,
            ignore_patterns: build_ignore_patterns()?,
        })
    }

    /// Whether a change at `path` can affect the index
    ///
    /// Existence is not checked so deletions pass through.
    pub fn should_process(&self, path: &Path) -> bool {
        let Some(rel_path) = rel_path_string(&self.root, path) else {
            return false;
        };

        let Some(language) = detect_language_from_path(path) else {
            return false;
        };
        if !self.languages.is_empty() && !self.languages.iter().any(|l| l == language) {
            return false;
        }

        if self.ignore_patterns.iter().any(|p| p.matches(&rel_path)) {
            return false;
        }
        self.paths.accepts_file(&rel_path)
    }
}

//! Candidate file enumeration

use crate::config::CodemapConfig;
use crate::error::{CodemapError, Result};
use crate::store::CODEMAP_DIR;
use codemap_extractors::ExtractorRegistry;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Compiled include/exclude patterns, matched against root-relative paths
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl PathFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: build_globset(include)?,
            exclude: build_globset(exclude)?,
        })
    }

    pub fn from_config(config: &CodemapConfig) -> Result<Self> {
        Self::new(&config.include, &config.exclude)
    }

    /// Whether `rel_path` (forward slashes) is an indexable file path
    pub fn accepts_file(&self, rel_path: &str) -> bool {
        if in_codemap_dir(rel_path) || self.exclude.is_match(rel_path) {
            return false;
        }
        self.include.is_empty() || self.include.is_match(rel_path)
    }

    /// Whether a whole directory can be skipped
    pub fn rejects_dir(&self, rel_dir: &str) -> bool {
        if in_codemap_dir(rel_dir) {
            return true;
        }
        // `**/x/**` patterns only match paths below the directory
        self.exclude.is_match(rel_dir) || self.exclude.is_match(format!("{}/_", rel_dir))
    }
}

fn in_codemap_dir(rel_path: &str) -> bool {
    rel_path == CODEMAP_DIR || rel_path.starts_with(&format!("{}/", CODEMAP_DIR))
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| CodemapError::Config(format!("Invalid glob pattern {}: {}", pattern, e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| CodemapError::Config(format!("Failed to build glob set: {}", e)))
}

/// Root-relative, forward-slash form of `path`
pub fn rel_path_string(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Files under `root` that pass the filter and have a registered extractor, sorted
pub fn discover_files(
    root: &Path,
    filter: &PathFilter,
    registry: &ExtractorRegistry,
) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            rel_path_string(root, entry.path())
                .map(|rel| !filter.rejects_dir(&rel))
                .unwrap_or(true)
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| registry.language_for_path(entry.path()).is_some())
        .filter(|entry| {
            rel_path_string(root, entry.path())
                .map(|rel| filter.accepts_file(&rel))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!("Discovered {} candidate files under {}", files.len(), root.display());
    files
}

//! Persisted index records
//!
//! These structs are the on-disk JSON schema. Maps are `BTreeMap`/`BTreeSet` so
//! the written files have a stable key order.

use chrono::{DateTime, Utc};
use codemap_extractors::{Symbol, count_symbols};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const SCHEMA_VERSION: &str = "1.0";

fn schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Indexed state of one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub hash: String,
    pub indexed_at: DateTime<Utc>,
    pub language: String,
    pub lines: usize,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl FileEntry {
    pub fn symbol_count(&self) -> usize {
        count_symbols(&self.symbols)
    }
}

/// All entries for files whose parent directory is `directory` ("" = root)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryShard {
    #[serde(default = "schema_version")]
    pub version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub files: BTreeMap<String, FileEntry>,
}

impl DirectoryShard {
    pub fn new(directory: &str) -> Self {
        Self {
            version: schema_version(),
            generated_at: Utc::now(),
            directory: directory.to_string(),
            files: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Configuration as recorded in the manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSnapshot {
    pub languages: Vec<String>,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexStats {
    pub total_files: usize,
    pub total_symbols: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_full_index: Option<DateTime<Utc>>,
}

/// Per-language and per-kind totals, computed on demand for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexBreakdown {
    pub files_by_language: BTreeMap<String, usize>,
    /// Nested symbols included
    pub symbols_by_kind: BTreeMap<String, usize>,
}

impl IndexBreakdown {
    /// Kinds ordered by count, most common first; ties by name
    pub fn kinds_by_count(&self) -> Vec<(&str, usize)> {
        let mut kinds: Vec<(&str, usize)> = self
            .symbols_by_kind
            .iter()
            .map(|(kind, count)| (kind.as_str(), *count))
            .collect();
        kinds.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        kinds
    }
}

/// Root manifest: the only place that says which shards exist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    #[serde(default = "schema_version")]
    pub version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub config: ConfigSnapshot,
    #[serde(default)]
    pub stats: IndexStats,
    #[serde(default)]
    pub directories: BTreeSet<String>,
}

impl RootManifest {
    pub fn new(root: &str) -> Self {
        Self {
            version: schema_version(),
            generated_at: Utc::now(),
            root: root.to_string(),
            config: ConfigSnapshot::default(),
            stats: IndexStats::default(),
            directories: BTreeSet::new(),
        }
    }
}

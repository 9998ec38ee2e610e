//! Sharded, incremental index store
//!
//! The index lives under `<root>/.codemap/`. The root manifest lists every
//! directory that has indexed files; each such directory has its own shard
//! file holding the entries for the files directly inside it. Shards are
//! loaded on first access, cached for the life of the store, and written back
//! only when mutated.

pub mod paths;
pub mod search;
pub mod types;

use crate::error::{CodemapError, Result};
use chrono::Utc;
use codemap_extractors::{LineRange, Symbol, SymbolKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub use paths::{CODEMAP_DIR, MAP_FILE, ROOT_SHARD_FILE};
pub use search::SymbolMatch;
pub use types::{
    ConfigSnapshot, DirectoryShard, FileEntry, IndexBreakdown, IndexStats, RootManifest,
};

pub struct IndexStore {
    root: PathBuf,
    codemap_dir: PathBuf,
    manifest: RootManifest,
    shards: HashMap<String, DirectoryShard>,
    dirty: HashSet<String>,
}

impl IndexStore {
    /// Store for `root`, reusing an existing manifest when one is present
    pub fn open(root: &Path) -> Self {
        let codemap_dir = root.join(CODEMAP_DIR);
        let manifest_file = paths::manifest_path(&codemap_dir);
        let manifest = if manifest_file.exists() {
            read_json_or_default(&manifest_file, || {
                RootManifest::new(&root.to_string_lossy())
            })
        } else {
            RootManifest::new(&root.to_string_lossy())
        };

        Self {
            root: root.to_path_buf(),
            codemap_dir,
            manifest,
            shards: HashMap::new(),
            dirty: HashSet::new(),
        }
    }

    /// Store for an existing index; `NotFound` when `root` was never indexed
    pub fn load(root: &Path) -> Result<Self> {
        let manifest_file = paths::manifest_path(&root.join(CODEMAP_DIR));
        if !manifest_file.exists() {
            return Err(CodemapError::NotFound(root.join(CODEMAP_DIR)));
        }
        Ok(Self::open(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &RootManifest {
        &self.manifest
    }

    pub fn directories(&self) -> &BTreeSet<String> {
        &self.manifest.directories
    }

    pub fn stats(&self) -> &IndexStats {
        &self.manifest.stats
    }

    pub fn set_metadata(&mut self, root: &str, config: ConfigSnapshot) {
        self.manifest.root = root.to_string();
        self.manifest.config = config;
    }

    /// Upserts the entry for `path`, creating its shard if needed
    ///
    /// Keys that would resolve outside the root are rejected with `InvalidQuery`.
    pub fn put(
        &mut self,
        path: &str,
        hash: &str,
        language: &str,
        lines: usize,
        symbols: Vec<Symbol>,
    ) -> Result<()> {
        if path.starts_with(['/', '\\']) || !paths::is_contained(&paths::normalize_rel_path(path)) {
            return Err(CodemapError::InvalidQuery(format!(
                "{} is not a path inside the project",
                path
            )));
        }
        let (directory, file_name) = paths::split_rel_path(path);
        let entry = FileEntry {
            hash: hash.to_string(),
            indexed_at: Utc::now(),
            language: language.to_string(),
            lines,
            symbols,
        };

        self.shard_mut(&directory).files.insert(file_name, entry);
        self.manifest.directories.insert(directory.clone());
        self.dirty.insert(directory);
        Ok(())
    }

    /// Drops the entry for `path`; an emptied shard is deleted from disk
    pub fn remove(&mut self, path: &str) -> bool {
        let (directory, file_name) = paths::split_rel_path(path);
        if !self.manifest.directories.contains(&directory) {
            return false;
        }

        let shard = self.shard_mut(&directory);
        if shard.files.remove(&file_name).is_none() {
            return false;
        }

        if shard.is_empty() {
            self.shards.remove(&directory);
            self.dirty.remove(&directory);
            self.manifest.directories.remove(&directory);
            self.delete_shard_file(&directory);
        } else {
            self.dirty.insert(directory);
        }
        true
    }

    pub fn get(&mut self, path: &str) -> Option<&FileEntry> {
        let (directory, file_name) = paths::split_rel_path(path);
        if !self.manifest.directories.contains(&directory) {
            return None;
        }
        self.shard_mut(&directory).files.get(&file_name)
    }

    pub fn get_hash(&mut self, path: &str) -> Option<String> {
        self.get(path).map(|entry| entry.hash.clone())
    }

    /// Every indexed file, in manifest directory order then file name order
    pub fn all_entries(&mut self) -> impl Iterator<Item = (String, &FileEntry)> + '_ {
        self.load_all();
        let shards = &self.shards;
        self.manifest
            .directories
            .iter()
            .filter_map(move |dir| shards.get(dir).map(|shard| (dir, shard)))
            .flat_map(|(dir, shard)| {
                shard
                    .files
                    .iter()
                    .map(move |(name, entry)| (paths::join_rel_path(dir, name), entry))
            })
    }

    pub fn find_symbol(&mut self, query: &str, kind: Option<&SymbolKind>) -> Vec<SymbolMatch> {
        let query_lower = query.to_lowercase();
        let mut results = Vec::new();
        for (path, entry) in self.all_entries() {
            search::search_symbols(&path, &entry.symbols, &query_lower, kind, &mut results);
        }
        results
    }

    /// Flattened symbols of `path` overlapping `range`, outermost first
    pub fn symbols_in_range(&mut self, path: &str, range: &LineRange) -> Option<Vec<SymbolMatch>> {
        let key = paths::normalize_rel_path(path);
        let entry = self.get(&key)?;
        let mut results = Vec::new();
        search::symbols_overlapping(&key, &entry.symbols, range, &mut results);
        Some(results)
    }

    pub fn breakdown(&mut self) -> IndexBreakdown {
        fn count_kinds(symbols: &[Symbol], counts: &mut BTreeMap<String, usize>) {
            for symbol in symbols {
                *counts.entry(symbol.kind.as_str().to_string()).or_default() += 1;
                count_kinds(&symbol.children, counts);
            }
        }

        self.all_entries()
            .fold(IndexBreakdown::default(), |mut acc, (_, entry)| {
                *acc.files_by_language.entry(entry.language.clone()).or_default() += 1;
                count_kinds(&entry.symbols, &mut acc.symbols_by_kind);
                acc
            })
    }

    pub fn recompute_stats(&mut self) {
        let (total_files, total_symbols) = self
            .all_entries()
            .fold((0, 0), |(files, symbols), (_, entry)| {
                (files + 1, symbols + entry.symbol_count())
            });

        self.manifest.stats = IndexStats {
            total_files,
            total_symbols,
            last_full_index: Some(Utc::now()),
        };
    }

    /// Writes mutated shards and the manifest
    pub fn persist(&mut self) -> Result<()> {
        fs::create_dir_all(&self.codemap_dir)?;

        let mut written = 0;
        let dirty: Vec<String> = self.dirty.iter().cloned().collect();
        for directory in dirty {
            if let Some(shard) = self.shards.get_mut(&directory).filter(|s| !s.is_empty()) {
                shard.generated_at = Utc::now();
                write_json_atomic(&paths::shard_path(&self.codemap_dir, &directory), shard)?;
                written += 1;
            }
            self.dirty.remove(&directory);
        }

        self.manifest.generated_at = Utc::now();
        write_json_atomic(&paths::manifest_path(&self.codemap_dir), &self.manifest)?;
        debug!("Persisted {} shards and manifest to {}", written, self.codemap_dir.display());
        Ok(())
    }

    /// Deletes all persisted state and resets the caches
    pub fn clear(&mut self) -> Result<()> {
        if self.codemap_dir.exists() {
            fs::remove_dir_all(&self.codemap_dir)?;
        }
        self.shards.clear();
        self.dirty.clear();
        self.manifest = RootManifest::new(&self.root.to_string_lossy());
        Ok(())
    }

    fn shard_mut(&mut self, directory: &str) -> &mut DirectoryShard {
        let codemap_dir = &self.codemap_dir;
        let listed = self.manifest.directories.contains(directory);
        self.shards
            .entry(directory.to_string())
            .or_insert_with(|| read_shard(codemap_dir, directory, listed))
    }

    fn load_all(&mut self) {
        let directories: Vec<String> = self.manifest.directories.iter().cloned().collect();
        for directory in directories {
            self.shard_mut(&directory);
        }
    }

    fn delete_shard_file(&self, directory: &str) {
        let path = paths::shard_path(&self.codemap_dir, directory);
        match fs::remove_file(&path) {
            Ok(()) => debug!("Deleted empty shard {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to delete shard {}: {}", path.display(), e),
        }
        if directory.is_empty() {
            return;
        }

        // Best effort: stops at the first directory that still has content
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir == self.codemap_dir || !dir.starts_with(&self.codemap_dir) {
                break;
            }
            if fs::remove_dir(dir).is_err() {
                break;
            }
            current = dir.parent();
        }
    }
}

fn read_shard(codemap_dir: &Path, directory: &str, listed: bool) -> DirectoryShard {
    let path = paths::shard_path(codemap_dir, directory);
    if !listed || !path.exists() {
        return DirectoryShard::new(directory);
    }
    read_json_or_default(&path, || DirectoryShard::new(directory))
}

/// Parses a persisted JSON file; unreadable or malformed data yields `fallback`
fn read_json_or_default<T, F>(path: &Path, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match read_json(path) {
        Ok(value) => value,
        Err(e) => {
            warn!("{}; treating as empty", e);
            fallback()
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CodemapError::CorruptPersisted {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Writes through a sibling temp file and a rename
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

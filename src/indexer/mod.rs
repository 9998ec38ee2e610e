//! Indexing orchestrator
//!
//! Wires discovery, extraction, fingerprinting and the store together. All
//! index mutations go through one `Indexer` on one thread; the watcher only
//! calls in from its debounce callback.

pub mod discovery;

use crate::config::CodemapConfig;
use crate::error::{CodemapError, Result};
use crate::fingerprint::{fingerprint_bytes, fingerprint_file};
use crate::store::paths::relative_to_root;
use crate::store::{IndexStore, SymbolMatch};
use codemap_extractors::{ExtractError, ExtractorRegistry, LineRange, Symbol, SymbolKind, count_symbols};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use discovery::{PathFilter, discover_files};

/// Failures shown per batch before collapsing into a count
pub const ERROR_PREVIEW_LIMIT: usize = 5;

/// Result of a full index run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexReport {
    pub files_indexed: usize,
    pub symbols_indexed: usize,
    /// (path, message) for unreadable files and files whose syntax was rejected
    pub errors: Vec<(String, String)>,
}

/// What a single-file update did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The file no longer exists on disk
    Removed { was_indexed: bool },
    Indexed {
        symbols: usize,
        symbols_changed: usize,
        /// Set when the grammar rejected the file and it was stored without symbols
        syntax_warning: Option<String>,
    },
    /// No enabled extractor handles this file type
    Skipped,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReport {
    pub updated: usize,
    pub errors: Vec<(String, String)>,
}

/// Bounded rendering of a batch's failures
pub struct ErrorPreview<'a> {
    errors: &'a [(String, String)],
    limit: usize,
}

impl<'a> ErrorPreview<'a> {
    pub fn new(errors: &'a [(String, String)]) -> Self {
        Self {
            errors,
            limit: ERROR_PREVIEW_LIMIT,
        }
    }
}

impl fmt::Display for ErrorPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, message) in self.errors.iter().take(self.limit) {
            writeln!(f, "  {}: {}", path, message)?;
        }
        if self.errors.len() > self.limit {
            writeln!(f, "  ... and {} more", self.errors.len() - self.limit)?;
        }
        Ok(())
    }
}

/// One file, read and parsed, ready for the store
struct AnalyzedFile {
    rel_path: String,
    language: &'static str,
    hash: String,
    lines: usize,
    symbols: Vec<Symbol>,
    syntax_warning: Option<String>,
}

pub struct Indexer {
    root: PathBuf,
    config: CodemapConfig,
    filter: PathFilter,
    registry: ExtractorRegistry,
    store: IndexStore,
}

impl Indexer {
    pub fn new(root: &Path, config: CodemapConfig) -> Result<Self> {
        let root = root.canonicalize()?;
        let filter = PathFilter::from_config(&config)?;
        let registry = ExtractorRegistry::with_languages(&config.languages);
        let store = IndexStore::open(&root);

        debug!(
            "Indexer for {} with languages: {:?}",
            root.display(),
            registry.languages()
        );

        Ok(Self {
            root,
            config,
            filter,
            registry,
            store,
        })
    }

    /// Indexer over an existing index; `NotFound` when there is none
    pub fn load_existing(root: &Path) -> Result<Self> {
        let root = root.canonicalize()?;
        let store = IndexStore::load(&root)?;
        let mut indexer = Self::new(&root, CodemapConfig::load(&root))?;
        indexer.store = store;
        Ok(indexer)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &CodemapConfig {
        &self.config
    }

    pub fn set_debounce_ms(&mut self, debounce_ms: u64) {
        self.config.debounce_ms = debounce_ms;
    }

    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut IndexStore {
        &mut self.store
    }

    /// Rebuilds the whole index from scratch
    pub fn index_all(&mut self) -> Result<IndexReport> {
        self.store.clear()?;
        self.store
            .set_metadata(&self.root.to_string_lossy(), self.config.snapshot());

        let files = discover_files(&self.root, &self.filter, &self.registry);
        info!("Indexing {} files under {}", files.len(), self.root.display());

        let this = &*self;
        let analyzed: Vec<(PathBuf, Result<Option<AnalyzedFile>>)> = files
            .par_iter()
            .map(|path| (path.clone(), this.analyze(path)))
            .collect();

        let mut report = IndexReport::default();
        for (path, result) in analyzed {
            match result {
                Ok(Some(file)) => {
                    let rel_path = file.rel_path.clone();
                    let warning = file.syntax_warning.clone();
                    let symbols = count_symbols(&file.symbols);
                    if let Err(e) = self.store_file(file) {
                        report.errors.push((rel_path, e.to_string()));
                        continue;
                    }
                    if let Some(warning) = warning {
                        report.errors.push((rel_path, warning));
                    }
                    report.files_indexed += 1;
                    report.symbols_indexed += symbols;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Failed to index {}: {}", path.display(), e);
                    report.errors.push((self.display_path(&path), e.to_string()));
                }
            }
        }

        self.store.recompute_stats();
        self.store.persist()?;

        info!(
            "Indexed {} files, {} symbols, {} errors",
            report.files_indexed,
            report.symbols_indexed,
            report.errors.len()
        );
        Ok(report)
    }

    /// Re-indexes one file, or drops it when it no longer exists
    pub fn update(&mut self, path: &Path) -> Result<UpdateOutcome> {
        let outcome = self.apply_update(path)?;
        if outcome != UpdateOutcome::Skipped {
            self.store.recompute_stats();
            self.store.persist()?;
        }
        Ok(outcome)
    }

    pub fn remove(&mut self, path: &Path) -> Result<bool> {
        let rel_path = self.rel_path(path)?;
        let removed = self.store.remove(&rel_path);
        if removed {
            self.store.recompute_stats();
            self.store.persist()?;
        }
        Ok(removed)
    }

    /// Indexed, present on disk, and unchanged since it was indexed
    pub fn validate(&mut self, path: &Path) -> bool {
        let Ok(rel_path) = self.rel_path(path) else {
            return false;
        };
        let Some(stored) = self.store.get_hash(&rel_path) else {
            return false;
        };
        fingerprint_file(self.root.join(&rel_path))
            .map(|current| current == stored)
            .unwrap_or(false)
    }

    /// Indexed paths whose file is gone, unreadable, or changed
    pub fn validate_all(&mut self) -> Vec<String> {
        let indexed: Vec<(String, String)> = self
            .store
            .all_entries()
            .map(|(path, entry)| (path, entry.hash.clone()))
            .collect();

        indexed
            .into_iter()
            .filter(|(rel_path, hash)| match fingerprint_file(self.root.join(rel_path)) {
                Ok(current) => current != *hash,
                Err(_) => true,
            })
            .map(|(rel_path, _)| rel_path)
            .collect()
    }

    pub fn update_all_stale(&mut self) -> Result<UpdateReport> {
        let stale = self.validate_all();
        let mut report = UpdateReport::default();

        for rel_path in stale {
            let path = self.root.join(&rel_path);
            match self.apply_update(&path) {
                Ok(_) => report.updated += 1,
                Err(e) => {
                    warn!("Failed to update {}: {}", rel_path, e);
                    report.errors.push((rel_path, e.to_string()));
                }
            }
        }

        if report.updated > 0 {
            self.store.recompute_stats();
            self.store.persist()?;
        }
        info!(
            "Updated {} stale files, {} errors",
            report.updated,
            report.errors.len()
        );
        Ok(report)
    }

    pub fn find_symbol(&mut self, query: &str, kind: Option<&SymbolKind>) -> Vec<SymbolMatch> {
        self.store.find_symbol(query, kind)
    }

    /// Symbols of `path` overlapping `range`; `None` when the file is not indexed
    pub fn symbols_in_range(&mut self, path: &Path, range: &LineRange) -> Result<Option<Vec<SymbolMatch>>> {
        let rel_path = self.rel_path(path)?;
        Ok(self.store.symbols_in_range(&rel_path, range))
    }

    /// Index key for `path`; relative paths are taken relative to the root,
    /// never the working directory
    pub fn rel_path(&self, path: &Path) -> Result<String> {
        let key = if path.is_absolute() {
            // The root is canonical; the caller may reach it through a symlink
            relative_to_root(&self.root, path).or_else(|| {
                let canonical = canonicalize_lenient(path)?;
                relative_to_root(&self.root, &canonical)
            })
        } else {
            relative_to_root(&self.root, &self.root.join(path))
        };
        key.ok_or_else(|| {
            CodemapError::InvalidQuery(format!(
                "{} is not inside {}",
                path.display(),
                self.root.display()
            ))
        })
    }

    fn apply_update(&mut self, path: &Path) -> Result<UpdateOutcome> {
        let rel_path = self.rel_path(path)?;
        let absolute = self.root.join(&rel_path);

        if !absolute.exists() {
            let was_indexed = self.store.remove(&rel_path);
            debug!("{} is gone, removed from index: {}", rel_path, was_indexed);
            return Ok(UpdateOutcome::Removed { was_indexed });
        }

        let previous = self
            .store
            .get(&rel_path)
            .map(|entry| entry.symbol_count())
            .unwrap_or(0);

        let Some(file) = self.analyze(&absolute)? else {
            return Ok(UpdateOutcome::Skipped);
        };
        let symbols = count_symbols(&file.symbols);
        let syntax_warning = file.syntax_warning.clone();
        self.store_file(file)?;

        Ok(UpdateOutcome::Indexed {
            symbols,
            symbols_changed: symbols.abs_diff(previous),
            syntax_warning,
        })
    }

    /// Reads, fingerprints and parses one file; `None` when no extractor applies
    fn analyze(&self, path: &Path) -> Result<Option<AnalyzedFile>> {
        let Some(language) = self.registry.language_for_path(path) else {
            return Ok(None);
        };
        let rel_path = self.rel_path(path)?;

        let bytes = std::fs::read(path)?;
        let hash = fingerprint_bytes(&bytes);
        let content = String::from_utf8_lossy(&bytes);
        let lines = content.lines().count();

        let extracted = self
            .registry
            .extract_symbols(language, &rel_path, &content);
        let (mut symbols, syntax_warning) = match extracted {
            Ok(symbols) => (symbols, None),
            Err(ExtractError::Syntax { message, .. }) => {
                warn!("Syntax error in {}: {}", rel_path, message);
                (Vec::new(), Some(message))
            }
            Err(e) => return Err(e.into()),
        };

        for symbol in &mut symbols {
            symbol.limit_docstrings(self.config.max_docstring_length);
        }

        Ok(Some(AnalyzedFile {
            rel_path,
            language,
            hash,
            lines,
            symbols,
            syntax_warning,
        }))
    }

    fn store_file(&mut self, file: AnalyzedFile) -> Result<()> {
        self.store.put(
            &file.rel_path,
            &file.hash,
            file.language,
            file.lines,
            file.symbols,
        )
    }

    fn display_path(&self, path: &Path) -> String {
        self.rel_path(path)
            .unwrap_or_else(|_| path.display().to_string())
    }
}

/// Canonical form of `path`, or of its parent when the file itself is gone
fn canonicalize_lenient(path: &Path) -> Option<PathBuf> {
    path.canonicalize().ok().or_else(|| {
        let parent = path.parent()?.canonicalize().ok()?;
        Some(parent.join(path.file_name()?))
    })
}

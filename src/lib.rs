// CodeMap - structural symbol index library
//!
//! Extracts a symbol tree (types, functions, sections) with line ranges from
//! every source file and keeps it in a sharded JSON index under `.codemap/`,
//! so tools can ask "what is at file X, lines A-B" without reading the file.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod indexer;
pub mod query;
pub mod store;
pub mod watcher;

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use codemap_extractors::{LineRange, Symbol, SymbolKind};
pub use config::CodemapConfig;
pub use error::{CodemapError, Result};
pub use indexer::{IndexReport, Indexer, UpdateOutcome, UpdateReport};
pub use store::{FileEntry, IndexStore, SymbolMatch};
pub use watcher::WatchSession;

//! Codemap's language extractors
//!
//! Turns source files into uniform symbol trees. Tree-sitter languages are
//! described declaratively (a node-type → rule table plus a few override
//! handlers) and interpreted by one generic engine.
//!
//! # Usage
//!
//! ```rust,ignore
//! use codemap_extractors::ExtractorRegistry;
//!
//! let registry = ExtractorRegistry::new();
//! let symbols = registry.extract_symbols("python", "app/models.py", content)?;
//! ```

// Core infrastructure
pub mod base;
pub mod engine;
pub mod language;
pub mod languages;
pub mod manager;
pub mod rules;

pub use base::{
    ExtractError, LineRange, MAX_DOCSTRING_LEN, MAX_SIGNATURE_LEN, Symbol, SymbolKind,
    count_symbols,
};
pub use engine::{SymbolExtractor, TreeSitterExtractor, TreeWalker};
pub use language::{SUPPORTED_LANGUAGES, detect_language_from_extension, detect_language_from_path};
pub use manager::ExtractorRegistry;
pub use rules::{DocStrategy, LanguageSpec, NodeRule};

// Tests module (only compiled during testing)
#[cfg(test)]
pub mod tests;

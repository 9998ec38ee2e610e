//! Extractor registry
//!
//! Built once at startup. Maps a language tag to its extractor, limited to
//! the languages the project has enabled.

use crate::base::{ExtractError, Symbol};
use crate::engine::SymbolExtractor;
use crate::language::detect_language_from_path;
use crate::languages::all_extractors;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub struct ExtractorRegistry {
    extractors: HashMap<&'static str, Box<dyn SymbolExtractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorRegistry {
    /// Registry with every shipped language
    pub fn new() -> Self {
        let extractors = all_extractors()
            .into_iter()
            .map(|e| (e.language(), e))
            .collect();
        Self { extractors }
    }

    /// Registry limited to `enabled`; an empty list enables everything
    pub fn with_languages<S: AsRef<str>>(enabled: &[S]) -> Self {
        if enabled.is_empty() {
            return Self::new();
        }
        let extractors = all_extractors()
            .into_iter()
            .filter(|e| enabled.iter().any(|l| l.as_ref() == e.language()))
            .map(|e| (e.language(), e))
            .collect();
        Self { extractors }
    }

    pub fn get(&self, language: &str) -> Option<&dyn SymbolExtractor> {
        self.extractors.get(language).map(|e| e.as_ref())
    }

    /// Language tag for `path` if its extractor is registered
    pub fn language_for_path(&self, path: &Path) -> Option<&'static str> {
        detect_language_from_path(path).filter(|lang| self.extractors.contains_key(lang))
    }

    pub fn languages(&self) -> Vec<&'static str> {
        let mut languages: Vec<_> = self.extractors.keys().copied().collect();
        languages.sort_unstable();
        languages
    }

    /// Extracts with the extractor for `language`; unknown languages yield nothing
    pub fn extract_symbols(
        &self,
        language: &str,
        file_path: &str,
        content: &str,
    ) -> Result<Vec<Symbol>, ExtractError> {
        let Some(extractor) = self.get(language) else {
            return Ok(Vec::new());
        };
        let symbols = extractor.extract(content, file_path)?;
        debug!(
            "Extracted {} symbols from {} file: {}",
            symbols.len(),
            language,
            file_path
        );
        Ok(symbols)
    }
}

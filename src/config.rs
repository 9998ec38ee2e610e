//! Project configuration (`.codemap.toml` at the project root)

use crate::error::{CodemapError, Result};
use crate::store::ConfigSnapshot;
use codemap_extractors::{MAX_DOCSTRING_LEN, SUPPORTED_LANGUAGES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = ".codemap.toml";

const DEFAULT_INCLUDE_PATTERNS: &[&str] = &[
    "**/*.py",
    "**/*.pyi",
    "**/*.ts",
    "**/*.tsx",
    "**/*.js",
    "**/*.jsx",
    "**/*.mjs",
    "**/*.rs",
    "**/*.go",
    "**/*.java",
    "**/*.kt",
    "**/*.kts",
    "**/*.swift",
    "**/*.c",
    "**/*.h",
    "**/*.cpp",
    "**/*.hpp",
    "**/*.cc",
    "**/*.hh",
    "**/*.cxx",
    "**/*.hxx",
    "**/*.cs",
    "**/*.php",
    "**/*.css",
    "**/*.html",
    "**/*.htm",
    "**/*.sql",
    "**/*.md",
    "**/*.yaml",
    "**/*.yml",
];

const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "**/node_modules/**",
    "**/__pycache__/**",
    "**/venv/**",
    "**/.venv/**",
    "**/dist/**",
    "**/build/**",
    "**/target/**",
    "**/*.min.js",
    "**/migrations/**",
    "**/.git/**",
    "**/.tox/**",
    "**/.eggs/**",
    "**/*.egg-info/**",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodemapConfig {
    /// Enabled language tags
    pub languages: Vec<String>,
    /// Root-relative glob patterns a file must match to be indexed
    pub include: Vec<String>,
    /// Root-relative glob patterns that exclude files and whole directories
    pub exclude: Vec<String>,
    pub max_docstring_length: usize,
    /// Quiet period before the watcher re-indexes a changed file
    pub debounce_ms: u64,
}

impl Default for CodemapConfig {
    fn default() -> Self {
        Self {
            languages: SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            include: DEFAULT_INCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            max_docstring_length: MAX_DOCSTRING_LEN,
            debounce_ms: 500,
        }
    }
}

impl CodemapConfig {
    /// Reads `<root>/.codemap.toml`, falling back to defaults
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
            return Self::default();
        }

        let parsed = fs::read_to_string(&config_path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str::<Self>(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(config) => {
                debug!("Loaded configuration from: {}", config_path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Failed to parse {}, using defaults: {}",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let config_path = root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)
            .map_err(|e| CodemapError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        debug!("Saved configuration to: {}", config_path.display());
        Ok(())
    }

    /// Adds exclude patterns on top of the configured ones
    pub fn with_extra_excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Form recorded in the manifest
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            languages: self.languages.clone(),
            include_patterns: self.include.clone(),
            exclude_patterns: self.exclude.clone(),
        }
    }
}

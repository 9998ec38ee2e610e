use codemap_extractors::ExtractError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodemapError {
    /// No index at the given root; recoverable by running `codemap init`
    #[error("No codemap found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Syntax error in {path}: {message}")]
    Syntax { path: String, message: String },

    #[error("Corrupt index data in {}: {message}", path.display())]
    CorruptPersisted { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

impl From<ExtractError> for CodemapError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Syntax { path, message } => CodemapError::Syntax { path, message },
            other => CodemapError::Syntax {
                path: String::new(),
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, CodemapError>;

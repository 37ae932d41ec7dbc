//! Error types for vocab-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using VocabError.
pub type Result<T> = std::result::Result<T, VocabError>;

/// Errors raised while loading, reviewing or writing vocabulary tables.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{resource} is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        resource: String,
        columns: Vec<String>,
    },

    #[error("{resource}: invalid {column} value at row {row}: {value}")]
    InvalidCounter {
        resource: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("unsupported spreadsheet format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("spreadsheet error in {}: {message}", .path.display())]
    Sheet { path: PathBuf, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("input closed")]
    InputClosed,
}

impl VocabError {
    pub(crate) fn sheet(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Sheet {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

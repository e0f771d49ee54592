//! Error types for data containers and cluster files.

use thiserror::Error;

/// Errors raised by grid construction and TSV import/export.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Grid size mismatch: expected {expected} cells, found {found}")]
    GridSizeMismatch { expected: usize, found: usize },

    #[error("Grid shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, DataError>;

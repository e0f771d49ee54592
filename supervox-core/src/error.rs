//! Error types for the supervoxel engine.

use supervox_data::DataError;
use thiserror::Error;

/// Precondition violations reported by the engine.
///
/// Numerical degeneracies inside the algorithm (empty regions, clusters losing all
/// their points, failed seed placement) are not errors and never surface here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("step() called before start()")]
    NotStarted,

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Frame dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Non-contiguous frame time: expected {expected}, found {found}")]
    NonContiguousTime { expected: i64, found: i64 },

    #[error("Invalid parameter {name}: {message}")]
    InvalidConfig {
        name: &'static str,
        message: &'static str,
    },

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, EngineError>;

//! Top-level errors of the command-line driver.

use supervox_core::EngineError;
use supervox_core::ingest::StreamError;
use supervox_data::DataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        source: serde_json::Error,
    },

    #[error("--color-image and --depth-image must be given together")]
    IncompleteImagePair,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Data(#[from] DataError),
}

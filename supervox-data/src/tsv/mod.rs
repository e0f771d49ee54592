//! Tab-separated cluster export
//!
//! One record per cluster, 15 fields:
//! `time id valid radius_px pixel.x pixel.y color.r color.g color.b
//! position.x position.y position.z normal.x normal.y normal.z`.
//! Floats use `%g`-style formatting with six significant digits.

mod format;
mod loader;
mod writer;

pub use loader::read_clusters_tsv;
pub use writer::{save_clusters_tsv, write_clusters_tsv};

/// Number of fields in one cluster record.
pub const FIELD_COUNT: usize = 15;

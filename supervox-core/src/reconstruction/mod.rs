//! Windowed spatio-temporal clustering and the streaming engine
//!
//! Clustering is Lloyd's algorithm with a color/space/time metric, run for a
//! fixed number of iterations over the frames around the active time on every
//! step.

pub mod clustering;
pub mod engine;

pub use clustering::{ClusterMetric, update_clusters};
pub use engine::ContinuousSupervoxels;

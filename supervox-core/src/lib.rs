//! Supervox Core Crate
//!
//! Online extraction of temporally coherent supervoxels from a live stream of
//! depth + color frames. Each incoming frame is turned into a target density,
//! seeded with blue-noise samples where existing coverage is missing, and then
//! refined together with its neighbours in a sliding time window.
//!
//! ## Modules
//!
//! - [`ingest`]: RGBD frame construction, normal estimation and frame sources
//! - [`density`]: target density of a frame and splatted density of clusters
//! - [`sampling`]: mipmap error-diffusion seed sampler
//! - [`scene`]: frames, per-pixel assignments and the rolling timeseries
//! - [`reconstruction`]: windowed clustering and the streaming engine
//! - [`evaluation`]: compression error of a segmented frame

pub mod config;
pub mod density;
pub mod error;
pub mod evaluation;
pub mod ingest;
pub mod reconstruction;
pub mod sampling;
pub mod scene;

pub use config::SupervoxelConfig;
pub use error::{EngineError, Result};
pub use reconstruction::ContinuousSupervoxels;
pub use supervox_data::{Cluster, DensityField, Grid, Point, RgbdData};

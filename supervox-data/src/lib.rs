//! Supervox Data Crate
//!
//! Value types shared by the supervoxel engine and its tooling: dense pixel grids,
//! RGBD samples, tracked clusters, the pinhole camera model and the cluster TSV format.
//! This crate carries no algorithmic policy; density estimation, sampling and
//! clustering live in `supervox-core`.

pub mod camera;
pub mod error;
pub mod grid;
pub mod tsv;
pub mod types;

pub use camera::CameraIntrinsics;
pub use error::{DataError, Result};
pub use grid::{DensityField, Grid, RgbdData};
pub use tsv::{read_clusters_tsv, save_clusters_tsv, write_clusters_tsv};
pub use types::{Cluster, Point};

//! Engine parameters.
//!
//! Every numeric constant of the pipeline lives here with its default. Partial
//! JSON documents deserialize on top of the defaults.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use supervox_data::CameraIntrinsics;

/// Physical supervoxel radius in meters.
pub const DEFAULT_CLUSTER_RADIUS: f32 = 0.025;
/// Temporal half-window in frames (5 frames is about 0.17 s at 30 Hz).
pub const DEFAULT_TIME_RADIUS: u32 = 5;
pub const DEFAULT_ITERATIONS: u32 = 5;
pub const DEFAULT_RADIUS_MULT: f32 = 1.7;
/// Radius growth per frame of time offset; 0.005 corresponds to 0.15 m/s at 30 Hz.
pub const DEFAULT_SPATIAL_TIME_INCREASE: f32 = 0.0;
pub const DEFAULT_DEPTH_MIN: u16 = 0;
pub const DEFAULT_DEPTH_MAX: u16 = 2000;

/// Tunable parameters of the supervoxel engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervoxelConfig {
    /// Pinhole intrinsics of the depth camera.
    pub camera: CameraIntrinsics,
    /// Physical supervoxel radius (meters).
    pub cluster_radius: f32,
    /// Temporal half-window `R_T` (frames).
    pub time_radius: u32,
    /// Refinement iterations per step.
    pub iterations: u32,
    /// Multiplier applied to the projected radius to form the search box.
    pub radius_mult: f32,
    /// Spatial radius growth per frame of time offset (meters).
    pub spatial_time_increase: f32,
    /// Smallest accepted raw depth (inclusive).
    pub depth_min: u16,
    /// Largest accepted raw depth (inclusive).
    pub depth_max: u16,
    /// Seed of the engine-owned jitter generator.
    pub seed: u64,
}

impl SupervoxelConfig {
    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |name, message| Err(EngineError::InvalidConfig { name, message });
        if !(self.camera.focal_px > 0.0) {
            return invalid("camera.focal_px", "must be positive");
        }
        if !(self.camera.depth_to_z > 0.0) {
            return invalid("camera.depth_to_z", "must be positive");
        }
        if !(self.cluster_radius > 0.0) {
            return invalid("cluster_radius", "must be positive");
        }
        if self.time_radius == 0 {
            return invalid("time_radius", "must be at least 1");
        }
        if self.iterations == 0 {
            return invalid("iterations", "must be at least 1");
        }
        if !(self.radius_mult > 0.0) {
            return invalid("radius_mult", "must be positive");
        }
        if !(self.spatial_time_increase >= 0.0) {
            return invalid("spatial_time_increase", "must be non-negative");
        }
        if self.depth_min > self.depth_max {
            return invalid("depth_min", "must not exceed depth_max");
        }
        Ok(())
    }

    /// Decay `λ = 1 - 1/(2·R_T + 1)` of the feedback density.
    pub fn density_decay(&self) -> f32 {
        1.0 - 1.0 / self.window_len() as f32
    }

    /// Number of frames kept in the timeseries, `2·R_T + 1`.
    pub fn window_len(&self) -> i64 {
        2 * self.time_radius as i64 + 1
    }

    /// Whether a raw depth sample yields a valid point.
    pub fn is_valid_depth(&self, depth: u16) -> bool {
        depth != 0 && self.depth_min <= depth && depth <= self.depth_max
    }
}

impl Default for SupervoxelConfig {
    fn default() -> Self {
        Self {
            camera: CameraIntrinsics::default(),
            cluster_radius: DEFAULT_CLUSTER_RADIUS,
            time_radius: DEFAULT_TIME_RADIUS,
            iterations: DEFAULT_ITERATIONS,
            radius_mult: DEFAULT_RADIUS_MULT,
            spatial_time_increase: DEFAULT_SPATIAL_TIME_INCREASE,
            depth_min: DEFAULT_DEPTH_MIN,
            depth_max: DEFAULT_DEPTH_MAX,
            seed: 0,
        }
    }
}

//! Core data types for RGBD samples and tracked supervoxels.
//!
//! These are plain values: the engine in `supervox-core` owns them inside frames
//! and decides when they change.

use glam::{Vec2, Vec3};

/// One pixel's 3D sample.
///
/// When `valid` is false every other field is meaningless and must not be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Whether the depth sample produced a usable 3D point.
    pub valid: bool,
    /// RGB color (0-1 range).
    pub color: Vec3,
    /// Camera-space position in meters.
    pub position: Vec3,
    /// Surface normal (unit length for valid points).
    pub normal: Vec3,
    /// Projected supervoxel radius in pixels at this point's depth.
    pub cluster_radius_px: f32,
}

impl Point {
    /// A sample with no depth return.
    pub const INVALID: Point = Point {
        valid: false,
        color: Vec3::ZERO,
        position: Vec3::ZERO,
        normal: Vec3::ZERO,
        cluster_radius_px: 0.0,
    };

    /// Create a valid point. The normal is left at zero until a normal estimator runs.
    pub fn new(color: Vec3, position: Vec3, cluster_radius_px: f32) -> Self {
        Self {
            valid: true,
            color,
            position,
            normal: Vec3::ZERO,
            cluster_radius_px,
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::INVALID
    }
}

/// A tracked supervoxel.
///
/// `id` and `time` are fixed when the owning frame is built. `valid` is a tombstone:
/// once cleared it can never be set again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    id: usize,
    time: i64,
    valid: bool,
    /// Projected center in pixel coordinates.
    pub pixel: Vec2,
    /// Mean RGB color (0-1 range).
    pub color: Vec3,
    /// Mean camera-space position in meters.
    pub position: Vec3,
    pub normal: Vec3,
    /// Target radius in pixels, inherited from the seed point.
    pub cluster_radius_px: f32,
}

impl Cluster {
    /// Create a valid cluster seeded at `pixel` from the sample found there.
    pub fn from_point(pixel: Vec2, point: &Point) -> Self {
        Self {
            id: 0,
            time: 0,
            valid: true,
            pixel,
            color: point.color,
            position: point.position,
            normal: point.normal,
            cluster_radius_px: point.cluster_radius_px,
        }
    }

    /// Rebuild a cluster from exported fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_record(
        id: usize,
        time: i64,
        valid: bool,
        pixel: Vec2,
        color: Vec3,
        position: Vec3,
        normal: Vec3,
        cluster_radius_px: f32,
    ) -> Self {
        Self {
            id,
            time,
            valid,
            pixel,
            color,
            position,
            normal,
            cluster_radius_px,
        }
    }

    /// Assign the frame-local id and creation time.
    pub fn with_identity(mut self, id: usize, time: i64) -> Self {
        self.id = id;
        self.time = time;
        self
    }

    /// Index of this cluster within the frame that created it.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Creation frame time.
    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Permanently mark the cluster invalid.
    pub fn tombstone(&mut self) {
        self.valid = false;
    }
}

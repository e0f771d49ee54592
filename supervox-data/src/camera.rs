//! Pinhole camera model for depth back-projection.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Intrinsics of the depth camera. Camera space looks down `+z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraIntrinsics {
    /// Scale from raw depth units to meters.
    pub depth_to_z: f32,
    /// Principal point x (pixels).
    pub center_x: f32,
    /// Principal point y (pixels).
    pub center_y: f32,
    /// Focal length (pixels).
    pub focal_px: f32,
}

impl CameraIntrinsics {
    pub fn new(depth_to_z: f32, center_x: f32, center_y: f32, focal_px: f32) -> Self {
        Self {
            depth_to_z,
            center_x,
            center_y,
            focal_px,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_y)
    }

    /// Depth in meters divided by the focal length.
    pub fn z_over_f(&self, depth: u16) -> f32 {
        self.depth_to_z * depth as f32 / self.focal_px
    }

    /// Back-project pixel `(x, y)` with raw depth `depth` into camera space.
    pub fn back_project(&self, x: usize, y: usize, depth: u16) -> Vec3 {
        self.z_over_f(depth)
            * Vec3::new(
                x as f32 - self.center_x,
                y as f32 - self.center_y,
                self.focal_px,
            )
    }

    /// Project a camera-space position onto the image plane.
    pub fn project(&self, p: Vec3) -> Vec2 {
        self.center() + self.focal_px * Vec2::new(p.x / p.z, p.y / p.z)
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self {
            depth_to_z: 0.001,
            center_x: 320.0,
            center_y: 240.0,
            focal_px: 528.0,
        }
    }
}

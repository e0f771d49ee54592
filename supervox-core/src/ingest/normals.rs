//! Surface normal estimation for RGBD samples.
//!
//! Only a camera-facing placeholder exists so far: real normals (from depth
//! gradients) are not computed. The density and clustering code reads normals
//! exclusively through [`Point::normal`](supervox_data::Point), so a real estimator
//! can be plugged into the engine without touching them.

use glam::Vec3;
use supervox_data::RgbdData;

/// Normal pointing from the surface towards the camera (camera looks down `+z`).
pub const CAMERA_FACING_NORMAL: Vec3 = Vec3::NEG_Z;

/// Fills in `normal` for every valid point of a frame.
pub trait NormalEstimator: Send {
    fn estimate(&self, rgbd: &mut RgbdData);
}

/// Placeholder estimator: every valid point faces the camera.
#[derive(Debug, Default, Clone, Copy)]
pub struct CameraFacingNormals;

impl NormalEstimator for CameraFacingNormals {
    fn estimate(&self, rgbd: &mut RgbdData) {
        for point in rgbd.iter_mut().filter(|p| p.valid) {
            point.normal = CAMERA_FACING_NORMAL;
        }
    }
}

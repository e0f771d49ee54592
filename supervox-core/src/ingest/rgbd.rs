//! RGBD sample construction from color and depth images.

use crate::config::SupervoxelConfig;
use crate::error::{EngineError, Result};
use crate::ingest::normals::NormalEstimator;
use glam::Vec3;
use image::{ImageBuffer, Luma, RgbImage};
use supervox_data::{Grid, Point, RgbdData};

/// 16-bit depth image; zero means "no return".
pub type DepthImage = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Build the per-pixel samples of one frame.
///
/// Fails if the color and depth images differ in size.
pub fn create_rgbd_data(
    color: &RgbImage,
    depth: &DepthImage,
    config: &SupervoxelConfig,
    normals: &dyn NormalEstimator,
) -> Result<RgbdData> {
    if color.dimensions() != depth.dimensions() {
        let (cw, ch) = color.dimensions();
        let (dw, dh) = depth.dimensions();
        return Err(EngineError::DimensionMismatch {
            expected: (cw as usize, ch as usize),
            found: (dw as usize, dh as usize),
        });
    }

    let camera = &config.camera;
    let (width, height) = color.dimensions();
    let mut rgbd = Grid::from_fn(width as usize, height as usize, |x, y| {
        let d = depth.get_pixel(x as u32, y as u32)[0];
        if !config.is_valid_depth(d) {
            return Point::INVALID;
        }
        let rgb = color.get_pixel(x as u32, y as u32);
        let color = Vec3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0;
        let position = camera.back_project(x, y, d);
        // A fixed physical radius shrinks on screen with distance.
        let cluster_radius_px = config.cluster_radius / camera.z_over_f(d);
        Point::new(color, position, cluster_radius_px)
    });
    normals.estimate(&mut rgbd);
    Ok(rgbd)
}

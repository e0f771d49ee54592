//! Density estimation
//!
//! A density field holds the expected number of supervoxels per pixel. The frame
//! density is what full coverage would need; the cluster density is what a set of
//! existing clusters already provides.

use glam::{Vec2, Vec3};
use std::f32::consts::PI;
use supervox_data::{Cluster, DensityField, Grid, RgbdData};
use tracing::trace;

/// Kernel support in units of `ρ^{-1/2}`: `φ(R) = 0.01·φ(0)`.
pub const KERNEL_RANGE: f32 = 1.21;

/// Reciprocal area of the disk one supervoxel of `radius_px` covers on screen,
/// foreshortened by the surface normal.
pub fn disk_density(radius_px: f32, normal: Vec3) -> f32 {
    1.0 / (radius_px * radius_px * PI * normal.z.abs())
}

/// Gaussian splat kernel with unit mass and bandwidth `ρ^{-1/2}`.
pub fn splat_kernel(rho: f32, d2: f32) -> f32 {
    rho * (-PI * rho * d2).exp()
}

/// Target density of a frame: `1 / (r² π |n_z|)` per valid pixel, zero elsewhere.
pub fn frame_density(rgbd: &RgbdData) -> DensityField {
    let mut density = Grid::filled(rgbd.width(), rgbd.height(), 0.0f32);
    for (cell, p) in density.iter_mut().zip(rgbd.iter()) {
        if p.valid {
            *cell = disk_density(p.cluster_radius_px, p.normal);
        }
    }
    density
}

/// Splat every valid cluster as a truncated Gaussian onto a `width × height` field.
pub fn cluster_density<'a>(
    width: usize,
    height: usize,
    clusters: impl IntoIterator<Item = &'a Cluster>,
) -> DensityField {
    let mut density = Grid::filled(width, height, 0.0f32);
    if density.is_empty() {
        return density;
    }
    let (max_x, max_y) = (width as i64 - 1, height as i64 - 1);
    let mut splatted = 0usize;
    for c in clusters.into_iter().filter(|c| c.is_valid()) {
        let rho = disk_density(c.cluster_radius_px, c.normal);
        let r = (KERNEL_RANGE / rho.sqrt()).ceil() as i64;
        let (sx, sy) = round_pixel(c.pixel);
        let (x1, x2) = ((sx - r).max(0), (sx + r).min(max_x));
        let (y1, y2) = ((sy - r).max(0), (sy + r).min(max_y));
        for y in y1..=y2 {
            for x in x1..=x2 {
                let d = Vec2::new(x as f32, y as f32) - c.pixel;
                density[(x as usize, y as usize)] += splat_kernel(rho, d.length_squared());
            }
        }
        splatted += 1;
    }
    trace!("Splatted {} clusters", splatted);
    density
}

/// Nearest integer pixel of a sub-pixel position.
pub(crate) fn round_pixel(p: Vec2) -> (i64, i64) {
    ((p.x + 0.5).floor() as i64, (p.y + 0.5).floor() as i64)
}

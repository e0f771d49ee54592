//! Compression error of a segmented frame
//!
//! Replacing every pixel by its supervoxel's mean loses some of the frame's
//! variation. Both routines report, separately for color and position, the
//! variance around the frame mean that survives the replacement relative to the
//! variance of the pixels themselves. A frame without valid pixels, or without
//! any variation, yields `NaN`.

use crate::scene::{Frame, Timeseries};
use glam::{DVec3, Vec2, Vec3};
use supervox_data::{Grid, RgbdData};
use tracing::trace;

/// Grid cells per `√n` along x and y for the reference downsampling.
const DOWNSAMPLE_ASPECT: (f64, f64) = (3.464, 2.598);

/// Per-pixel variance below which a frame counts as constant.
const MIN_VARIANCE: f64 = 1e-12;

#[derive(Debug, Default)]
struct ErrorSums {
    count: usize,
    cluster_color: f64,
    cluster_position: f64,
    pixel_color: f64,
    pixel_position: f64,
}

impl ErrorSums {
    fn add(&mut self, mean: &(DVec3, DVec3), center: (Vec3, Vec3), pixel: (Vec3, Vec3)) {
        self.count += 1;
        self.cluster_color += center.0.as_dvec3().distance_squared(mean.0);
        self.cluster_position += center.1.as_dvec3().distance_squared(mean.1);
        self.pixel_color += pixel.0.as_dvec3().distance_squared(mean.0);
        self.pixel_position += pixel.1.as_dvec3().distance_squared(mean.1);
    }

    fn ratio(&self) -> Vec2 {
        let floor = MIN_VARIANCE * self.count as f64;
        let ratio = |num: f64, den: f64| {
            if den > floor { (num / den) as f32 } else { f32::NAN }
        };
        Vec2::new(
            ratio(self.cluster_color, self.pixel_color),
            ratio(self.cluster_position, self.pixel_position),
        )
    }
}

/// Mean color and position of the valid pixels, `None` if there are none.
fn pixel_mean(rgbd: &RgbdData) -> Option<(DVec3, DVec3)> {
    let mut color = DVec3::ZERO;
    let mut position = DVec3::ZERO;
    let mut count = 0usize;
    for p in rgbd.iter().filter(|p| p.valid) {
        color += p.color.as_dvec3();
        position += p.position.as_dvec3();
        count += 1;
    }
    (count > 0).then(|| (color / count as f64, position / count as f64))
}

/// Compression error of `frame` under its current assignment.
///
/// Only pixels assigned to a cluster still retained in `series` contribute.
pub fn compression_error(frame: &Frame, series: &Timeseries) -> Vec2 {
    let rgbd = frame.rgbd();
    let Some(mean) = pixel_mean(rgbd) else {
        return Vec2::NAN;
    };
    let mut sums = ErrorSums::default();
    for (p, a) in rgbd.iter().zip(frame.assignment().iter()) {
        if !p.valid {
            continue;
        }
        let Some(c) = a.cluster.and_then(|r| series.cluster(r)) else {
            continue;
        };
        sums.add(&mean, (c.color, c.position), (p.color, p.position));
    }
    sums.ratio()
}

/// Compression error of a regular-grid downsampling with about as many cells as
/// `frame` has clusters.
pub fn downsample_compression_error(frame: &Frame) -> Vec2 {
    let rgbd = frame.rgbd();
    let Some(mean) = pixel_mean(rgbd) else {
        return Vec2::NAN;
    };
    let n = (frame.clusters().len() as f64).sqrt();
    let cells_x = (DOWNSAMPLE_ASPECT.0 * n + 0.5) as usize;
    let cells_y = (DOWNSAMPLE_ASPECT.1 * n + 0.5) as usize;
    if cells_x == 0 || cells_y == 0 {
        return Vec2::NAN;
    }
    trace!("Downsampling to {}x{} cells", cells_x, cells_y);

    let (width, height) = rgbd.dimensions();
    let cell_of = |x: usize, y: usize| (x * cells_x / width, y * cells_y / height);

    let mut cells = Grid::filled(cells_x, cells_y, (DVec3::ZERO, DVec3::ZERO, 0u32));
    for (x, y, p) in rgbd.enumerate() {
        if p.valid {
            let cell = &mut cells[cell_of(x, y)];
            cell.0 += p.color.as_dvec3();
            cell.1 += p.position.as_dvec3();
            cell.2 += 1;
        }
    }
    for cell in cells.iter_mut().filter(|c| c.2 > 0) {
        cell.0 /= cell.2 as f64;
        cell.1 /= cell.2 as f64;
    }

    let mut sums = ErrorSums::default();
    for (x, y, p) in rgbd.enumerate() {
        let (color, position, count) = cells[cell_of(x, y)];
        if p.valid && count > 0 {
            let center = (color.as_vec3(), position.as_vec3());
            sums.add(&mean, center, (p.color, p.position));
        }
    }
    sums.ratio()
}

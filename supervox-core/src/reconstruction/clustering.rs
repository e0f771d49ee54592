//! Assignment and center update passes over a window of frames

use crate::config::SupervoxelConfig;
use crate::density::round_pixel;
use crate::scene::{Assignment, ClusterRef, Frame, Timeseries};
use glam::Vec3;
use supervox_data::{CameraIntrinsics, Cluster, Point};
use tracing::debug;

/// Weight of the color term in the point/cluster distance.
pub const COLOR_WEIGHT: f32 = 0.67;
/// Weight of the combined space and time terms.
pub const SPACE_TIME_WEIGHT: f32 = 0.33;

/// Point-to-cluster distance and search extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterMetric {
    time_radius: i64,
    cluster_radius: f32,
    spatial_time_increase: f32,
    radius_mult: f32,
}

impl ClusterMetric {
    pub fn new(config: &SupervoxelConfig) -> Self {
        Self {
            time_radius: config.time_radius as i64,
            cluster_radius: config.cluster_radius,
            spatial_time_increase: config.spatial_time_increase,
            radius_mult: config.radius_mult,
        }
    }

    /// Half side of the pixel box searched around `cluster` in the frame at `frame_time`.
    pub fn search_radius(&self, cluster: &Cluster, frame_time: i64) -> i64 {
        let dt = (frame_time - cluster.time()).abs() as f32;
        let rpx = self.radius_mult
            * cluster.cluster_radius_px
            * (1.0 + self.spatial_time_increase * dt / self.cluster_radius);
        (rpx + 0.5) as i64
    }

    /// `0.67·‖Δcolor‖² + 0.33·(m_t + m_x)` for a point seen at `point_time`.
    ///
    /// The time term is zero inside `R_T` and grows quadratically beyond it.
    pub fn distance(&self, point_time: i64, point: &Point, cluster: &Cluster) -> f32 {
        let mc = point.color.distance_squared(cluster.color);
        let dti = (point_time - cluster.time()).abs();
        let dt = (dti - self.time_radius).max(0) as f32;
        let rt = self.time_radius as f32;
        let mt = dt * dt / (rt * rt);
        let r = self.cluster_radius + self.spatial_time_increase * dti as f32;
        let mx = point.position.distance_squared(cluster.position) / (r * r);
        COLOR_WEIGHT * mc + SPACE_TIME_WEIGHT * (mt + mx)
    }
}

/// Visit every valid point inside the search box of every valid cluster, in every frame.
///
/// Order is frame of the cluster, then cluster, then frame of the point. Clusters
/// are read from a snapshot taken before the walk.
fn cluster_box<F>(frames: &mut [Frame], metric: &ClusterMetric, mut f: F)
where
    F: FnMut(&Cluster, i64, &Point, &mut Assignment),
{
    let clusters: Vec<Cluster> = frames
        .iter()
        .flat_map(|frame| frame.clusters().iter().copied())
        .filter(Cluster::is_valid)
        .collect();

    for c in &clusters {
        let (cx, cy) = round_pixel(c.pixel);
        for frame in frames.iter_mut() {
            let time = frame.time();
            let (rgbd, assignment) = frame.samples_and_assignment_mut();
            let (width, height) = rgbd.dimensions();
            let r = metric.search_radius(c, time);
            let (x1, x2) = ((cx - r).max(0), (cx + r).min(width as i64 - 1));
            let (y1, y2) = ((cy - r).max(0), (cy + r).min(height as i64 - 1));
            for y in y1..=y2 {
                for x in x1..=x2 {
                    let idx = (x as usize, y as usize);
                    let p = &rgbd[idx];
                    if !p.valid {
                        continue;
                    }
                    f(c, time, p, &mut assignment[idx]);
                }
            }
        }
    }
}

/// Move every point to its nearest cluster among those whose box covers it.
///
/// An existing assignment is only replaced by a strictly smaller distance.
pub fn update_assignment(frames: &mut [Frame], metric: &ClusterMetric) {
    cluster_box(frames, metric, |c, time, p, a| {
        let d = metric.distance(time, p, c);
        if d < a.distance {
            a.distance = d;
            a.cluster = Some(ClusterRef::of(c));
        }
    });
}

#[derive(Debug, Clone, Copy, Default)]
struct CenterAccumulator {
    count: u32,
    color: Vec3,
    position: Vec3,
}

impl CenterAccumulator {
    fn add(&mut self, p: &Point) {
        self.count += 1;
        self.color += p.color;
        self.position += p.position;
    }
}

/// Recompute cluster centers as the mean of their assigned points.
///
/// Clusters left without points are tombstoned. Returns how many were
/// tombstoned by this pass.
pub fn update_centers(
    frames: &mut [Frame],
    metric: &ClusterMetric,
    camera: &CameraIntrinsics,
) -> usize {
    let Some(t0) = frames.first().map(Frame::time) else {
        return 0;
    };
    let mut accumulators: Vec<Vec<CenterAccumulator>> = frames
        .iter()
        .map(|f| vec![CenterAccumulator::default(); f.clusters().len()])
        .collect();

    cluster_box(frames, metric, |c, _, p, a| {
        if a.cluster == Some(ClusterRef::of(c)) {
            accumulators[(c.time() - t0) as usize][c.id()].add(p);
        }
    });

    let mut tombstoned = 0;
    for (frame, accs) in frames.iter_mut().zip(&accumulators) {
        for (c, acc) in frame.clusters_mut().iter_mut().zip(accs) {
            if !c.is_valid() {
                continue;
            }
            if acc.count == 0 {
                c.tombstone();
                tombstoned += 1;
                continue;
            }
            let scale = 1.0 / acc.count as f32;
            c.color = acc.color * scale;
            c.position = acc.position * scale;
            c.pixel = camera.project(c.position);
        }
    }
    tombstoned
}

/// Refine clusters and assignments in the window `[time - R_T, time + R_T]`.
pub fn update_clusters(series: &mut Timeseries, time: i64, config: &SupervoxelConfig) {
    let metric = ClusterMetric::new(config);
    let r = config.time_radius as i64;
    let frames = series.window_mut(time - r, time + r + 1);
    if frames.is_empty() {
        return;
    }
    for iteration in 0..config.iterations {
        update_assignment(frames, &metric);
        let tombstoned = update_centers(frames, &metric, &config.camera);
        if tombstoned > 0 {
            debug!("Iteration {}: tombstoned {} clusters", iteration, tombstoned);
        }
    }
}

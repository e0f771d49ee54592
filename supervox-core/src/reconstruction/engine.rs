//! Streaming supervoxel engine
//!
//! Each [`step`](ContinuousSupervoxels::step) turns one color + depth frame into
//! samples, seeds new clusters where the decayed coverage of recent clusters falls
//! short of the frame's target density, appends the frame to the timeseries and
//! refines the window around the active time `t = end - R_T - 1`. Frames that
//! drop out of the window are frozen and their clusters move to the inactive pool.

use crate::config::SupervoxelConfig;
use crate::density::{cluster_density, frame_density};
use crate::error::{EngineError, Result};
use crate::ingest::{CameraFacingNormals, DepthImage, NormalEstimator, create_rgbd_data};
use crate::reconstruction::clustering::update_clusters;
use crate::sampling::sample_clusters;
use crate::scene::{Frame, Timeseries};
use image::RgbImage;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use supervox_data::{Cluster, DensityField, Grid, RgbdData};
use tracing::{debug, info};

/// Online supervoxel engine over a fixed frame size.
pub struct ContinuousSupervoxels {
    config: SupervoxelConfig,
    normals: Box<dyn NormalEstimator>,
    rng: ChaCha8Rng,
    dimensions: Option<(usize, usize)>,
    /// Decayed density of recently seeded clusters; `None` until the first step.
    last_density: Option<DensityField>,
    series: Timeseries,
    inactive: Vec<Cluster>,
    active_time: Option<i64>,
}

impl ContinuousSupervoxels {
    /// Create an engine; [`start`](Self::start) must be called before stepping.
    pub fn new(config: SupervoxelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SupervoxelConfig) -> Self {
        Self {
            config,
            normals: Box::new(CameraFacingNormals),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            dimensions: None,
            last_density: None,
            series: Timeseries::new(),
            inactive: Vec::new(),
            active_time: None,
        }
    }

    /// Replace the placeholder camera-facing normals.
    pub fn with_normal_estimator(mut self, normals: impl NormalEstimator + 'static) -> Self {
        self.normals = Box::new(normals);
        self
    }

    pub fn config(&self) -> &SupervoxelConfig {
        &self.config
    }

    /// (Re)initialize for frames of `width × height`, dropping all clusters and
    /// re-seeding the jitter generator.
    pub fn start(&mut self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        self.dimensions = Some((width, height));
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.last_density = None;
        self.series.clear();
        self.inactive.clear();
        self.active_time = None;
        debug!("Started engine for {}x{} frames", width, height);
        Ok(())
    }

    /// Advance by one frame.
    pub fn step(&mut self, color: &RgbImage, depth: &DepthImage) -> Result<()> {
        let expected = self.dimensions.ok_or(EngineError::NotStarted)?;
        let found = (color.width() as usize, color.height() as usize);
        if found != expected {
            return Err(EngineError::DimensionMismatch { expected, found });
        }
        let rgbd = create_rgbd_data(color, depth, &self.config, self.normals.as_ref())?;
        self.step_rgbd(rgbd)
    }

    /// Advance by one frame of already constructed samples.
    #[tracing::instrument(skip_all, fields(time = self.series.end()))]
    pub fn step_rgbd(&mut self, rgbd: RgbdData) -> Result<()> {
        let expected = self.dimensions.ok_or(EngineError::NotStarted)?;
        if rgbd.dimensions() != expected {
            return Err(EngineError::DimensionMismatch {
                expected,
                found: rgbd.dimensions(),
            });
        }
        let (width, height) = expected;
        let lambda = self.config.density_decay();

        // Recent clusters already cover part of the target.
        let target = frame_density(&rgbd);
        let sample_density = match &self.last_density {
            Some(last) => target.zip_map(last, |t, l| t - lambda * l)?,
            None => target,
        };
        let new_clusters = sample_clusters(&rgbd, &sample_density, &mut self.rng)?;
        let current = cluster_density(width, height, &new_clusters);
        self.last_density = Some(match &self.last_density {
            Some(last) => last.zip_map(&current, |l, c| lambda * l + c)?,
            None => current,
        });

        let time = self.series.end();
        self.series.add(Frame::new(time, rgbd, new_clusters))?;
        let purged = self.series.purge(self.series.end() - self.config.window_len());
        self.inactive.extend(purged.into_iter().flat_map(Frame::into_clusters));

        let t = self
            .series
            .begin()
            .max(self.series.end() - self.config.time_radius as i64 - 1);
        self.active_time = Some(t);
        info!(
            "f={}, t={}, span=[{},{}), clusters active={}/inactive={}",
            time,
            t,
            self.series.begin(),
            self.series.end(),
            self.num_active_clusters(),
            self.num_inactive_clusters()
        );

        update_clusters(&mut self.series, t, &self.config);
        Ok(())
    }

    /// Snapshot of every known cluster: the inactive pool first, then the
    /// retained frames oldest first.
    pub fn all_clusters(&self) -> Vec<Cluster> {
        let mut clusters =
            Vec::with_capacity(self.num_active_clusters() + self.num_inactive_clusters());
        clusters.extend_from_slice(&self.inactive);
        clusters.extend(self.series.clusters().copied());
        clusters
    }

    /// Clusters owned by retained frames, tombstoned ones included.
    pub fn num_active_clusters(&self) -> usize {
        self.series.frames().map(|f| f.clusters().len()).sum()
    }

    pub fn num_inactive_clusters(&self) -> usize {
        self.inactive.len()
    }

    /// Frozen clusters of purged frames, in purge order.
    pub fn inactive_clusters(&self) -> &[Cluster] {
        &self.inactive
    }

    /// Time targeted by the last refinement, `None` before the first step.
    pub fn active_time(&self) -> Option<i64> {
        self.active_time
    }

    pub fn timeseries(&self) -> &Timeseries {
        &self.series
    }

    pub fn last_density(&self) -> Option<&DensityField> {
        self.last_density.as_ref()
    }

    /// Per-pixel cluster of a retained frame.
    ///
    /// Pixels without an assignment, or assigned to a cluster whose frame was
    /// purged, resolve to `None`.
    pub fn frame_assignment(&self, time: i64) -> Option<Grid<Option<Cluster>>> {
        let frame = self.series.frame(time)?;
        let assignment = frame.assignment();
        Some(Grid::from_fn(assignment.width(), assignment.height(), |x, y| {
            assignment[(x, y)]
                .cluster
                .and_then(|r| self.series.cluster(r))
                .copied()
        }))
    }
}

impl Default for ContinuousSupervoxels {
    fn default() -> Self {
        Self::with_valid_config(SupervoxelConfig::default())
    }
}

//! A single time step of the supervoxel stream.

use supervox_data::{Cluster, Grid, RgbdData};

/// Handle to a cluster anywhere in the time window: creation time plus index in
/// that frame's cluster list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterRef {
    pub time: i64,
    pub index: usize,
}

impl ClusterRef {
    pub fn new(time: i64, index: usize) -> Self {
        Self { time, index }
    }

    pub fn of(cluster: &Cluster) -> Self {
        Self::new(cluster.time(), cluster.id())
    }
}

/// Nearest cluster found so far for one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub cluster: Option<ClusterRef>,
    pub distance: f32,
}

impl Assignment {
    /// No cluster, infinitely far.
    pub const EMPTY: Assignment = Assignment {
        cluster: None,
        distance: f32::INFINITY,
    };
}

impl Default for Assignment {
    fn default() -> Self {
        Self::EMPTY
    }
}

pub type FrameAssignment = Grid<Assignment>;

/// Samples, clusters and assignment of one time step.
///
/// The cluster list is fixed at construction; only the clusters' geometry and
/// validity change afterwards.
#[derive(Debug, Clone)]
pub struct Frame {
    time: i64,
    rgbd: RgbdData,
    clusters: Vec<Cluster>,
    assignment: FrameAssignment,
}

impl Frame {
    /// Build a frame at `time`, numbering `clusters` in order and clearing the assignment.
    pub fn new(time: i64, rgbd: RgbdData, clusters: Vec<Cluster>) -> Self {
        let clusters = clusters
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.with_identity(i, time))
            .collect();
        let assignment = Grid::filled(rgbd.width(), rgbd.height(), Assignment::EMPTY);
        Self {
            time,
            rgbd,
            clusters,
            assignment,
        }
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn rgbd(&self) -> &RgbdData {
        &self.rgbd
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub(crate) fn clusters_mut(&mut self) -> &mut [Cluster] {
        &mut self.clusters
    }

    pub fn cluster(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn assignment(&self) -> &FrameAssignment {
        &self.assignment
    }

    /// Samples (read-only) together with the assignment (mutable).
    pub(crate) fn samples_and_assignment_mut(&mut self) -> (&RgbdData, &mut FrameAssignment) {
        (&self.rgbd, &mut self.assignment)
    }

    /// Give up the frame, keeping only its clusters.
    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }
}

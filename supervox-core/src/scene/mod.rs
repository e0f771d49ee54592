//! Frames and the rolling time window
//!
//! A [`Frame`] owns the samples, the clusters created at its time and the
//! per-pixel assignment. The [`Timeseries`] keeps a contiguous run of frames and
//! hands purged frames back to the caller.

pub mod frame;
pub mod timeseries;

pub use frame::{Assignment, ClusterRef, Frame, FrameAssignment};
pub use timeseries::Timeseries;

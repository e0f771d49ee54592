//! Contiguous run of frames over `[begin, end)`.

use crate::error::{EngineError, Result};
use crate::scene::frame::{ClusterRef, Frame};
use std::collections::VecDeque;
use supervox_data::Cluster;
use tracing::trace;

/// Frames with consecutive times, oldest first.
#[derive(Debug, Default)]
pub struct Timeseries {
    frames: VecDeque<Frame>,
    begin: i64,
}

impl Timeseries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the oldest retained frame (equals `end` when empty).
    pub fn begin(&self) -> i64 {
        self.begin
    }

    /// Time the next frame must have.
    pub fn end(&self) -> i64 {
        self.begin + self.frames.len() as i64
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop every frame and restart time at zero.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.begin = 0;
    }

    /// Append a frame; its time must equal [`end`](Self::end).
    pub fn add(&mut self, frame: Frame) -> Result<()> {
        if frame.time() != self.end() {
            return Err(EngineError::NonContiguousTime {
                expected: self.end(),
                found: frame.time(),
            });
        }
        self.frames.push_back(frame);
        Ok(())
    }

    /// Remove and return every frame with `time < before`.
    ///
    /// Afterwards `begin >= before`; purging past `end` leaves an empty series
    /// starting at `before`.
    pub fn purge(&mut self, before: i64) -> Vec<Frame> {
        let mut purged = Vec::new();
        while self.frames.front().is_some_and(|f| f.time() < before) {
            if let Some(frame) = self.frames.pop_front() {
                purged.push(frame);
            }
        }
        self.begin = self.begin.max(before);
        if !purged.is_empty() {
            trace!("Purged {} frames, begin = {}", purged.len(), self.begin);
        }
        purged
    }

    pub fn frame(&self, time: i64) -> Option<&Frame> {
        self.index_of(time).map(|i| &self.frames[i])
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Resolve a cluster handle against the retained frames.
    pub fn cluster(&self, r: ClusterRef) -> Option<&Cluster> {
        self.frame(r.time)?.cluster(r.index)
    }

    /// Every cluster of every retained frame, oldest frame first.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.frames.iter().flat_map(|f| f.clusters().iter())
    }

    /// Mutable frames with times in `[from, to)`, clipped to the retained range.
    pub fn window_mut(&mut self, from: i64, to: i64) -> &mut [Frame] {
        let begin = self.begin;
        let end = self.end();
        let lo = (from.clamp(begin, end) - begin) as usize;
        let hi = (to.clamp(begin, end) - begin) as usize;
        let frames = self.frames.make_contiguous();
        &mut frames[lo..hi.max(lo)]
    }

    fn index_of(&self, time: i64) -> Option<usize> {
        if time >= self.begin && time < self.end() {
            Some((time - self.begin) as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supervox_data::{Grid, Point};

    fn empty_frame(time: i64) -> Frame {
        Frame::new(time, Grid::filled(2, 2, Point::INVALID), Vec::new())
    }

    #[test]
    fn test_add_advances_end() {
        let mut series = Timeseries::new();
        for t in 0..4 {
            series.add(empty_frame(t)).unwrap();
        }
        assert_eq!(series.begin(), 0);
        assert_eq!(series.end(), 4);
        assert_eq!(series.frame(2).map(|f| f.time()), Some(2));
        assert!(series.frame(4).is_none());
    }

    #[test]
    fn test_add_rejects_gap() {
        let mut series = Timeseries::new();
        series.add(empty_frame(0)).unwrap();
        assert!(matches!(
            series.add(empty_frame(2)),
            Err(EngineError::NonContiguousTime {
                expected: 1,
                found: 2
            })
        ));
        assert!(series.add(empty_frame(0)).is_err());
    }

    #[test]
    fn test_purge_returns_old_frames() {
        let mut series = Timeseries::new();
        for t in 0..6 {
            series.add(empty_frame(t)).unwrap();
        }
        let purged = series.purge(3);
        assert_eq!(purged.iter().map(|f| f.time()).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(series.begin(), 3);
        assert_eq!(series.end(), 6);

        // Purging below begin is a no-op.
        assert!(series.purge(-5).is_empty());
        assert_eq!(series.begin(), 3);
    }

    #[test]
    fn test_purge_past_end() {
        let mut series = Timeseries::new();
        for t in 0..3 {
            series.add(empty_frame(t)).unwrap();
        }
        assert_eq!(series.purge(10).len(), 3);
        assert!(series.is_empty());
        assert_eq!(series.begin(), 10);
        assert_eq!(series.end(), 10);
        series.add(empty_frame(10)).unwrap();
    }

    #[test]
    fn test_window_mut_clips() {
        let mut series = Timeseries::new();
        for t in 0..5 {
            series.add(empty_frame(t)).unwrap();
        }
        series.purge(1);
        let times: Vec<i64> = series.window_mut(-3, 3).iter().map(|f| f.time()).collect();
        assert_eq!(times, vec![1, 2]);
        let times: Vec<i64> = series.window_mut(3, 100).iter().map(|f| f.time()).collect();
        assert_eq!(times, vec![3, 4]);
        assert!(series.window_mut(7, 9).is_empty());
    }

    #[test]
    fn test_clear_resets_time() {
        let mut series = Timeseries::new();
        series.add(empty_frame(0)).unwrap();
        series.purge(1);
        series.clear();
        assert_eq!(series.begin(), 0);
        assert_eq!(series.end(), 0);
    }
}

//! Frame sources for feeding the engine.

use crate::ingest::rgbd::DepthImage;
use image::{Luma, Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, info};

/// One color + depth frame pair.
#[derive(Debug, Clone)]
pub struct RgbdFrame {
    pub color: RgbImage,
    pub depth: DepthImage,
}

impl RgbdFrame {
    pub fn new(color: RgbImage, depth: DepthImage) -> Self {
        Self { color, depth }
    }

    /// A frame with one color and one depth value everywhere.
    pub fn uniform(width: u32, height: u32, color: [u8; 3], depth: u16) -> Self {
        Self {
            color: RgbImage::from_pixel(width, height, Rgb(color)),
            depth: DepthImage::from_pixel(width, height, Luma([depth])),
        }
    }

    /// Get image dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.color.dimensions()
    }
}

/// Trait for RGBD frame sources
pub trait RgbdStream {
    /// Get the next frame from the stream
    /// Returns None when the stream ends
    fn next_frame(&mut self) -> Result<Option<RgbdFrame>, StreamError>;

    /// Resolution (width, height) of every frame.
    fn resolution(&self) -> (u32, u32);
}

/// Errors that can occur while producing frames
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Image decoding error: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("Invalid frame data: {0}")]
    InvalidData(String),
}

/// Replays one frame a fixed number of times.
pub struct RepeatStream {
    frame: RgbdFrame,
    remaining: usize,
}

impl RepeatStream {
    pub fn new(frame: RgbdFrame, count: usize) -> Self {
        Self {
            frame,
            remaining: count,
        }
    }

    /// Constant color and depth, useful as a smoke test of the whole pipeline.
    pub fn uniform(width: u32, height: u32, color: [u8; 3], depth: u16, count: usize) -> Self {
        Self::new(RgbdFrame::uniform(width, height, color, depth), count)
    }

    /// Load a color image and a 16-bit depth image from disk.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        color_path: P,
        depth_path: Q,
        count: usize,
    ) -> Result<Self, StreamError> {
        let color = image::open(color_path.as_ref())?.to_rgb8();
        let depth = image::open(depth_path.as_ref())?.to_luma16();
        if color.dimensions() != depth.dimensions() {
            return Err(StreamError::InvalidData(format!(
                "color is {:?} but depth is {:?}",
                color.dimensions(),
                depth.dimensions()
            )));
        }
        info!(
            "Loaded RGBD frame {}x{} from {:?}",
            color.width(),
            color.height(),
            color_path.as_ref()
        );
        Ok(Self::new(RgbdFrame::new(color, depth), count))
    }

    /// Number of frames left.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl RgbdStream for RepeatStream {
    fn next_frame(&mut self) -> Result<Option<RgbdFrame>, StreamError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        debug!("Replaying frame ({} left)", self.remaining);
        Ok(Some(self.frame.clone()))
    }

    fn resolution(&self) -> (u32, u32) {
        self.frame.dimensions()
    }
}

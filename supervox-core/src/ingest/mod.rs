//! Data ingestion module
//!
//! Turns raw color + depth images into per-pixel RGBD samples:
//! - Depth validation and pinhole back-projection
//! - Pluggable surface normal estimation
//! - Frame sources feeding the engine

pub mod normals;
pub mod rgbd;
pub mod stream;

pub use normals::{CAMERA_FACING_NORMAL, CameraFacingNormals, NormalEstimator};
pub use rgbd::{DepthImage, create_rgbd_data};
pub use stream::{RepeatStream, RgbdFrame, RgbdStream, StreamError};

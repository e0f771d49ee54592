//! Blue-noise seed sampling
//!
//! Turns a (possibly negative) density field into well-spread seed pixels by
//! error diffusion over a mipmap pyramid, then instantiates clusters at the seeds.

pub mod blue_noise;
pub mod mipmap;

pub use blue_noise::{MAX_JITTER_ATTEMPTS, sample_clusters, sample_seeds};
pub use mipmap::MipmapPyramid;

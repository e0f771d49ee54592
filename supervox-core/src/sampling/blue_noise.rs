//! Multiresolution error-diffusion sampler.
//!
//! The pyramid is walked from the single top cell down. A cell whose density
//! (plus carry received from already visited siblings) is at most 1.5, or any
//! cell on the two finest levels, becomes a leaf: it emits a seed if it holds at
//! least half a sample and diffuses the remainder to its causal neighbours on the
//! same level with Floyd–Steinberg weights. Other cells recurse into their four
//! children.

use crate::error::{EngineError, Result};
use crate::sampling::mipmap::MipmapPyramid;
use glam::Vec2;
use rand::Rng;
use supervox_data::{Cluster, DensityField, Grid, RgbdData};
use tracing::debug;

/// Resample attempts when looking for a valid pixel near a cell center.
pub const MAX_JITTER_ATTEMPTS: usize = 100;

const LEAF_DENSITY: f32 = 1.5;
const SEED_DENSITY: f32 = 0.5;

/// Causal neighbour offsets and their weights out of 16.
const DIFFUSION: [(i64, i64, f32); 4] = [(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)];

/// Sample seed pixels whose local density follows `density`.
///
/// Seeds only land on valid pixels of `rgbd`. The order of the result carries no
/// meaning.
pub fn sample_seeds<R: Rng + ?Sized>(
    rgbd: &RgbdData,
    density: &DensityField,
    rng: &mut R,
) -> Result<Vec<Vec2>> {
    if rgbd.dimensions() != density.dimensions() {
        return Err(EngineError::DimensionMismatch {
            expected: rgbd.dimensions(),
            found: density.dimensions(),
        });
    }
    if density.is_empty() {
        return Ok(Vec::new());
    }

    let pyramid = MipmapPyramid::build(density);
    let carry = pyramid
        .levels()
        .iter()
        .map(|l| Grid::filled(l.width(), l.height(), 0.0f32))
        .collect();
    let mut walk = SeedWalk {
        rgbd,
        pyramid: &pyramid,
        carry,
        rng,
        seeds: Vec::with_capacity(1000),
    };
    walk.visit(pyramid.top(), 0, 0);

    debug!(
        "Sampled {} seeds over {} pyramid levels",
        walk.seeds.len(),
        pyramid.len()
    );
    Ok(walk.seeds)
}

/// Sample seeds and turn each one on a valid pixel into a fresh cluster.
///
/// Clusters are numbered `0..n` in sampling order; their time is left at zero for
/// the owning frame to set.
pub fn sample_clusters<R: Rng + ?Sized>(
    rgbd: &RgbdData,
    density: &DensityField,
    rng: &mut R,
) -> Result<Vec<Cluster>> {
    let seeds = sample_seeds(rgbd, density, rng)?;
    let clusters = seeds
        .into_iter()
        .filter_map(|px| {
            let point = rgbd.get(px.x as usize, px.y as usize)?;
            point.valid.then(|| Cluster::from_point(px, point))
        })
        .enumerate()
        .map(|(id, c)| c.with_identity(id, 0))
        .collect();
    Ok(clusters)
}

struct SeedWalk<'a, R: Rng + ?Sized> {
    rgbd: &'a RgbdData,
    pyramid: &'a MipmapPyramid,
    carry: Vec<DensityField>,
    rng: &'a mut R,
    seeds: Vec<Vec2>,
}

impl<R: Rng + ?Sized> SeedWalk<'_, R> {
    fn visit(&mut self, level: usize, x: usize, y: usize) {
        let mut v = self.pyramid.level(level)[(x, y)] + self.carry[level][(x, y)];

        if level <= 1 || v <= LEAF_DENSITY {
            if v >= SEED_DENSITY {
                let (sx, sy, range) = cell_center(level, x, y);
                let found = find_valid_seed(self.rgbd, sx, sy, range, &mut *self.rng);
                if let Some((px, py)) = found {
                    self.seeds.push(Vec2::new(px as f32, py as f32));
                    v -= 1.0;
                }
            }
            diffuse(&mut self.carry[level], x, y, v);
        } else {
            // Carry written by earlier children must be visible to later ones.
            self.visit(level - 1, 2 * x, 2 * y);
            self.visit(level - 1, 2 * x, 2 * y + 1);
            self.visit(level - 1, 2 * x + 1, 2 * y);
            self.visit(level - 1, 2 * x + 1, 2 * y + 1);
        }
    }
}

/// Finest-resolution center of a cell and the jitter range around it.
///
/// The range is a quarter of the cell side.
fn cell_center(level: usize, x: usize, y: usize) -> (i64, i64, i64) {
    if level == 0 {
        return (x as i64, y as i64, 0);
    }
    let half = 1i64 << (level - 1);
    (
        ((x as i64) << level) + half,
        ((y as i64) << level) + half,
        half / 2,
    )
}

/// Look for a valid pixel within `range` of `(sx, sy)`.
///
/// With a zero range only the center itself is tested; otherwise up to
/// [`MAX_JITTER_ATTEMPTS`] uniform offsets are tried.
fn find_valid_seed<R: Rng + ?Sized>(
    rgbd: &RgbdData,
    sx: i64,
    sy: i64,
    range: i64,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let usable = |x: i64, y: i64| rgbd.contains(x, y) && rgbd[(x as usize, y as usize)].valid;
    if range == 0 {
        return usable(sx, sy).then_some((sx as usize, sy as usize));
    }
    for _ in 0..MAX_JITTER_ATTEMPTS {
        let x = sx + rng.gen_range(-range..=range);
        let y = sy + rng.gen_range(-range..=range);
        if usable(x, y) {
            return Some((x as usize, y as usize));
        }
    }
    None
}

/// Spread `v` over the in-bounds causal neighbours of `(x, y)`.
///
/// Weights of out-of-bounds neighbours are dropped and the remaining ones are
/// scaled by `v / Σ in-bounds weights`. A cell with no in-bounds neighbour loses `v`.
pub(crate) fn diffuse(carry: &mut DensityField, x: usize, y: usize, v: f32) {
    let (x, y) = (x as i64, y as i64);
    let q: f32 = DIFFUSION
        .iter()
        .filter(|(dx, dy, _)| carry.contains(x + dx, y + dy))
        .map(|(_, _, w)| w)
        .sum();
    if q <= 0.0 {
        return;
    }
    let scale = v / q;
    for (dx, dy, w) in DIFFUSION {
        if carry.contains(x + dx, y + dy) {
            carry[((x + dx) as usize, (y + dy) as usize)] += w * scale;
        }
    }
}

//! Mipmap pyramid of a density field by repeated 2×2 box summation.

use supervox_data::{DensityField, Grid};

/// Levels of summed density, finest (the field itself) first.
///
/// Every level above the finest is square with a power-of-two side, so cell
/// `(x, y)` of level `k ≥ 1` covers finest pixels `[x·2^k, (x+1)·2^k)` along each
/// axis. Pixels past the field's edge count as zero. The last level is a single cell.
#[derive(Debug, Clone)]
pub struct MipmapPyramid {
    levels: Vec<DensityField>,
}

impl MipmapPyramid {
    pub fn build(field: &DensityField) -> Self {
        let mut levels = vec![field.clone()];
        while let Some(last) = levels.last() {
            if last.width().max(last.height()) <= 1 {
                break;
            }
            let next = reduce(last);
            levels.push(next);
        }
        Self { levels }
    }

    pub fn levels(&self) -> &[DensityField] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> &DensityField {
        &self.levels[index]
    }

    /// Number of levels including the finest.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the coarsest level.
    pub fn top(&self) -> usize {
        self.levels.len() - 1
    }
}

/// Smallest power of two that is `>= x`.
pub(crate) fn next_pow2(x: usize) -> usize {
    x.max(1).next_power_of_two()
}

/// Sum 2×2 blocks into a square level of side `next_pow2(max(w, h)) / 2`.
pub(crate) fn reduce(level: &DensityField) -> DensityField {
    let (width, height) = level.dimensions();
    let size = next_pow2(width.max(height)) / 2;
    let mut reduced = Grid::filled(size, size, 0.0f32);
    for y in (0..height).step_by(2) {
        for x in (0..width).step_by(2) {
            let mut q = 0.0;
            for (dx, dy) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                if let Some(v) = level.get(x + dx, y + dy) {
                    q += *v;
                }
            }
            reduced[(x / 2, y / 2)] = q;
        }
    }
    reduced
}

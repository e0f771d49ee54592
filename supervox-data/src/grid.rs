//! Dense row-major 2D grids addressed by `(x, y)`.

use crate::error::{DataError, Result};
use crate::types::Point;
use std::ops::{Index, IndexMut};

/// Per-pixel RGBD samples of one frame.
pub type RgbdData = Grid<Point>;

/// Scalar density field (expected supervoxels per pixel).
pub type DensityField = Grid<f32>;

/// A fixed-size 2D array stored row by row (`x` is the fast axis).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Reset every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Grid<T> {
    /// Wrap existing row-major storage.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(DataError::GridSizeMismatch {
                expected: width * height,
                found: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get dimensions (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check whether signed pixel coordinates fall inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.data.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Iterate over `(x, y, cell)` in storage order.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % width, i / width, cell))
    }

    /// Combine two grids of identical shape cell by cell.
    pub fn zip_map<U, V>(
        &self,
        other: &Grid<U>,
        mut f: impl FnMut(&T, &U) -> V,
    ) -> Result<Grid<V>> {
        if self.dimensions() != other.dimensions() {
            return Err(DataError::ShapeMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        Ok(Grid {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        })
    }
}

impl Grid<f32> {
    /// Sum of all cells, accumulated in double precision.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.width && y < self.height, "grid index ({x}, {y}) out of bounds");
        &self.data[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(x < self.width && y < self.height, "grid index ({x}, {y}) out of bounds");
        &mut self.data[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_row_major_layout() {
        let grid = Grid::from_fn(3, 2, |x, y| x + 10 * y);
        assert_eq!(grid.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid[(2, 1)], 12);
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_grid_from_vec_size_mismatch() {
        let result = Grid::from_vec(4, 4, vec![0.0f32; 15]);
        assert!(matches!(
            result,
            Err(DataError::GridSizeMismatch {
                expected: 16,
                found: 15
            })
        ));
    }

    #[test]
    fn test_grid_contains_signed() {
        let grid = Grid::filled(5, 4, 0u8);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(4, 3));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(5, 0));
        assert!(!grid.contains(0, 4));
    }

    #[test]
    fn test_grid_enumerate_coordinates() {
        let grid = Grid::from_fn(2, 2, |x, y| (x, y));
        for (x, y, cell) in grid.enumerate() {
            assert_eq!((x, y), *cell);
        }
    }

    #[test]
    fn test_grid_zip_map() {
        let a = Grid::filled(2, 3, 2.0f32);
        let b = Grid::filled(2, 3, 0.5f32);
        let c = a.zip_map(&b, |x, y| x - y).unwrap();
        assert!(c.iter().all(|&v| v == 1.5));
        assert_eq!(c.sum(), 9.0);

        let wrong = Grid::filled(3, 2, 0.0f32);
        assert!(a.zip_map(&wrong, |x, y| x + y).is_err());
    }
}

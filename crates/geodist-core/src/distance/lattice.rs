use std::iter::Rev;
use std::ops::Range;

use ndarray::{Dimension, Ix2, Ix3};

/// Coordinate arithmetic for one lattice dimensionality.
///
/// Sites are addressed by their flat index in standard (row-major) layout, so
/// increasing index order is lexicographic coordinate order with the innermost
/// axis fastest.
pub trait Lattice: Copy + std::fmt::Debug {
    type Dim: Dimension;

    const RANK: usize;

    /// Adapter for `shape`; `shape.len()` must equal [`RANK`](Self::RANK).
    fn from_shape(shape: &[usize]) -> Self;

    fn dim(&self) -> Self::Dim;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn coords(&self, index: usize) -> Vec<usize>;

    /// Flat index of `coords`, or `None` outside the lattice.
    fn index(&self, coords: &[usize]) -> Option<usize>;

    /// Flat index of `site + delta`, or `None` outside the lattice.
    fn neighbor(&self, site: usize, delta: &[isize]) -> Option<usize>;

    fn raster(&self) -> Range<usize> {
        0..self.len()
    }

    fn raster_rev(&self) -> Rev<Range<usize>> {
        (0..self.len()).rev()
    }
}

/// Maps an ndarray dimension type onto its lattice adapter.
pub trait LatticeDim: Dimension {
    type Lattice: Lattice<Dim = Self>;
}

impl LatticeDim for Ix2 {
    type Lattice = Lattice2;
}

impl LatticeDim for Ix3 {
    type Lattice = Lattice3;
}

fn step(pos: usize, delta: isize, extent: usize) -> Option<usize> {
    let next = pos.checked_add_signed(delta)?;
    (next < extent).then_some(next)
}

/// 2D lattice, axes `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lattice2 {
    pub rows: usize,
    pub cols: usize,
}

impl Lattice for Lattice2 {
    type Dim = Ix2;

    const RANK: usize = 2;

    fn from_shape(shape: &[usize]) -> Self {
        Self {
            rows: shape[0],
            cols: shape[1],
        }
    }

    fn dim(&self) -> Ix2 {
        Ix2(self.rows, self.cols)
    }

    fn len(&self) -> usize {
        self.rows * self.cols
    }

    fn coords(&self, index: usize) -> Vec<usize> {
        vec![index / self.cols, index % self.cols]
    }

    fn index(&self, coords: &[usize]) -> Option<usize> {
        let (row, col) = (coords[0], coords[1]);
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    fn neighbor(&self, site: usize, delta: &[isize]) -> Option<usize> {
        let row = step(site / self.cols, delta[0], self.rows)?;
        let col = step(site % self.cols, delta[1], self.cols)?;
        Some(row * self.cols + col)
    }
}

/// 3D lattice, axes `(plane, row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lattice3 {
    pub planes: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Lattice for Lattice3 {
    type Dim = Ix3;

    const RANK: usize = 3;

    fn from_shape(shape: &[usize]) -> Self {
        Self {
            planes: shape[0],
            rows: shape[1],
            cols: shape[2],
        }
    }

    fn dim(&self) -> Ix3 {
        Ix3(self.planes, self.rows, self.cols)
    }

    fn len(&self) -> usize {
        self.planes * self.rows * self.cols
    }

    fn coords(&self, index: usize) -> Vec<usize> {
        let plane_len = self.rows * self.cols;
        let rem = index % plane_len;
        vec![index / plane_len, rem / self.cols, rem % self.cols]
    }

    fn index(&self, coords: &[usize]) -> Option<usize> {
        let (plane, row, col) = (coords[0], coords[1], coords[2]);
        (plane < self.planes && row < self.rows && col < self.cols)
            .then(|| (plane * self.rows + row) * self.cols + col)
    }

    fn neighbor(&self, site: usize, delta: &[isize]) -> Option<usize> {
        let plane_len = self.rows * self.cols;
        let rem = site % plane_len;
        let plane = step(site / plane_len, delta[0], self.planes)?;
        let row = step(rem / self.cols, delta[1], self.rows)?;
        let col = step(rem % self.cols, delta[2], self.cols)?;
        Some((plane * self.rows + row) * self.cols + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice2_neighbor_bounds() {
        let l = Lattice2 { rows: 3, cols: 4 };
        let corner = l.index(&[0, 0]).unwrap();
        assert_eq!(l.neighbor(corner, &[-1, 0]), None);
        assert_eq!(l.neighbor(corner, &[0, -1]), None);
        assert_eq!(l.neighbor(corner, &[1, 1]), l.index(&[1, 1]));
        let last = l.index(&[2, 3]).unwrap();
        assert_eq!(l.neighbor(last, &[0, 1]), None);
        assert_eq!(l.neighbor(last, &[-2, -1]), Some(2));
    }

    #[test]
    fn test_lattice2_no_row_wrap() {
        // Stepping right off the end of a row must not land on the next row.
        let l = Lattice2 { rows: 2, cols: 3 };
        assert_eq!(l.neighbor(2, &[0, 1]), None);
    }

    #[test]
    fn test_lattice3_coords_round_trip() {
        let l = Lattice3 {
            planes: 2,
            rows: 3,
            cols: 4,
        };
        for i in l.raster() {
            assert_eq!(l.index(&l.coords(i)), Some(i));
        }
        assert_eq!(l.coords(13), vec![1, 0, 1]);
    }

    #[test]
    fn test_lattice3_neighbor() {
        let l = Lattice3 {
            planes: 3,
            rows: 3,
            cols: 3,
        };
        let centre = l.index(&[1, 1, 1]).unwrap();
        assert_eq!(l.neighbor(centre, &[-1, -1, -1]), Some(0));
        assert_eq!(l.neighbor(centre, &[1, 2, 0]), None);
        assert_eq!(l.neighbor(0, &[0, 0, -1]), None);
    }

    #[test]
    fn test_raster_rev() {
        let l = Lattice2 { rows: 2, cols: 2 };
        let rev: Vec<usize> = l.raster_rev().collect();
        assert_eq!(rev, vec![3, 2, 1, 0]);
    }
}

#![allow(dead_code)]

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use geodist_core::chamfer::ChamferMask;
use geodist_core::distance::{Lattice, LatticeDim};
use ndarray::{Array, Array2};

/// Build `(marker, mask)` from a text picture.
///
/// `.` is a mask site, `M` a marker site inside the mask, `#` outside the mask.
pub fn parse_grid(rows: &[&str]) -> (Array2<bool>, Array2<bool>) {
    let h = rows.len();
    let w = rows[0].len();
    let mut marker = Array2::from_elem((h, w), false);
    let mut mask = Array2::from_elem((h, w), false);

    for (row, line) in rows.iter().enumerate() {
        assert_eq!(line.len(), w, "ragged test grid");
        for (col, c) in line.chars().enumerate() {
            match c {
                '.' => mask[[row, col]] = true,
                'M' => {
                    mask[[row, col]] = true;
                    marker[[row, col]] = true;
                }
                '#' => {}
                other => panic!("unexpected grid character {other:?}"),
            }
        }
    }

    (marker, mask)
}

/// Serpentine corridor: the marker sits at the bottom of the first leg and the
/// path must turn back against both scan directions twice.
pub fn serpentine() -> (Array2<bool>, Array2<bool>) {
    parse_grid(&[
        "...#...",
        ".#.#.#.",
        ".#.#.#.",
        ".#.#.#.",
        ".#.#.#.",
        ".#.#.#.",
        "M#...#.",
    ])
}

/// Multi-source Dijkstra over the mask graph using the mask's integer weights.
///
/// Returns distances in flat (row-major) order; `None` for sites outside the
/// mask or not connected to any marker.
pub fn reference_distances<D: LatticeDim>(
    marker: &Array<bool, D>,
    mask: &Array<bool, D>,
    chamfer: &ChamferMask,
) -> Vec<Option<u64>> {
    let lattice = <D::Lattice as Lattice>::from_shape(mask.shape());
    let inside: Vec<bool> = mask.iter().copied().collect();
    let mut dist: Vec<Option<u64>> = vec![None; lattice.len()];
    let mut heap = BinaryHeap::new();

    for (i, &seed) in marker.iter().enumerate() {
        if seed && inside[i] {
            dist[i] = Some(0);
            heap.push(Reverse((0u64, i)));
        }
    }

    while let Some(Reverse((d, p))) = heap.pop() {
        if dist[p].is_some_and(|best| d > best) {
            continue;
        }
        for offset in chamfer.offsets() {
            let Some(q) = lattice.neighbor(p, &offset.delta) else {
                continue;
            };
            if !inside[q] {
                continue;
            }
            let candidate = d + offset.int_weight as u64;
            if dist[q].map_or(true, |cur| candidate < cur) {
                dist[q] = Some(candidate);
                heap.push(Reverse((candidate, q)));
            }
        }
    }

    dist
}

/// Fully-true mask with a single marker site.
pub fn single_marker<D: ndarray::Dimension>(
    dim: D,
    seed: D::Pattern,
) -> (Array<bool, D>, Array<bool, D>)
where
    D::Pattern: ndarray::NdIndex<D>,
{
    let mut marker = Array::from_elem(dim.clone(), false);
    marker[seed] = true;
    let mask = Array::from_elem(dim, true);
    (marker, mask)
}

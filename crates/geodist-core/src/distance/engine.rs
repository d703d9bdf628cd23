use std::collections::VecDeque;

use ndarray::{Array, ArrayBase, Data, Dimension};
use tracing::debug;

use crate::chamfer::{ChamferMask, WeightedOffset};
use crate::error::{GeodistError, Result};

use super::lattice::{Lattice, LatticeDim};
use super::map::DistanceMap;
use super::value::DistanceValue;

/// Chamfer geodesic distance transform.
///
/// Propagates distances from the marker through the mask in four phases:
/// initialization, a forward raster scan, a backward raster scan that queues
/// every site it lowers behind the scan front, and a worklist fixpoint that
/// drains that queue. Optionally the result is divided by the mask's
/// normalization weight.
#[derive(Clone, Copy, Debug)]
pub struct GeodesicTransform<'a> {
    chamfer: &'a ChamferMask,
    normalize: bool,
    refine: bool,
}

impl<'a> GeodesicTransform<'a> {
    pub fn new(chamfer: &'a ChamferMask) -> Self {
        Self {
            chamfer,
            normalize: true,
            refine: true,
        }
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Stop after the two raster scans and discard the worklist.
    ///
    /// The result over-estimates distances along paths that double back
    /// against both scan directions; useful only for diagnostics.
    pub fn scan_only(mut self) -> Self {
        self.refine = false;
        self
    }

    pub fn chamfer(&self) -> &ChamferMask {
        self.chamfer
    }

    pub fn compute<T, D, S1, S2>(
        &self,
        marker: &ArrayBase<S1, D>,
        mask: &ArrayBase<S2, D>,
    ) -> Result<DistanceMap<T, D>>
    where
        T: DistanceValue,
        D: LatticeDim,
        S1: Data<Elem = bool>,
        S2: Data<Elem = bool>,
    {
        if marker.shape() != mask.shape() {
            return Err(GeodistError::DimensionMismatch {
                expected: mask.shape().to_vec(),
                found: marker.shape().to_vec(),
            });
        }
        let rank = <D::Lattice as Lattice>::RANK;
        if self.chamfer.rank() != rank {
            return Err(GeodistError::InvalidMask(format!(
                "{}D chamfer mask applied to a {rank}D lattice",
                self.chamfer.rank()
            )));
        }
        let max_allowed = T::max_allowed(self.chamfer)?;

        let lattice = <D::Lattice as Lattice>::from_shape(mask.shape());
        let mut state = Propagation::new(lattice, self.chamfer, mask, max_allowed);

        state.initialize(marker);
        state.forward_scan()?;
        let worklist = state.backward_scan()?;
        if self.refine {
            state.refine(worklist)?;
        } else {
            debug!(discarded = worklist.len(), "Skipping worklist refinement");
        }
        if self.normalize {
            state.normalize(T::normalization_factor(self.chamfer));
        }

        let excluded = state.inside.iter().filter(|&&inside| !inside).count();
        let data = Array::from_shape_vec(lattice.dim(), state.dist)?;
        Ok(DistanceMap::new(data, self.normalize, excluded))
    }
}

/// Step of the chamfer mask in the numeric domain of the map.
struct Step<'m, T> {
    delta: &'m [isize],
    cost: T,
}

fn steps<T: DistanceValue>(offsets: &[WeightedOffset]) -> Vec<Step<'_, T>> {
    offsets
        .iter()
        .map(|o| Step {
            delta: &o.delta,
            cost: T::step(o),
        })
        .collect()
}

/// Mutable state of one propagation run.
struct Propagation<'m, L, T> {
    lattice: L,
    inside: Vec<bool>,
    dist: Vec<T>,
    max_allowed: Option<T>,
    forward: Vec<Step<'m, T>>,
    backward: Vec<Step<'m, T>>,
    all: Vec<Step<'m, T>>,
}

impl<'m, L: Lattice, T: DistanceValue> Propagation<'m, L, T> {
    fn new<S, D>(
        lattice: L,
        chamfer: &'m ChamferMask,
        mask: &ArrayBase<S, D>,
        max_allowed: Option<T>,
    ) -> Self
    where
        S: Data<Elem = bool>,
        D: Dimension,
    {
        Self {
            lattice,
            inside: mask.iter().copied().collect(),
            dist: Vec::with_capacity(lattice.len()),
            max_allowed,
            forward: steps(chamfer.forward_offsets()),
            backward: steps(chamfer.backward_offsets()),
            all: steps(chamfer.offsets()),
        }
    }

    fn initialize<S, D>(&mut self, marker: &ArrayBase<S, D>)
    where
        S: Data<Elem = bool>,
        D: Dimension,
    {
        self.dist.clear();
        self.dist
            .extend(marker.iter().zip(&self.inside).map(|(&seed, &inside)| {
                if !inside {
                    T::excluded()
                } else if seed {
                    T::zero()
                } else {
                    T::unreached()
                }
            }));
    }

    /// Reject a candidate the bounded domain could not safely extend.
    fn check(&self, site: usize, candidate: T) -> Result<()> {
        match self.max_allowed {
            Some(limit) if candidate > limit => Err(GeodistError::Overflow {
                coords: self.lattice.coords(site),
                limit: limit.to_u64().unwrap_or(u64::MAX),
            }),
            _ => Ok(()),
        }
    }

    /// Smallest distance reachable at `site` through the given steps.
    fn best_through(&self, site: usize, steps: &[Step<'m, T>]) -> T {
        let mut best = self.dist[site];
        for step in steps {
            let Some(q) = self.lattice.neighbor(site, step.delta) else {
                continue;
            };
            if !self.inside[q] || !self.dist[q].is_reached() {
                continue;
            }
            let candidate = self.dist[q].add(step.cost);
            if candidate < best {
                best = candidate;
            }
        }
        best
    }

    fn forward_scan(&mut self) -> Result<()> {
        let mut lowered = 0usize;
        for p in self.lattice.raster() {
            if !self.inside[p] {
                continue;
            }
            let best = self.best_through(p, &self.forward);
            if best < self.dist[p] {
                self.check(p, best)?;
                self.dist[p] = best;
                lowered += 1;
            }
        }
        debug!(sites = self.lattice.len(), lowered, "Forward scan complete");
        Ok(())
    }

    fn backward_scan(&mut self) -> Result<VecDeque<usize>> {
        let mut worklist = VecDeque::new();
        let mut lowered = 0usize;
        for p in self.lattice.raster_rev() {
            if !self.inside[p] {
                continue;
            }
            let best = self.best_through(p, &self.backward);
            if best >= self.dist[p] {
                continue;
            }
            self.check(p, best)?;
            self.dist[p] = best;
            lowered += 1;

            // Neighbors behind the scan front are now stale.
            for i in 0..self.backward.len() {
                let (delta, cost) = (self.backward[i].delta, self.backward[i].cost);
                if let Some(q) = self.relax(p, delta, cost)? {
                    worklist.push_back(q);
                }
            }
        }
        debug!(lowered, queued = worklist.len(), "Backward scan complete");
        Ok(worklist)
    }

    fn refine(&mut self, mut worklist: VecDeque<usize>) -> Result<()> {
        let mut pops = 0usize;
        let mut pushes = 0usize;
        while let Some(p) = worklist.pop_front() {
            pops += 1;
            for i in 0..self.all.len() {
                let (delta, cost) = (self.all[i].delta, self.all[i].cost);
                if let Some(q) = self.relax(p, delta, cost)? {
                    worklist.push_back(q);
                    pushes += 1;
                }
            }
        }
        debug!(pops, pushes, "Worklist refinement complete");
        Ok(())
    }

    /// Try to lower the neighbor `p + delta` through `p`. Returns the
    /// neighbor if its distance strictly decreased.
    fn relax(&mut self, p: usize, delta: &[isize], cost: T) -> Result<Option<usize>> {
        let Some(q) = self.lattice.neighbor(p, delta) else {
            return Ok(None);
        };
        if !self.inside[q] || !self.dist[p].is_reached() {
            return Ok(None);
        }
        let candidate = self.dist[p].add(cost);
        if candidate >= self.dist[q] {
            return Ok(None);
        }
        self.check(q, candidate)?;
        self.dist[q] = candidate;
        Ok(Some(q))
    }

    fn normalize(&mut self, factor: T) {
        for (d, &inside) in self.dist.iter_mut().zip(&self.inside) {
            if inside && d.is_reached() {
                *d = d.normalize(factor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array2};

    use super::*;
    use crate::chamfer::ChamferPreset;
    use crate::distance::lattice::Lattice2;

    fn serpentine() -> (Array2<bool>, Array2<bool>) {
        let rows = [
            "...#...",
            ".#.#.#.",
            ".#.#.#.",
            ".#.#.#.",
            ".#.#.#.",
            ".#.#.#.",
            "M#...#.",
        ];
        let mask = Array2::from_shape_fn((7, 7), |(r, c)| rows[r].as_bytes()[c] != b'#');
        let marker = Array2::from_shape_fn((7, 7), |(r, c)| rows[r].as_bytes()[c] == b'M');
        (marker, mask)
    }

    /// Distances after each phase: forward scan, backward scan, worklist.
    fn phase_snapshots(
        marker: &Array2<bool>,
        mask: &Array2<bool>,
        chamfer: &ChamferMask,
    ) -> [Vec<u32>; 3] {
        let lattice = Lattice2::from_shape(mask.shape());
        let limit = u32::max_allowed(chamfer).unwrap();
        let mut state = Propagation::new(lattice, chamfer, mask, limit);
        state.initialize(marker);
        state.forward_scan().unwrap();
        let forward = state.dist.clone();
        let worklist = state.backward_scan().unwrap();
        let backward = state.dist.clone();
        state.refine(worklist).unwrap();
        [forward, backward, state.dist]
    }

    #[test]
    fn test_each_phase_only_lowers_distances() {
        let (marker, mask) = serpentine();
        let presets = [
            ChamferPreset::CityBlock,
            ChamferPreset::Borgefors,
            ChamferPreset::ChessKnight,
        ];
        for preset in presets {
            let [forward, backward, refined] = phase_snapshots(&marker, &mask, &preset.mask());
            for site in 0..refined.len() {
                assert!(backward[site] <= forward[site], "{preset} site {site}");
                assert!(refined[site] <= backward[site], "{preset} site {site}");
            }
        }
    }

    #[test]
    fn test_forward_scan_reaches_only_down_right_of_marker() {
        // Marker in the middle: nothing above it or left of it on its row is
        // reachable through forward offsets alone.
        let marker = array![
            [false, false, false],
            [false, true, false],
            [false, false, false],
        ];
        let mask = Array2::from_elem((3, 3), true);
        let chamfer = ChamferPreset::Borgefors.mask();
        let [forward, backward, refined] = phase_snapshots(&marker, &mask, &chamfer);

        assert_eq!(&forward[..4], &[u32::MAX; 4]);
        assert_eq!(&forward[4..], &[0, 3, 4, 3, 4]);
        assert_eq!(backward, vec![4, 3, 4, 3, 0, 3, 4, 3, 4]);
        assert_eq!(refined, backward);
    }

    #[test]
    fn test_backward_scan_queues_stale_neighbors() {
        let (marker, mask) = serpentine();
        let chamfer = ChamferPreset::CityBlock.mask();
        let lattice = Lattice2::from_shape(mask.shape());
        let limit = u32::max_allowed(&chamfer).unwrap();
        let mut state = Propagation::new(lattice, &chamfer, &mask, limit);
        state.initialize(&marker);
        state.forward_scan().unwrap();
        let worklist = state.backward_scan().unwrap();
        assert!(!worklist.is_empty());
        for &q in &worklist {
            assert!(state.inside[q], "queued excluded site {q}");
            assert!(state.dist[q].is_reached(), "queued unreached site {q}");
        }
    }
}

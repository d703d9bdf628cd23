use ndarray::{Array, Dimension, IxDyn};
use num_traits::ToPrimitive;

use super::value::DistanceValue;

/// Result of a distance propagation.
#[derive(Clone, Debug)]
pub struct DistanceMap<T, D: Dimension> {
    /// Distance per site, same shape as the input mask.
    pub data: Array<T, D>,
    normalized: bool,
    excluded: usize,
    max_distance: T,
}

/// Site counts and range of a distance map.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceStats {
    pub reached: usize,
    pub unreached: usize,
    pub excluded: usize,
    pub max_distance: f64,
}

impl<T: DistanceValue, D: Dimension> DistanceMap<T, D> {
    pub(crate) fn new(data: Array<T, D>, normalized: bool, excluded: usize) -> Self {
        let max_distance = data
            .iter()
            .copied()
            .filter(|v| v.is_reached())
            .fold(T::zero(), |acc, v| if v > acc { v } else { acc });

        Self {
            data,
            normalized,
            excluded,
            max_distance,
        }
    }

    /// Largest reached distance (zero when nothing was reached).
    pub fn max_distance(&self) -> T {
        self.max_distance
    }

    /// True if values are expressed in axis-step units.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn stats(&self) -> DistanceStats {
        let reached = self.data.iter().filter(|v| v.is_reached()).count();
        DistanceStats {
            reached,
            unreached: self.data.len() - reached - self.excluded,
            excluded: self.excluded,
            max_distance: self.max_distance.to_f64().unwrap_or(f64::NAN),
        }
    }

    pub fn into_dyn(self) -> DistanceMap<T, IxDyn> {
        DistanceMap {
            data: self.data.into_dyn(),
            normalized: self.normalized,
            excluded: self.excluded,
            max_distance: self.max_distance,
        }
    }

    pub fn into_inner(self) -> Array<T, D> {
        self.data
    }
}

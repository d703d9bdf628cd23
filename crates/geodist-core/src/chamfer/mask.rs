use crate::consts::{INTEGER_WEIGHT_SCALE, MAX_OFFSET_RADIUS};
use crate::error::{GeodistError, Result};

/// Offset classes for 2D masks, as sorted absolute components.
/// Index `i` receives the `i`-th base weight.
const CLASSES_2D: [[usize; 2]; 3] = [[1, 0], [1, 1], [2, 1]];

/// Offset classes for 3D masks. The last class holds the knight moves.
const CLASSES_3D: [[usize; 3]; 4] = [[1, 0, 0], [1, 1, 0], [1, 1, 1], [2, 1, 0]];

/// A single neighbor step of a chamfer mask.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedOffset {
    /// Step along each axis, in array axis order (outermost axis first).
    pub delta: Vec<isize>,
    /// Real-valued step cost.
    pub weight: f64,
    /// Integer step cost used by bounded-integer distance maps.
    pub int_weight: u32,
}

impl WeightedOffset {
    /// True if the offset points at a site that an increasing raster scan
    /// has already visited (first non-zero component is negative).
    pub fn is_forward(&self) -> bool {
        self.delta.iter().find(|&&d| d != 0).is_some_and(|&d| d < 0)
    }
}

/// Weighted-offset neighborhood approximating Euclidean distance on a lattice.
///
/// Every offset `Δ` is paired with `-Δ` carrying the same weight, so the cost of
/// a step does not depend on its direction. Masks are immutable once built and
/// can be shared across threads.
#[derive(Clone, Debug)]
pub struct ChamferMask {
    rank: usize,
    weights: Vec<f64>,
    int_weights: Vec<u32>,
    offsets: Vec<WeightedOffset>,
    forward: Vec<WeightedOffset>,
    backward: Vec<WeightedOffset>,
}

impl ChamferMask {
    /// Build a mask of the given rank (2 or 3) from base weights ordered
    /// orthogonal, diagonal, then higher-order classes.
    ///
    /// Integer weights are derived from the real ones: integral weight sets are
    /// used as is, others are scaled so the orthogonal step is
    /// [`INTEGER_WEIGHT_SCALE`] units and rounded.
    pub fn new(rank: usize, weights: &[f64]) -> Result<Self> {
        validate_weights(rank, weights)?;
        let int_weights = derive_int_weights(weights);
        Ok(Self::build(rank, weights, &int_weights))
    }

    /// Build a mask with explicitly chosen integer weights.
    pub fn with_int_weights(rank: usize, weights: &[f64], int_weights: &[u32]) -> Result<Self> {
        validate_weights(rank, weights)?;
        if int_weights.len() != weights.len() {
            return Err(GeodistError::InvalidMask(format!(
                "{} integer weights given for {} real weights",
                int_weights.len(),
                weights.len()
            )));
        }
        if int_weights.contains(&0) {
            return Err(GeodistError::InvalidMask(
                "integer weights must be positive".into(),
            ));
        }
        Ok(Self::build(rank, weights, int_weights))
    }

    /// Assemble a mask from weights that are already known to be valid.
    pub(crate) fn build(rank: usize, weights: &[f64], int_weights: &[u32]) -> Self {
        let offsets = enumerate_offsets(rank, weights, int_weights);
        let (forward, backward): (Vec<_>, Vec<_>) =
            offsets.iter().cloned().partition(|o| o.is_forward());

        Self {
            rank,
            weights: weights.to_vec(),
            int_weights: int_weights.to_vec(),
            offsets,
            forward,
            backward,
        }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn int_weights(&self) -> &[u32] {
        &self.int_weights
    }

    /// All offsets, in lexicographic order.
    pub fn offsets(&self) -> &[WeightedOffset] {
        &self.offsets
    }

    /// Offsets pointing at neighbors already visited by an increasing scan.
    pub fn forward_offsets(&self) -> &[WeightedOffset] {
        &self.forward
    }

    /// Mirror of [`forward_offsets`](Self::forward_offsets).
    pub fn backward_offsets(&self) -> &[WeightedOffset] {
        &self.backward
    }

    /// Weight of the unit axis-aligned step.
    pub fn normalization_weight(&self) -> f64 {
        self.weights[0]
    }

    pub fn int_normalization_weight(&self) -> u32 {
        self.int_weights[0]
    }

    pub fn max_weight(&self) -> f64 {
        self.offsets.iter().map(|o| o.weight).fold(0.0, f64::max)
    }

    pub fn max_int_weight(&self) -> u32 {
        self.offsets.iter().map(|o| o.int_weight).max().unwrap_or(0)
    }

    /// Largest absolute offset component.
    pub fn radius(&self) -> usize {
        self.offsets
            .iter()
            .flat_map(|o| o.delta.iter())
            .map(|d| d.unsigned_abs())
            .max()
            .unwrap_or(0)
    }
}

fn class_count(rank: usize) -> Result<usize> {
    match rank {
        2 => Ok(CLASSES_2D.len()),
        3 => Ok(CLASSES_3D.len()),
        n => Err(GeodistError::UnsupportedDimensionality(n)),
    }
}

fn validate_weights(rank: usize, weights: &[f64]) -> Result<()> {
    let classes = class_count(rank)?;
    if weights.is_empty() {
        return Err(GeodistError::InvalidMask(
            "at least one weight is required".into(),
        ));
    }
    if weights.len() > classes {
        return Err(GeodistError::InvalidMask(format!(
            "{} weights given but a {rank}D mask has only {classes} offset classes",
            weights.len()
        )));
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w <= 0.0) {
        return Err(GeodistError::InvalidMask(format!(
            "weight {w} is not strictly positive and finite"
        )));
    }
    Ok(())
}

fn derive_int_weights(weights: &[f64]) -> Vec<u32> {
    let integral = weights
        .iter()
        .all(|w| w.fract() == 0.0 && *w <= u32::MAX as f64);
    if integral {
        return weights.iter().map(|&w| w as u32).collect();
    }

    let scale = INTEGER_WEIGHT_SCALE / weights[0];
    weights
        .iter()
        .map(|&w| (w * scale).round().clamp(1.0, u32::MAX as f64) as u32)
        .collect()
}

/// Class index of an offset, from its sorted absolute components.
fn offset_class(delta: &[isize]) -> Option<usize> {
    let mut abs: Vec<usize> = delta.iter().map(|d| d.unsigned_abs()).collect();
    abs.sort_unstable_by(|a, b| b.cmp(a));

    match abs.len() {
        2 => CLASSES_2D.iter().position(|c| c[..] == abs[..]),
        3 => CLASSES_3D.iter().position(|c| c[..] == abs[..]),
        _ => None,
    }
}

/// Enumerate every vector of the bounded neighborhood in lexicographic order
/// and keep those whose class has a weight.
fn enumerate_offsets(rank: usize, weights: &[f64], int_weights: &[u32]) -> Vec<WeightedOffset> {
    let side = (2 * MAX_OFFSET_RADIUS + 1) as usize;
    let total = side.pow(rank as u32);
    let mut offsets = Vec::new();

    for n in 0..total {
        let mut delta = vec![0isize; rank];
        let mut rest = n;
        for axis in (0..rank).rev() {
            delta[axis] = (rest % side) as isize - MAX_OFFSET_RADIUS;
            rest /= side;
        }

        if let Some(class) = offset_class(&delta).filter(|&c| c < weights.len()) {
            offsets.push(WeightedOffset {
                delta,
                weight: weights[class],
                int_weight: int_weights[class],
            });
        }
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_class_2d() {
        assert_eq!(offset_class(&[0, 1]), Some(0));
        assert_eq!(offset_class(&[-1, 1]), Some(1));
        assert_eq!(offset_class(&[1, -2]), Some(2));
        assert_eq!(offset_class(&[2, 0]), None);
        assert_eq!(offset_class(&[2, 2]), None);
        assert_eq!(offset_class(&[0, 0]), None);
    }

    #[test]
    fn test_offset_class_3d() {
        assert_eq!(offset_class(&[0, 0, -1]), Some(0));
        assert_eq!(offset_class(&[1, 0, 1]), Some(1));
        assert_eq!(offset_class(&[1, -1, 1]), Some(2));
        assert_eq!(offset_class(&[0, 2, -1]), Some(3));
        assert_eq!(offset_class(&[2, 1, 1]), None);
    }

    #[test]
    fn test_derive_int_weights_integral() {
        assert_eq!(derive_int_weights(&[3.0, 4.0]), vec![3, 4]);
    }

    #[test]
    fn test_derive_int_weights_scaled() {
        let w = derive_int_weights(&[1.0, std::f64::consts::SQRT_2, 3f64.sqrt()]);
        assert_eq!(w, vec![10, 14, 17]);
    }

    #[test]
    fn test_is_forward() {
        let o = |delta: Vec<isize>| WeightedOffset {
            delta,
            weight: 1.0,
            int_weight: 1,
        };
        assert!(o(vec![-1, 1]).is_forward());
        assert!(o(vec![0, -1]).is_forward());
        assert!(!o(vec![0, 1]).is_forward());
        assert!(!o(vec![1, -1]).is_forward());
    }
}

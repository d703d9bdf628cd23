use ndarray::{ArrayBase, ArrayD, Data, Ix2, Ix3, IxDyn};

use crate::chamfer::ChamferMask;
use crate::error::{GeodistError, Result};

use super::engine::GeodesicTransform;
use super::lattice::LatticeDim;
use super::map::DistanceMap;
use super::value::{BoundedDistance, DistanceValue, RealDistance};

/// Geodesic distance from `marker` within `mask`, as real values.
///
/// Sites outside the mask are NaN, mask sites no path reaches are `+inf`.
pub fn geodesic_distance<T, D, S1, S2>(
    marker: &ArrayBase<S1, D>,
    mask: &ArrayBase<S2, D>,
    chamfer: &ChamferMask,
    normalize: bool,
) -> Result<DistanceMap<T, D>>
where
    T: RealDistance,
    D: LatticeDim,
    S1: Data<Elem = bool>,
    S2: Data<Elem = bool>,
{
    GeodesicTransform::new(chamfer)
        .normalize(normalize)
        .compute(marker, mask)
}

/// Geodesic distance from `marker` within `mask`, as fixed-width integers.
///
/// Returns the map together with its largest reached distance. Sites outside
/// the mask and unreached sites hold the type maximum. Fails with
/// [`GeodistError::Overflow`] when a distance would not leave room for one
/// more step.
pub fn geodesic_distance_bounded<T, D, S1, S2>(
    marker: &ArrayBase<S1, D>,
    mask: &ArrayBase<S2, D>,
    chamfer: &ChamferMask,
    normalize: bool,
) -> Result<(DistanceMap<T, D>, T)>
where
    T: BoundedDistance,
    D: LatticeDim,
    S1: Data<Elem = bool>,
    S2: Data<Elem = bool>,
{
    let map = GeodesicTransform::new(chamfer)
        .normalize(normalize)
        .compute(marker, mask)?;
    let max = map.max_distance();
    Ok((map, max))
}

/// Geodesic distance over dynamically-dimensioned arrays.
///
/// Dispatches to the 2D or 3D lattice; any other rank fails with
/// [`GeodistError::UnsupportedDimensionality`].
pub fn geodesic_distance_dyn<T: DistanceValue>(
    marker: &ArrayD<bool>,
    mask: &ArrayD<bool>,
    chamfer: &ChamferMask,
    normalize: bool,
) -> Result<DistanceMap<T, IxDyn>> {
    if marker.shape() != mask.shape() {
        return Err(GeodistError::DimensionMismatch {
            expected: mask.shape().to_vec(),
            found: marker.shape().to_vec(),
        });
    }

    let transform = GeodesicTransform::new(chamfer).normalize(normalize);
    match mask.ndim() {
        2 => {
            let marker = marker.view().into_dimensionality::<Ix2>()?;
            let mask = mask.view().into_dimensionality::<Ix2>()?;
            Ok(transform.compute::<T, _, _, _>(&marker, &mask)?.into_dyn())
        }
        3 => {
            let marker = marker.view().into_dimensionality::<Ix3>()?;
            let mask = mask.view().into_dimensionality::<Ix3>()?;
            Ok(transform.compute::<T, _, _, _>(&marker, &mask)?.into_dyn())
        }
        n => Err(GeodistError::UnsupportedDimensionality(n)),
    }
}

use ndarray::{Array, ArrayBase, Data};

use crate::chamfer::ChamferMask;
use crate::error::Result;

use super::engine::GeodesicTransform;
use super::lattice::LatticeDim;
use super::map::DistanceMap;
use super::value::DistanceValue;

/// Chamfer distance from every foreground site to the nearest background site.
///
/// Background sites are 0. An image without background leaves every site
/// unreached.
pub fn distance_transform<T, D, S>(
    image: &ArrayBase<S, D>,
    chamfer: &ChamferMask,
    normalize: bool,
) -> Result<DistanceMap<T, D>>
where
    T: DistanceValue,
    D: LatticeDim,
    S: Data<Elem = bool>,
{
    let background = image.mapv(|v| !v);
    let everywhere = Array::from_elem(image.raw_dim(), true);
    GeodesicTransform::new(chamfer)
        .normalize(normalize)
        .compute(&background, &everywhere)
}

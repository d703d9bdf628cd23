use ndarray::{Array, ArrayBase, Data};
use rayon::prelude::*;
use tracing::info;

use crate::chamfer::ChamferMask;
use crate::consts::PARALLEL_BATCH_THRESHOLD;
use crate::error::Result;

use super::engine::GeodesicTransform;
use super::lattice::LatticeDim;
use super::map::DistanceMap;
use super::value::DistanceValue;

/// Geodesic distance maps for several markers sharing one mask.
///
/// Each marker is an independent propagation; runs are spread over the Rayon
/// pool and share only the chamfer mask and the mask array. Results keep the
/// input order. The first failing marker's error is returned.
pub fn geodesic_distance_batch<T, D, S>(
    markers: &[Array<bool, D>],
    mask: &ArrayBase<S, D>,
    chamfer: &ChamferMask,
    normalize: bool,
) -> Result<Vec<DistanceMap<T, D>>>
where
    T: DistanceValue,
    D: LatticeDim + Send + Sync,
    S: Data<Elem = bool> + Sync,
{
    let transform = GeodesicTransform::new(chamfer).normalize(normalize);

    let maps = if markers.len() >= PARALLEL_BATCH_THRESHOLD {
        markers
            .par_iter()
            .map(|marker| transform.compute(marker, mask))
            .collect::<Result<Vec<_>>>()?
    } else {
        markers
            .iter()
            .map(|marker| transform.compute(marker, mask))
            .collect::<Result<Vec<_>>>()?
    };

    info!(count = maps.len(), "Batch propagation complete");
    Ok(maps)
}

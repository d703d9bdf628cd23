pub mod batch;
pub mod engine;
pub mod geodesic;
pub mod lattice;
pub mod map;
pub mod transform;
pub mod value;

pub use batch::geodesic_distance_batch;
pub use engine::GeodesicTransform;
pub use geodesic::{geodesic_distance, geodesic_distance_bounded, geodesic_distance_dyn};
pub use lattice::{Lattice, Lattice2, Lattice3, LatticeDim};
pub use map::{DistanceMap, DistanceStats};
pub use transform::distance_transform;
pub use value::{BoundedDistance, DistanceValue, RealDistance};

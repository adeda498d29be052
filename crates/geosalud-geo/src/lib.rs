//! Spatial primitives for GeoSalud: CRS normalization, the kilometre→degree
//! buffer conversion, degree-space disk containment, and a point index for
//! envelope prefiltering.

pub mod distance;
pub mod index;
pub mod spatial;
pub mod transform;

pub use distance::BufferRadius;
pub use index::PointIndex;
pub use spatial::DegreeDisk;
pub use transform::{ToWgs84, WGS84_EPSG};

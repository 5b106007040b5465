pub mod point;
pub mod polyline;
pub mod segment;

pub use point::{
    CartesianCoords, CoordinateMap, Operand, PlanarCoords, PointInput, SpatialPoint,
    SphericalCoords,
};
pub use polyline::{PointId, Polyline};
pub use segment::DirectedSegment;

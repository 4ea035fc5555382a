pub mod halfspace;
pub mod polygon;
pub mod segment;
pub mod solid;

pub use halfspace::HalfSpaces;
pub use polygon::Polygon;
pub use segment::Segment;
pub use solid::{Edge, FacetPair, Solid};

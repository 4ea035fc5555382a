pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{PolyfacetError, Result};
pub use geometry::{FacetPair, Polygon, Segment, Solid};
pub use math::{Point2D, Point3D, Tolerance};

pub mod intersect_2d;
pub mod point;
pub mod polygon_2d;

pub use point::{Point2D, Point3D};

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Homogeneous 4-vector: a facet's `[nx, ny, nz, d]` or a viewpoint.
pub type Vector4 = nalgebra::Vector4<f64>;

/// 3x3 matrix type.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Dynamically sized matrix, used for half-space tables.
pub type DMatrix = nalgebra::DMatrix<f64>;

/// Default geometric tolerance for floating-point comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Tolerance configuration shared by every geometric predicate.
///
/// Segments, polygons and solids capture one of these at construction, so a
/// caller can probe how sensitive a result is to the epsilon it was built with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Absolute epsilon used for residuals, determinants and lookups.
    pub eps: f64,
}

impl Tolerance {
    #[must_use]
    pub fn new(eps: f64) -> Self {
        Self { eps }
    }

    /// True if `value` is within `eps` of zero.
    #[inline]
    #[must_use]
    pub fn is_negligible(&self, value: f64) -> bool {
        value.abs() < self.eps
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            eps: DEFAULT_TOLERANCE,
        }
    }
}

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Vector3, Vector4};
use crate::error::{InputError, Result};

/// Bit pattern used for hashing. `-0.0` and `0.0` compare equal, so they must
/// hash equal too.
#[inline]
fn hash_bits(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// Immutable 2D point.
///
/// `==` and [`Hash`] are exact component comparisons. Tolerance-based matching
/// goes through [`Point2D::coincides_with`] and never through `==`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a point from a coordinate slice of length 2.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidArity` if the slice does not hold exactly two values.
    pub fn from_slice(coords: &[f64]) -> Result<Self> {
        match *coords {
            [x, y] => Ok(Self { x, y }),
            _ => Err(InputError::InvalidArity {
                what: "Point2D",
                expected: "2",
                got: coords.len(),
            }
            .into()),
        }
    }

    #[must_use]
    pub fn coords(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Approximate equality: every component differs by less than `eps`.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() < eps && (self.y - other.y).abs() < eps
    }
}

impl Eq for Point2D {}

impl Hash for Point2D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bits(self.x).hash(state);
        hash_bits(self.y).hash(state);
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

/// Immutable 3D point with the same exact/approximate equality split as [`Point2D`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds a point from a coordinate slice of length 3.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidArity` if the slice does not hold exactly three values.
    pub fn from_slice(coords: &[f64]) -> Result<Self> {
        match *coords {
            [x, y, z] => Ok(Self { x, y, z }),
            _ => Err(InputError::InvalidArity {
                what: "Point3D",
                expected: "3",
                got: coords.len(),
            }
            .into()),
        }
    }

    #[must_use]
    pub fn coords(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    /// Approximate equality: every component differs by less than `eps`.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() < eps
            && (self.y - other.y).abs() < eps
            && (self.z - other.z).abs() < eps
    }

    #[must_use]
    pub fn to_vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Homogeneous form `[x, y, z, 1]`, matching the half-space row convention.
    #[must_use]
    pub fn to_homogeneous(&self) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, 1.0)
    }
}

impl Eq for Point3D {}

impl Hash for Point3D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bits(self.x).hash(state);
        hash_bits(self.y).hash(state);
        hash_bits(self.z).hash(state);
    }
}

impl From<[f64; 3]> for Point3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vector3> for Point3D {
    fn from(v: Vector3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn exact_equality_ignores_tolerance() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(1.0 + 1e-9, 2.0);
        assert_ne!(a, b);
        assert!(a.coincides_with(&b, 1e-5));
    }

    #[test]
    fn signed_zero_hashes_equal() {
        let mut set = HashSet::new();
        set.insert(Point2D::new(0.0, 1.0));
        assert!(set.contains(&Point2D::new(-0.0, 1.0)));
    }

    #[test]
    fn distance_2d() {
        let d = Point2D::new(0.0, 0.0).distance_to(&Point2D::new(3.0, 4.0));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn distance_3d() {
        let d = Point3D::new(1.0, 1.0, 1.0).distance_to(&Point3D::new(3.0, 4.0, 7.0));
        assert_relative_eq!(d, 7.0);
    }

    #[test]
    fn from_slice_checks_arity() {
        assert_eq!(Point2D::from_slice(&[1.0, 2.0]).unwrap(), Point2D::new(1.0, 2.0));
        assert!(Point2D::from_slice(&[1.0]).is_err());
        assert!(Point3D::from_slice(&[1.0, 2.0]).is_err());
        assert_eq!(
            Point3D::from_slice(&[1.0, 2.0, 3.0]).unwrap(),
            Point3D::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn display_format() {
        assert_eq!(Point2D::new(1.5, -2.0).to_string(), "Point(1.5, -2)");
        assert_eq!(Point3D::new(0.0, 1.0, 2.0).to_string(), "Point(0, 1, 2)");
    }

    #[test]
    fn homogeneous_appends_one() {
        let h = Point3D::new(1.0, 2.0, 3.0).to_homogeneous();
        assert_relative_eq!(h.w, 1.0);
        assert_relative_eq!(h.z, 3.0);
    }
}

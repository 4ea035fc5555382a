use std::fmt;

use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{implicit_line_intersect, ImplicitLine};
use crate::math::{Point2D, Tolerance};

/// A directed line segment together with its normalized implicit line.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    first: Point2D,
    second: Point2D,
    line: ImplicitLine,
    tol: Tolerance,
}

impl Segment {
    /// Creates a segment from `first` to `second` with the default tolerance.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if the endpoints coincide.
    pub fn new(first: Point2D, second: Point2D) -> Result<Self> {
        Self::with_tolerance(first, second, Tolerance::default())
    }

    /// Creates a segment whose predicates use `tol`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if both line coefficients
    /// `a` and `b` are negligible.
    pub fn with_tolerance(first: Point2D, second: Point2D, tol: Tolerance) -> Result<Self> {
        let line = ImplicitLine::through(&first, &second, tol)
            .ok_or(GeometryError::DegenerateSegment { first, second })?;
        Ok(Self {
            first,
            second,
            line,
            tol,
        })
    }

    /// Creates a segment from raw endpoint coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if the endpoints coincide.
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        Self::new(Point2D::new(x1, y1), Point2D::new(x2, y2))
    }

    #[must_use]
    pub fn first(&self) -> &Point2D {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &Point2D {
        &self.second
    }

    /// Normalized `(a, b, c)` of `a * x + b * y + c = 0`.
    #[must_use]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.line.a, self.line.b, self.line.c)
    }

    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Intersection point with `other`, if the two segments cross or touch.
    ///
    /// Parallel and collinear segments never report an intersection.
    #[must_use]
    pub fn intersects(&self, other: &Segment) -> Option<Point2D> {
        let candidate = implicit_line_intersect(&self.line, &other.line, self.tol)?;
        (self.contains(&candidate) && other.contains(&candidate)).then_some(candidate)
    }

    /// True if `point` is on the line (within tolerance) and inside the
    /// endpoints' coordinate range on both axes, bounds included.
    #[must_use]
    pub fn contains(&self, point: &Point2D) -> bool {
        if self.line.residual(point).abs() > self.tol.eps {
            return false;
        }
        let in_x = self.first.x.min(self.second.x) <= point.x
            && point.x <= self.first.x.max(self.second.x);
        let in_y = self.first.y.min(self.second.y) <= point.y
            && point.y <= self.first.y.max(self.second.y);
        in_x && in_y
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment({}, {})", self.first, self.second)
    }
}

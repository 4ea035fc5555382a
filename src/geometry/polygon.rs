use std::fmt;

use tracing::debug;

use super::Segment;
use crate::error::{InputError, Result};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2D, Tolerance};

/// Far endpoint of the parity ray used by [`Polygon::contains`].
const RAY_TARGET: Point2D = Point2D::new(1_234_567_890.0, 999_999_999.0);

/// Point-to-position lookup matching keys with [`Point2D::coincides_with`].
///
/// Entries are scanned in insertion order and the first approximate match wins.
#[derive(Debug, Clone, Default)]
struct PointIndex {
    entries: Vec<(Point2D, usize)>,
}

impl PointIndex {
    fn build(points: &[Point2D]) -> Self {
        let mut entries: Vec<(Point2D, usize)> = Vec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            match entries.iter_mut().find(|(key, _)| key == p) {
                Some(entry) => entry.1 = i,
                None => entries.push((*p, i)),
            }
        }
        Self { entries }
    }

    fn get(&self, point: &Point2D, eps: f64) -> Option<usize> {
        self.entries
            .iter()
            .find(|(key, _)| key.coincides_with(point, eps))
            .map(|&(_, i)| i)
    }
}

/// A closed polygon given by an ordered vertex loop.
///
/// Besides the boundary it was built from (`pure_points`), a polygon may carry
/// an arrangement boundary produced by [`Polygon::extend_points`]: the same
/// shape with every crossing of another polygon inserted as a vertex.
#[derive(Debug, Clone)]
pub struct Polygon {
    points: Vec<Point2D>,
    pure_points: Vec<Point2D>,
    segments: Vec<Segment>,
    point_index: PointIndex,
    tol: Tolerance,
}

impl Polygon {
    /// Creates a polygon from its vertex loop with the default tolerance.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewVertices` for fewer than 3 vertices, or
    /// `GeometryError::DegenerateSegment` if two consecutive vertices coincide.
    pub fn new(points: Vec<Point2D>) -> Result<Self> {
        Self::with_tolerance(points, Tolerance::default())
    }

    /// Creates a polygon whose predicates use `tol`.
    ///
    /// # Errors
    ///
    /// Same as [`Polygon::new`].
    pub fn with_tolerance(points: Vec<Point2D>, tol: Tolerance) -> Result<Self> {
        if points.len() < 3 {
            return Err(InputError::TooFewVertices { got: points.len() }.into());
        }
        let pure_points = points.clone();
        Self::assemble(points, pure_points, tol)
    }

    /// Creates a polygon from a flat `[x0, y0, x1, y1, ...]` coordinate list.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidArity` if the list has odd length, otherwise
    /// the errors of [`Polygon::new`].
    pub fn from_coords(coords: &[f64]) -> Result<Self> {
        Self::from_coords_with_tolerance(coords, Tolerance::default())
    }

    /// Flat-coordinate constructor with an explicit tolerance.
    ///
    /// # Errors
    ///
    /// Same as [`Polygon::from_coords`].
    pub fn from_coords_with_tolerance(coords: &[f64], tol: Tolerance) -> Result<Self> {
        if coords.len() % 2 == 1 {
            return Err(InputError::InvalidArity {
                what: "Polygon coordinate list",
                expected: "an even number of",
                got: coords.len(),
            }
            .into());
        }
        let points = coords
            .chunks_exact(2)
            .map(|xy| Point2D::new(xy[0], xy[1]))
            .collect();
        Self::with_tolerance(points, tol)
    }

    fn assemble(points: Vec<Point2D>, pure_points: Vec<Point2D>, tol: Tolerance) -> Result<Self> {
        let segments = build_segments(&points, tol)?;
        let point_index = PointIndex::build(&points);
        Ok(Self {
            points,
            pure_points,
            segments,
            point_index,
            tol,
        })
    }

    /// Current boundary: the arrangement boundary after `extend_points`,
    /// otherwise the construction vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Boundary as constructed, before any arrangement was inserted.
    #[must_use]
    pub fn pure_points(&self) -> &[Point2D] {
        &self.pure_points
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Position of `point` in [`Polygon::points`], matched approximately.
    #[must_use]
    pub fn index_of(&self, point: &Point2D) -> Option<usize> {
        self.point_index.get(point, self.tol.eps)
    }

    /// Index of the first boundary segment that contains `point`.
    #[must_use]
    pub fn segment_containing(&self, point: &Point2D) -> Option<usize> {
        self.segments.iter().position(|seg| seg.contains(point))
    }

    /// Every point where `segment` meets this polygon's boundary, in segment order.
    #[must_use]
    pub fn intersections_with(&self, segment: &Segment) -> Vec<Point2D> {
        self.segments
            .iter()
            .filter_map(|seg| segment.intersects(seg))
            .collect()
    }

    /// Returns the arrangement of this polygon against `other`.
    ///
    /// Each boundary segment contributes its start vertex followed by its
    /// crossings with `other`, ordered by distance from that start. Crossings
    /// that coincide with an endpoint or with the previous crossing are
    /// skipped, so extending twice against the same polygon adds nothing.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if the refined boundary
    /// cannot be segmented.
    pub fn extend_points(&self, other: &Polygon) -> Result<Polygon> {
        let eps = self.tol.eps;
        let mut extended = Vec::with_capacity(self.points.len());
        for seg in &self.segments {
            let start = seg.first();
            let mut crossings = other.intersections_with(seg);
            crossings.sort_by(|p, q| p.distance_to(start).total_cmp(&q.distance_to(start)));

            extended.push(*start);
            for crossing in crossings {
                let duplicate = crossing.coincides_with(start, eps)
                    || crossing.coincides_with(seg.second(), eps)
                    || extended
                        .last()
                        .is_some_and(|last: &Point2D| last.coincides_with(&crossing, eps));
                if !duplicate {
                    extended.push(crossing);
                }
            }
        }
        debug!(
            before = self.points.len(),
            after = extended.len(),
            "extended polygon boundary"
        );
        Self::assemble(extended, self.pure_points.clone(), self.tol)
    }

    /// Boundary-inclusive containment.
    ///
    /// Points on a boundary segment are inside. Anything else is decided by
    /// ray parity; a ray passing exactly through a vertex can miscount.
    #[must_use]
    pub fn contains(&self, point: &Point2D) -> bool {
        if self.segments.iter().any(|seg| seg.contains(point)) {
            return true;
        }
        let Ok(ray) = Segment::with_tolerance(*point, RAY_TARGET, self.tol) else {
            return false;
        };
        let hits = self
            .segments
            .iter()
            .filter(|seg| seg.intersects(&ray).is_some())
            .count();
        hits % 2 == 1
    }

    /// Signed shoelace area of the pure boundary (positive when counter-clockwise).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.pure_points)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

fn build_segments(points: &[Point2D], tol: Tolerance) -> Result<Vec<Segment>> {
    let n = points.len();
    (0..n)
        .map(|i| Segment::with_tolerance(points[i], points[(i + 1) % n], tol))
        .collect()
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon(")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::error::{GeometryError, PolyfacetError};

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn square(x0: f64, y0: f64, side: f64) -> Polygon {
        Polygon::from_coords(&[
            x0,
            y0,
            x0,
            y0 + side,
            x0 + side,
            y0 + side,
            x0 + side,
            y0,
        ])
        .unwrap()
    }

    #[test]
    fn from_coords_rejects_odd_length() {
        let err = Polygon::from_coords(&[0.0, 0.0, 1.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PolyfacetError::Input(InputError::InvalidArity { got: 5, .. })));
    }

    #[test]
    fn too_few_vertices() {
        let err = Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, PolyfacetError::Input(InputError::TooFewVertices { got: 2 })));
    }

    #[test]
    fn repeated_vertex_is_degenerate() {
        let err = Polygon::new(vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            PolyfacetError::Geometry(GeometryError::DegenerateSegment { .. })
        ));
    }

    #[test]
    fn segments_close_the_loop() {
        let sq = square(0.0, 0.0, 4.0);
        assert_eq!(sq.segments().len(), 4);
        assert_eq!(*sq.segments()[3].first(), p(4.0, 0.0));
        assert_eq!(*sq.segments()[3].second(), p(0.0, 0.0));
    }

    #[test]
    fn triangle_vertices_on_boundary_and_centroid_inside() {
        let tri = Polygon::from_coords(&[0.0, 0.0, 5.0, 1.0, 2.0, 4.0]).unwrap();
        for v in tri.points() {
            assert!(tri.contains(v));
        }
        assert!(tri.contains(&p(7.0 / 3.0, 5.0 / 3.0)));
    }

    #[test]
    fn contains_outside_points() {
        let sq = square(0.0, 0.0, 4.0);
        assert!(!sq.contains(&p(5.0, 2.0)));
        assert!(!sq.contains(&p(-1.0, -1.0)));
        assert!(sq.contains(&p(2.0, 4.0)));
        assert!(sq.contains(&p(1.0, 3.0)));
    }

    #[test]
    fn contains_concave() {
        // L-shape with the notch at the upper right.
        let l = Polygon::from_coords(&[0.0, 0.0, 0.0, 4.0, 2.0, 4.0, 2.0, 2.0, 4.0, 2.0, 4.0, 0.0])
            .unwrap();
        assert!(l.contains(&p(1.0, 3.0)));
        assert!(l.contains(&p(3.0, 1.0)));
        assert!(!l.contains(&p(3.0, 3.0)));
    }

    #[test]
    fn intersections_with_segment() {
        let sq = square(0.0, 0.0, 4.0);
        let seg = Segment::from_coords(-1.0, 1.0, 5.0, 1.0).unwrap();
        let mut hits = sq.intersections_with(&seg);
        hits.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(hits, vec![p(0.0, 1.0), p(4.0, 1.0)]);
    }

    #[test]
    fn extend_inserts_crossings_in_boundary_order() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(2.0, 2.0, 4.0);
        let ext = a.extend_points(&b).unwrap();
        assert_eq!(
            ext.points(),
            &[
                p(0.0, 0.0),
                p(0.0, 4.0),
                p(2.0, 4.0),
                p(4.0, 4.0),
                p(4.0, 2.0),
                p(4.0, 0.0),
            ]
        );
        assert_eq!(ext.pure_points(), a.points());
        assert_eq!(ext.segments().len(), 6);
        assert_abs_diff_eq!(ext.area(), a.area());
    }

    #[test]
    fn extend_sorts_multiple_crossings_by_distance() {
        let bar = Polygon::from_coords(&[0.0, 0.0, 0.0, 1.0, 10.0, 1.0, 10.0, 0.0]).unwrap();
        // A comb crossing the top edge of `bar` four times.
        let comb = Polygon::from_coords(&[
            2.0, -1.0, 2.0, 2.0, 4.0, 2.0, 4.0, -1.0, 6.0, -1.0, 6.0, 2.0, 8.0, 2.0, 8.0, -2.0,
        ])
        .unwrap();
        let ext = bar.extend_points(&comb).unwrap();
        let top: Vec<Point2D> = ext.points()[1..7].to_vec();
        assert_eq!(
            top,
            vec![
                p(0.0, 1.0),
                p(2.0, 1.0),
                p(4.0, 1.0),
                p(6.0, 1.0),
                p(8.0, 1.0),
                p(10.0, 1.0),
            ]
        );
    }

    #[test]
    fn extend_is_idempotent() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(2.0, 2.0, 4.0);
        let once = a.extend_points(&b).unwrap();
        let twice = once.extend_points(&b).unwrap();
        assert_eq!(once.points(), twice.points());
        assert_eq!(twice.pure_points(), a.points());
    }

    #[test]
    fn extend_against_disjoint_is_identity() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        assert_eq!(a.extend_points(&b).unwrap().points(), a.points());
    }

    #[test]
    fn index_of_matches_approximately() {
        let sq = square(0.0, 0.0, 4.0);
        assert_eq!(sq.index_of(&p(4.0, 4.0)), Some(2));
        assert_eq!(sq.index_of(&p(4.0 + 1e-7, 4.0 - 1e-7)), Some(2));
        assert_eq!(sq.index_of(&p(4.0, 3.0)), None);
    }

    #[test]
    fn index_tolerance_is_configurable() {
        let coarse = Polygon::from_coords_with_tolerance(
            &[0.0, 0.0, 0.0, 4.0, 4.0, 4.0, 4.0, 0.0],
            Tolerance::new(0.5),
        )
        .unwrap();
        assert_eq!(coarse.index_of(&p(0.3, 3.8)), Some(1));
    }

    #[test]
    fn segment_containing_point() {
        let sq = square(0.0, 0.0, 4.0);
        assert_eq!(sq.segment_containing(&p(2.0, 4.0)), Some(1));
        assert_eq!(sq.segment_containing(&p(2.0, 2.0)), None);
    }

    #[test]
    fn area_of_square() {
        let sq = square(0.0, 0.0, 4.0);
        assert_abs_diff_eq!(sq.area(), 16.0);
        // Vertices run clockwise.
        assert!(sq.signed_area() < 0.0);
    }

    #[test]
    fn display_format() {
        let tri = Polygon::from_coords(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(
            tri.to_string(),
            "Polygon(Point(0, 0), Point(1, 0), Point(0, 1))"
        );
    }

    proptest! {
        #[test]
        fn any_triangle_contains_vertices_and_centroid(
            coords in proptest::collection::vec(-50i32..50, 6)
        ) {
            let pts: Vec<Point2D> = coords
                .chunks_exact(2)
                .map(|c| p(f64::from(c[0]), f64::from(c[1])))
                .collect();
            prop_assume!(pts[0] != pts[1] && pts[1] != pts[2] && pts[2] != pts[0]);
            let tri = Polygon::new(pts.clone()).unwrap();
            for v in &pts {
                prop_assert!(tri.contains(v));
            }
            let centroid = p(
                (pts[0].x + pts[1].x + pts[2].x) / 3.0,
                (pts[0].y + pts[1].y + pts[2].y) / 3.0,
            );
            prop_assert!(tri.contains(&centroid));
        }
    }
}

use std::collections::HashSet;
use std::ops::Sub;

use tracing::{debug, trace};

use crate::error::{GeometryError, Result};
use crate::geometry::Polygon;
use crate::math::Point2D;

/// Computes the boundary-following difference of two simple polygons (A - B).
///
/// Both polygons are refined with each other's crossings, then result loops
/// are stitched by walking A forward while outside B and B backward while
/// inside A.
///
/// Two cases bypass stitching: A entirely within B yields nothing, and B
/// entirely within A yields `[A, B]`, the outer loop followed by the loop
/// of the hole.
pub struct Subtract<'a> {
    minuend: &'a Polygon,
    subtrahend: &'a Polygon,
}

impl<'a> Subtract<'a> {
    /// Creates a new `Subtract` operation (`minuend - subtrahend`).
    #[must_use]
    pub fn new(minuend: &'a Polygon, subtrahend: &'a Polygon) -> Self {
        Self {
            minuend,
            subtrahend,
        }
    }

    /// Executes the subtraction, returning every loop of the difference region.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::MissingVertex` if a crossing cannot be located
    /// on the partner arrangement, or a construction error if a stitched loop
    /// is degenerate.
    pub fn execute(&self) -> Result<Vec<Polygon>> {
        let a = self.minuend.extend_points(self.subtrahend)?;
        let b = self.subtrahend.extend_points(self.minuend)?;

        if a.points().iter().all(|p| self.subtrahend.contains(p)) {
            debug!("minuend lies within subtrahend, difference is empty");
            return Ok(Vec::new());
        }
        if b.points().iter().all(|p| self.minuend.contains(p)) {
            debug!("subtrahend lies within minuend, returning outer and inner loops");
            return Ok(vec![self.minuend.clone(), self.subtrahend.clone()]);
        }

        let mut stitcher = Stitcher {
            a: &a,
            b: &b,
            minuend: self.minuend,
            subtrahend: self.subtrahend,
            used: HashSet::new(),
        };
        let mut loops = Vec::new();
        while let Some(cycle) = stitcher.next_cycle()? {
            loops.push(cycle);
        }
        debug!(loops = loops.len(), "stitched difference");

        let tol = self.minuend.tolerance();
        loops
            .into_iter()
            .map(|points| Polygon::with_tolerance(points, tol))
            .collect()
    }
}

/// Walk state shared by every cycle of one subtraction.
struct Stitcher<'s> {
    a: &'s Polygon,
    b: &'s Polygon,
    minuend: &'s Polygon,
    subtrahend: &'s Polygon,
    /// Exact set: membership is decided on the very points stored in `a` and `b`.
    used: HashSet<Point2D>,
}

impl Stitcher<'_> {
    fn next_cycle(&mut self) -> Result<Option<Vec<Point2D>>> {
        let mut cycle = Vec::new();
        let mut start = self.find_start();
        while let Some(point) = start {
            start = self.follow_chain(point, &mut cycle)?;
        }
        Ok((!cycle.is_empty()).then_some(cycle))
    }

    /// First unused arrangement vertex of A that lies outside B.
    fn find_start(&self) -> Option<Point2D> {
        self.a
            .points()
            .iter()
            .find(|p| !self.used.contains(*p) && !self.subtrahend.contains(p))
            .copied()
    }

    /// Appends one A-run and the following B-run to `cycle`.
    ///
    /// Returns the vertex the next run starts from, or `None` once the cycle
    /// has closed.
    fn follow_chain(&mut self, start: Point2D, cycle: &mut Vec<Point2D>) -> Result<Option<Point2D>> {
        let (a, b) = (self.a, self.b);
        let pa = a.points();
        let pb = b.points();
        let (n, m) = (pa.len(), pb.len());

        let mut i = locate(a, &start)?;
        while !self.subtrahend.contains(&pa[i]) {
            if self.used.contains(&pa[i]) {
                return Ok(None);
            }
            cycle.push(pa[i]);
            self.used.insert(pa[i]);
            i = (i + 1) % n;
        }

        let crossing = pa[i];
        if cycle.contains(&crossing) {
            return Ok(None);
        }
        cycle.push(crossing);
        self.used.insert(crossing);
        trace!(%crossing, "switching onto subtrahend");

        let mut j = (locate(b, &crossing)? + m - 1) % m;
        while self.minuend.contains(&pb[j]) {
            cycle.push(pb[j]);
            j = (j + m - 1) % m;
        }
        let exit = pb[(j + 1) % m];
        self.used.insert(exit);
        trace!(%exit, "back onto minuend");

        let k = locate(a, &exit)?;
        Ok(Some(pa[(k + 1) % n]))
    }
}

fn locate(polygon: &Polygon, point: &Point2D) -> Result<usize> {
    polygon
        .index_of(point)
        .ok_or_else(|| GeometryError::MissingVertex(point.to_string()).into())
}

impl Sub for &Polygon {
    type Output = Result<Vec<Polygon>>;

    fn sub(self, other: Self) -> Self::Output {
        Subtract::new(self, other).execute()
    }
}

impl Polygon {
    /// Difference `self - other`; see [`Subtract`].
    ///
    /// # Errors
    ///
    /// Same as [`Subtract::execute`].
    pub fn difference(&self, other: &Polygon) -> Result<Vec<Polygon>> {
        Subtract::new(self, other).execute()
    }
}

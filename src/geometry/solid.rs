use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use super::HalfSpaces;
use crate::error::Result;
use crate::math::{DMatrix, Point3D, Tolerance, Vector4};
use crate::operations::query::{InvisibleEdges, VisibleEdges};

/// Unordered pair of facet indices, stored ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FacetPair(usize, usize);

impl FacetPair {
    #[must_use]
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self(i, j)
        } else {
            Self(j, i)
        }
    }

    #[must_use]
    pub fn facets(&self) -> (usize, usize) {
        (self.0, self.1)
    }
}

/// Polytope edge as its two end vertices.
pub type Edge = (Point3D, Point3D);

/// Convex polytope reconstructed from its half-space representation.
///
/// Vertices are enumerated combinatorially: every triple of facets whose
/// planes meet in a single feasible point contributes that point. Two vertices
/// sharing at least two facets form an edge keyed by the first two of them.
/// Columns with identical coefficients count as one facet, named by the first
/// copy.
///
/// Unbounded and empty regions are not errors; they produce no vertices and no
/// edges. A flat region keeps its corners, but every pair of corners shares the
/// two flattening planes, so several edges compete for that one key.
#[derive(Debug, Clone)]
pub struct Solid {
    half_spaces: HalfSpaces,
    points: Vec<Point3D>,
    incidence: Vec<BTreeSet<usize>>,
    edges: BTreeMap<FacetPair, Edge>,
    tol: Tolerance,
}

impl Solid {
    /// Builds a solid from a `4 x n` half-space matrix with the default tolerance.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MatrixShape` if the matrix is not `4 x n`, `n >= 4`.
    pub fn new(matrix: DMatrix) -> Result<Self> {
        Self::with_tolerance(matrix, Tolerance::default())
    }

    /// Builds a solid whose feasibility, incidence and rank tests use `tol`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MatrixShape` if the matrix is not `4 x n`, `n >= 4`.
    pub fn with_tolerance(matrix: DMatrix, tol: Tolerance) -> Result<Self> {
        Ok(Self::from_half_spaces(HalfSpaces::from_matrix(matrix)?, tol))
    }

    /// Builds a solid from one `[nx, ny, nz, d]` row per facet.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MatrixShape` for fewer than 4 facets.
    pub fn from_facets(facets: &[[f64; 4]]) -> Result<Self> {
        Ok(Self::from_half_spaces(
            HalfSpaces::from_facets(facets)?,
            Tolerance::default(),
        ))
    }

    /// Builds a solid from an already validated half-space table.
    #[must_use]
    pub fn from_half_spaces(half_spaces: HalfSpaces, tol: Tolerance) -> Self {
        let (points, incidence) = enumerate_vertices(&half_spaces, tol);
        let edges = derive_edges(&points, &incidence);
        debug!(
            facets = half_spaces.facet_count(),
            vertices = points.len(),
            edges = edges.len(),
            "reconstructed solid"
        );
        Self {
            half_spaces,
            points,
            incidence,
            edges,
            tol,
        }
    }

    #[must_use]
    pub fn half_spaces(&self) -> &HalfSpaces {
        &self.half_spaces
    }

    /// Feasible vertices in enumeration order.
    #[must_use]
    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    /// Edges keyed by the pair of facets they lie on.
    #[must_use]
    pub fn edges(&self) -> &BTreeMap<FacetPair, Edge> {
        &self.edges
    }

    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Facets passing through the stored vertex that coincides with `point`.
    #[must_use]
    pub fn incident_facets(&self, point: &Point3D) -> Option<&BTreeSet<usize>> {
        self.points
            .iter()
            .position(|p| p.coincides_with(point, self.tol.eps))
            .map(|i| &self.incidence[i])
    }

    /// True if `point` satisfies every half-space within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Point3D) -> bool {
        self.half_spaces.satisfies(point, self.tol)
    }

    /// Edges whose two facets both face away from `view`.
    #[must_use]
    pub fn invisible_edges(&self, view: &Vector4) -> Vec<Edge> {
        InvisibleEdges::new(self, *view).execute()
    }

    /// Edges drawn for `view`; see [`VisibleEdges`].
    #[must_use]
    pub fn get_visible_edges(&self, view: &Vector4) -> Vec<Edge> {
        VisibleEdges::new(self, *view).execute()
    }
}

fn enumerate_vertices(hs: &HalfSpaces, tol: Tolerance) -> (Vec<Point3D>, Vec<BTreeSet<usize>>) {
    let n = hs.facet_count();
    let mut points: Vec<Point3D> = Vec::new();
    let mut incidence = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let Some(point) = hs.meet(i, j, k, tol) else {
                    trace!(i, j, k, "facet planes do not meet in a point");
                    continue;
                };
                if !hs.satisfies(&point, tol) {
                    trace!(i, j, k, %point, "infeasible corner");
                    continue;
                }
                if points.iter().any(|p| p.coincides_with(&point, tol.eps)) {
                    continue;
                }
                incidence.push(
                    hs.incident_facets(&point, tol)
                        .map(|f| hs.canonical_facet(f))
                        .collect(),
                );
                points.push(point);
            }
        }
    }
    (points, incidence)
}

fn derive_edges(points: &[Point3D], incidence: &[BTreeSet<usize>]) -> BTreeMap<FacetPair, Edge> {
    let mut edges = BTreeMap::new();
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            let mut common = incidence[i].intersection(&incidence[j]);
            if let (Some(&f), Some(&g)) = (common.next(), common.next()) {
                edges.insert(FacetPair::new(f, g), (points[i], points[j]));
            }
        }
    }
    edges
}

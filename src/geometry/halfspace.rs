use crate::error::{InputError, Result};
use crate::math::{DMatrix, Matrix3, Point3D, Tolerance, Vector3, Vector4};

/// Half-space table of a convex polytope.
///
/// Column `i` holds facet `i` as `[nx, ny, nz, d]`; a point `p` satisfies the
/// facet iff `n · p + d >= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfSpaces {
    matrix: DMatrix,
}

impl HalfSpaces {
    /// Wraps a `4 x n` matrix, `n >= 4`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MatrixShape` for any other shape.
    pub fn from_matrix(matrix: DMatrix) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        if rows != 4 || cols < 4 {
            return Err(InputError::MatrixShape { rows, cols }.into());
        }
        Ok(Self { matrix })
    }

    /// Builds the table from one `[nx, ny, nz, d]` row per facet.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MatrixShape` for fewer than 4 facets.
    pub fn from_facets(facets: &[[f64; 4]]) -> Result<Self> {
        let matrix = DMatrix::from_fn(4, facets.len(), |r, c| facets[c][r]);
        Self::from_matrix(matrix)
    }

    #[must_use]
    pub fn matrix(&self) -> &DMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.matrix.ncols()
    }

    /// Plane coefficients `[nx, ny, nz, d]` of facet `i`.
    #[must_use]
    pub fn facet(&self, i: usize) -> Vector4 {
        Vector4::new(
            self.matrix[(0, i)],
            self.matrix[(1, i)],
            self.matrix[(2, i)],
            self.matrix[(3, i)],
        )
    }

    /// Lowest column index holding exactly the same coefficients as facet `i`.
    ///
    /// Repeated columns describe one plane, so incidence and edge keys are
    /// expressed in these indices.
    #[must_use]
    pub fn canonical_facet(&self, i: usize) -> usize {
        let plane = self.facet(i);
        (0..i).find(|&j| self.facet(j) == plane).unwrap_or(i)
    }

    /// Facet values `n · p + d` for every facet, in column order.
    pub fn evaluate(&self, homogeneous: &Vector4) -> impl Iterator<Item = f64> + '_ {
        let h = *homogeneous;
        (0..self.facet_count()).map(move |i| self.facet(i).dot(&h))
    }

    /// True if `point` satisfies every facet within tolerance.
    #[must_use]
    pub fn satisfies(&self, point: &Point3D, tol: Tolerance) -> bool {
        self.evaluate(&point.to_homogeneous()).all(|v| v >= -tol.eps)
    }

    /// Indices of facets whose plane passes through `point` within tolerance.
    pub fn incident_facets(&self, point: &Point3D, tol: Tolerance) -> impl Iterator<Item = usize> + '_ {
        self.evaluate(&point.to_homogeneous())
            .enumerate()
            .filter(move |&(_, v)| tol.is_negligible(v))
            .map(|(i, _)| i)
    }

    /// Indices of facets whose coefficients have a negative dot product with `view`.
    #[must_use]
    pub fn back_facing(&self, view: &Vector4) -> Vec<usize> {
        self.evaluate(view)
            .enumerate()
            .filter(|&(_, v)| v < 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Common point of the planes of facets `i`, `j` and `k`.
    ///
    /// Returns `None` when their normals are rank-deficient.
    #[must_use]
    pub fn meet(&self, i: usize, j: usize, k: usize, tol: Tolerance) -> Option<Point3D> {
        let rows = [self.facet(i), self.facet(j), self.facet(k)];
        let normals = Matrix3::from_fn(|r, c| rows[r][c]);
        if normals.rank(tol.eps) < 3 {
            return None;
        }
        let rhs = Vector3::new(-rows[0].w, -rows[1].w, -rows[2].w);
        normals.lu().solve(&rhs).map(Point3D::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::PolyfacetError;

    fn unit_cube() -> HalfSpaces {
        HalfSpaces::from_facets(&[
            [1.0, 0.0, 0.0, 1.0],
            [-1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, -1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, -1.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn rejects_wrong_shape() {
        let err = HalfSpaces::from_matrix(DMatrix::zeros(3, 5)).unwrap_err();
        assert!(matches!(
            err,
            PolyfacetError::Input(InputError::MatrixShape { rows: 3, cols: 5 })
        ));
        assert!(HalfSpaces::from_facets(&[[1.0, 0.0, 0.0, 0.0]; 3]).is_err());
    }

    #[test]
    fn facets_are_columns() {
        let hs = unit_cube();
        assert_eq!(hs.facet_count(), 6);
        assert_eq!(hs.facet(1), Vector4::new(-1.0, 0.0, 0.0, 1.0));
        assert_abs_diff_eq!(hs.matrix()[(0, 1)], -1.0);
    }

    #[test]
    fn satisfies_within_tolerance() {
        let hs = unit_cube();
        let tol = Tolerance::default();
        assert!(hs.satisfies(&Point3D::new(0.0, 0.0, 0.0), tol));
        assert!(hs.satisfies(&Point3D::new(1.0 + 1e-7, 0.0, 0.0), tol));
        assert!(!hs.satisfies(&Point3D::new(1.1, 0.0, 0.0), tol));
    }

    #[test]
    fn corner_incidence() {
        let hs = unit_cube();
        let facets: Vec<usize> = hs
            .incident_facets(&Point3D::new(1.0, -1.0, 1.0), Tolerance::default())
            .collect();
        assert_eq!(facets, vec![1, 2, 5]);
    }

    #[test]
    fn repeated_column_maps_to_first_copy() {
        let hs = HalfSpaces::from_facets(&[
            [1.0, 0.0, 0.0, 1.0],
            [-1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [-1.0, 0.0, 0.0, 1.0],
            [2.0, 0.0, 0.0, 2.0],
        ])
        .unwrap();
        assert_eq!(hs.canonical_facet(1), 1);
        assert_eq!(hs.canonical_facet(3), 1);
        // Scaled copies are distinct columns.
        assert_eq!(hs.canonical_facet(4), 4);
    }

    #[test]
    fn three_planes_meet_at_corner() {
        let hs = unit_cube();
        let p = hs.meet(0, 2, 4, Tolerance::default()).unwrap();
        assert_abs_diff_eq!(p.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_planes_do_not_meet() {
        assert!(unit_cube().meet(0, 1, 2, Tolerance::default()).is_none());
    }

    #[test]
    fn back_facing_by_sign() {
        let hs = unit_cube();
        assert_eq!(hs.back_facing(&Vector4::new(-5.0, 0.0, 0.0, -1.0)), vec![0, 2, 3, 4, 5]);
    }
}

use std::collections::BTreeSet;

use crate::geometry::{Edge, FacetPair, Solid};
use crate::math::{Point3D, Vector4};

/// Finds the edges of a solid whose two facets both face away from a viewpoint.
///
/// A facet faces away when its coefficients have a negative dot product with
/// the homogeneous `view`.
pub struct InvisibleEdges<'a> {
    solid: &'a Solid,
    view: Vector4,
}

impl<'a> InvisibleEdges<'a> {
    /// Creates a new `InvisibleEdges` query.
    #[must_use]
    pub fn new(solid: &'a Solid, view: Vector4) -> Self {
        Self { solid, view }
    }

    /// Executes the query, returning the hidden edges in facet-pair order.
    #[must_use]
    pub fn execute(&self) -> Vec<Edge> {
        self.keys()
            .into_iter()
            .filter_map(|key| self.solid.edges().get(&key).copied())
            .collect()
    }

    /// Facet pairs made of two back-facing facets. Pairs that do not bound an
    /// edge are included; lookups simply miss.
    fn keys(&self) -> BTreeSet<FacetPair> {
        let half_spaces = self.solid.half_spaces();
        let back: Vec<usize> = half_spaces
            .back_facing(&self.view)
            .into_iter()
            .map(|f| half_spaces.canonical_facet(f))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut keys = BTreeSet::new();
        for (n, &i) in back.iter().enumerate() {
            for &j in &back[n + 1..] {
                keys.insert(FacetPair::new(i, j));
            }
        }
        keys
    }
}

/// Finds the edges of a solid to draw for a viewpoint.
///
/// Visible edges are all edges minus the [`InvisibleEdges`] of the *negated*
/// viewpoint. For a homogeneous eye position `[x, y, z, 1]` the negation turns
/// "facet plane faces the eye" into a negative dot product.
pub struct VisibleEdges<'a> {
    solid: &'a Solid,
    view: Vector4,
}

impl<'a> VisibleEdges<'a> {
    /// Creates a new `VisibleEdges` query for a homogeneous viewpoint.
    #[must_use]
    pub fn new(solid: &'a Solid, view: Vector4) -> Self {
        Self { solid, view }
    }

    /// Creates the query for an eye position, using `[x, y, z, 1]` as viewpoint.
    #[must_use]
    pub fn from_eye(solid: &'a Solid, eye: &Point3D) -> Self {
        Self::new(solid, eye.to_homogeneous())
    }

    /// Executes the query, returning visible edges in facet-pair order.
    #[must_use]
    pub fn execute(&self) -> Vec<Edge> {
        let hidden = InvisibleEdges::new(self.solid, -self.view).keys();
        self.solid
            .edges()
            .iter()
            .filter(|(key, _)| !hidden.contains(*key))
            .map(|(_, edge)| *edge)
            .collect()
    }
}

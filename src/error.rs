use thiserror::Error;

use crate::math::Point2D;

/// Top-level error type for the polyfacet kernel.
#[derive(Debug, Error)]
pub enum PolyfacetError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while validating caller-supplied coordinates and matrices.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{what} expects {expected} values, got {got}")]
    InvalidArity {
        what: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("polygon needs at least 3 vertices, got {got}")]
    TooFewVertices { got: usize },

    #[error("half-space matrix must be 4 x n with n >= 4, got {rows} x {cols}")]
    MatrixShape { rows: usize, cols: usize },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate segment between {first} and {second}")]
    DegenerateSegment { first: Point2D, second: Point2D },

    #[error("vertex not found on arrangement: {0}")]
    MissingVertex(String),
}

/// Convenience type alias for results using [`PolyfacetError`].
pub type Result<T> = std::result::Result<T, PolyfacetError>;

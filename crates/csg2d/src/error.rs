//! Error type shared by the geometry operations.

use thiserror::Error;

/// Errors raised by geometric constructions and queries.
///
/// Every variant describes malformed or degenerate input. None of them are
/// retried internally; callers decide whether to simplify the input and try
/// again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A direction was requested from a vector of (near) zero length, e.g. a
    /// segment whose endpoints coincide.
    #[error("cannot derive a direction from a zero-length vector")]
    ZeroLength,

    /// A polygon operation received fewer points than it needs.
    #[error("polygon needs at least 3 points, got {count}")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// BSP construction recursed past the configured depth bound.
    #[error("BSP construction exceeded the maximum depth of {max_depth}")]
    DepthExceeded {
        /// The configured bound.
        max_depth: usize,
    },

    /// Ear clipping ran out of ears before reaching the final triangle.
    #[error("no ear left with {remaining} vertices remaining; polygon is not simple")]
    NoEar {
        /// Vertices still unclipped when the search stalled.
        remaining: usize,
    },

    /// A serialized edge points past the end of the vertex list.
    #[error("edge {edge} references vertex {index}, but only {count} vertices exist")]
    InvalidVertexIndex {
        /// Position of the offending edge.
        edge: usize,
        /// The dangling vertex index.
        index: usize,
        /// Number of vertices available.
        count: usize,
    },

    /// Two stored edges cross away from a shared endpoint.
    #[error("edges {first} and {second} cross at ({x}, {y})")]
    EdgesCross {
        first: usize,
        second: usize,
        x: f64,
        y: f64,
    },

    /// Two stored edges run along each other for more than the tolerance.
    #[error("edges {first} and {second} overlap")]
    EdgesOverlap { first: usize, second: usize },
}

/// Result alias for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

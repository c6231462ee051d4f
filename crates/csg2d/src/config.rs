//! Tunable tolerances for BSP construction and loop reassembly.

use serde::{Deserialize, Serialize};

use crate::LINE_EPSILON;

/// Default bound on BSP recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Default squared distance under which a segment start continues a loop.
pub const DEFAULT_JOIN_TOLERANCE: f64 = 1.0;

/// Configuration carried by BSP nodes and CSG shapes.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// partial JSON object such as `{"max_depth": 100}` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsgConfig {
    /// Half-plane classification tolerance.
    pub epsilon: f64,
    /// Deepest level [`BspNode::build`](crate::BspNode::build) may reach.
    pub max_depth: usize,
    /// Squared join distance used by [`Csg::to_polygons`](crate::Csg::to_polygons).
    pub join_tolerance: f64,
}

impl Default for CsgConfig {
    fn default() -> Self {
        Self {
            epsilon: LINE_EPSILON,
            max_depth: DEFAULT_MAX_DEPTH,
            join_tolerance: DEFAULT_JOIN_TOLERANCE,
        }
    }
}

impl CsgConfig {
    /// Sets the half-plane classification tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the BSP recursion bound.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the squared distance used to chain segments into loops.
    #[must_use]
    pub fn with_join_tolerance(mut self, join_tolerance: f64) -> Self {
        self.join_tolerance = join_tolerance;
        self
    }
}

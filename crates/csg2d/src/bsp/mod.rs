//! Binary Space Partitioning tree over directed 2D segments.
//!
//! The tree recursively partitions the plane using lines taken from its own
//! segments. It supports the three primitives the boolean operations in
//! [`Csg`](crate::Csg) are assembled from:
//!
//! - [`BspNode::invert`]: complement the region
//! - [`BspNode::clip_to`]: trim one tree's segments to another's region
//! - [`BspNode::build`]: add segments to an existing tree
//!
//! # Example
//!
//! ```ignore
//! use csg2d::{BspNode, Segment, Vector};
//!
//! let segments: Vec<Segment> = /* a closed boundary */;
//! let mut tree = BspNode::from_segments(segments)?;
//! tree.invert();
//! let flipped = tree.all_segments();
//! ```

mod node;

pub use node::BspNode;

//! Planar wire networks: undirected edges between shared vertices, kept
//! free of crossings as segments are added.
//!
//! # Architecture
//!
//! - [`WireNetwork`]: incremental vertex/edge store with tolerance merging
//! - [`segment_intersection`]: the segment/segment test the network uses
//! - [`NetworkData`]: serializable `{vertices, edges}` snapshot

mod intersect;
mod network;

pub use intersect::{INTERSECT_EPSILON, Intersection, segment_intersection};
pub use network::{DEFAULT_WIRE_TOLERANCE, Edge, NetworkData, WireNetwork};

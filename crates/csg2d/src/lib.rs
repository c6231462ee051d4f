//! 2D constructive solid geometry over directed line segments.
//!
//! Regions are described only by their boundary segments. Boolean
//! combination runs on BSP (Binary Space Partitioning) trees built from
//! those segments, and the results can be chained back into point loops,
//! simplified, or triangulated.
//!
//! # Example
//!
//! ```ignore
//! use csg2d::Csg;
//!
//! let a = Csg::from_polygons([[[0.0, 0.0], [15.0, 0.0], [15.0, 15.0], [0.0, 15.0]]])?;
//! let b = Csg::from_polygons([[[10.0, 10.0], [30.0, 10.0], [30.0, 30.0], [10.0, 30.0]]])?;
//!
//! let loops = a.union(&b)?.to_polygons();
//! assert_eq!(loops[0].len(), 11);
//! ```
//!
//! # Modules
//!
//! - [`bsp`]: the partitioning tree behind the boolean operations
//! - [`triangulate`]: ear clipping for simple rings
//! - [`path`]: Ramer-Douglas-Peucker simplification
//! - [`wire`]: planar networks of non-crossing edges

pub mod bsp;
mod config;
mod csg;
mod error;
mod holes;
mod implicit_line;
mod line;
pub mod path;
mod polygon;
mod segment;
mod split;
pub mod triangulate;
mod vector;
pub mod wire;

pub use bsp::BspNode;
pub use config::{CsgConfig, DEFAULT_JOIN_TOLERANCE, DEFAULT_MAX_DEPTH};
pub use csg::Csg;
pub use error::{GeometryError, Result};
pub use holes::{HoleBridge, RayHit, find_hole_bridge, ray_segment_intersection};
pub use implicit_line::{ImplicitLine, NORMALIZE_EPSILON};
pub use line::{Classification, LINE_EPSILON, Line, LineSide};
pub use polygon::{Polygon, Shape, signed_area, triangle_contains};
pub use segment::Segment;
pub use split::Split;
pub use vector::{POINT_EPSILON, Vector};

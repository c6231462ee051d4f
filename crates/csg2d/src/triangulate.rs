//! Polygon triangulation using ear clipping.
//!
//! Converts a simple polygon into triangles that exactly cover it.
//!
//! # Algorithm
//!
//! - A vertex is reflex when its interior angle, measured with the ring's
//!   orientation, exceeds π. Reflex vertices are never ears.
//! - A convex vertex is an ear when no other ring vertex lies in the
//!   triangle it forms with its neighbours. Points on the triangle's
//!   boundary block the ear; points coinciding with its corners don't.
//! - The lowest-index ear is clipped first, then only its two neighbours
//!   are re-examined.
//!
//! The output order is fully determined by the input order.
//!
//! # Complexity
//!
//! - Time: O(n²) for a ring with n vertices
//! - Space: O(n)

use std::collections::BTreeSet;
use std::f64::consts::{PI, TAU};

use tracing::trace;

use crate::polygon::{signed_area, triangle_contains};
use crate::{GeometryError, Polygon, Result, Vector};

/// Triangulates a ring, returning vertex index triples into `points`.
///
/// Each triangle is `[previous, ear, next]` in ring order, so triangles keep
/// the winding of the input.
///
/// # Errors
/// - [`GeometryError::TooFewPoints`] for fewer than three points
/// - [`GeometryError::NoEar`] when the ring is not simple and clipping stalls
pub fn ear_clip(points: &[Vector]) -> Result<Vec<[usize; 3]>> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::TooFewPoints { count: n });
    }

    let ccw = signed_area(points) > 0.0;
    let mut active: Vec<usize> = (0..n).collect();
    let mut ears: BTreeSet<usize> = (0..n)
        .filter(|&k| is_ear(points, &active, k, ccw))
        .collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while active.len() > 3 {
        let Some(&ear) = ears.first() else {
            return Err(GeometryError::NoEar {
                remaining: active.len(),
            });
        };

        // `active` stays sorted, so the ear's position is its partition point.
        let k = active.partition_point(|&i| i < ear);
        let (prev, next) = neighbours(&active, k);
        trace!(prev, ear, next, "clipping ear");
        triangles.push([prev, ear, next]);

        active.remove(k);
        ears.remove(&ear);

        let len = active.len();
        for position in [(k + len - 1) % len, k % len] {
            let vertex = active[position];
            if is_ear(points, &active, position, ccw) {
                ears.insert(vertex);
            } else {
                ears.remove(&vertex);
            }
        }
    }

    triangles.push([active[0], active[1], active[2]]);
    Ok(triangles)
}

/// Triangulates a polygon into three-point polygons.
///
/// # Errors
/// See [`ear_clip`].
pub fn triangulate(polygon: &Polygon) -> Result<Vec<Polygon>> {
    let points = polygon.points();
    let triangles = ear_clip(points)?;

    Ok(triangles
        .into_iter()
        .map(|[a, b, c]| Polygon::new(vec![points[a], points[b], points[c]]))
        .collect())
}

fn neighbours(active: &[usize], k: usize) -> (usize, usize) {
    let len = active.len();
    (active[(k + len - 1) % len], active[(k + 1) % len])
}

/// Interior angle at `vertex` for a ring of the given orientation.
fn interior_angle(prev: Vector, vertex: Vector, next: Vector, ccw: bool) -> f64 {
    let to_prev = (prev.y() - vertex.y()).atan2(prev.x() - vertex.x());
    let to_next = (next.y() - vertex.y()).atan2(next.x() - vertex.x());

    let angle = if ccw {
        to_prev - to_next
    } else {
        to_next - to_prev
    };
    angle.rem_euclid(TAU)
}

fn is_ear(points: &[Vector], active: &[usize], k: usize, ccw: bool) -> bool {
    let vertex = active[k];
    let (prev, next) = neighbours(active, k);
    let (a, b, c) = (points[prev], points[vertex], points[next]);

    if interior_angle(a, b, c, ccw) > PI {
        return false;
    }

    !active
        .iter()
        .filter(|&&j| j != prev && j != vertex && j != next)
        .map(|&j| points[j])
        .any(|p| p != a && p != b && p != c && triangle_contains(p, a, b, c))
}

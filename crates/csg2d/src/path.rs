//! Ramer-Douglas-Peucker simplification of point paths.
//!
//! Distances are measured to the infinite line through the current
//! endpoints, not to the segment between them.

use crate::{Polygon, Shape, Vector};

/// Distance from `point` to the infinite line through `a` and `b`.
///
/// Falls back to the distance to `a` when `a` and `b` coincide.
pub fn point_line_distance(point: Vector, a: Vector, b: Vector) -> f64 {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    let length = (dx * dx + dy * dy).sqrt();

    if length < f64::EPSILON {
        return point.dist(a);
    }

    (dy * point.x() - dx * point.y() + b.x() * a.y() - b.y() * a.x()).abs() / length
}

/// Simplifies a path, keeping both endpoints and every point needed to stay
/// within `tolerance` of the input.
///
/// Paths with fewer than three points are returned unchanged.
pub fn reduce_points(points: &[Vector], tolerance: f64) -> Vec<Vector> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;
    reduce_range(points, 0, n - 1, tolerance, &mut keep);

    points
        .iter()
        .zip(keep)
        .filter_map(|(&point, kept)| kept.then_some(point))
        .collect()
}

fn reduce_range(points: &[Vector], start: usize, end: usize, tolerance: f64, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_distance = 0.0;
    let mut max_index = start;
    for i in (start + 1)..end {
        let distance = point_line_distance(points[i], points[start], points[end]);
        if distance > max_distance {
            max_distance = distance;
            max_index = i;
        }
    }

    if max_distance > tolerance {
        keep[max_index] = true;
        reduce_range(points, start, max_index, tolerance, keep);
        reduce_range(points, max_index, end, tolerance, keep);
    }
}

/// Simplifies a polygon ring. The ring is treated as an open path from its
/// first to its last point.
pub fn reduce_polygon(polygon: &Polygon, tolerance: f64) -> Polygon {
    Polygon::new(reduce_points(polygon.points(), tolerance))
}

/// Simplifies every loop of every shape.
pub fn reduce_shapes(shapes: &[Shape], tolerance: f64) -> Vec<Shape> {
    shapes
        .iter()
        .map(|shape| {
            Shape::new(
                reduce_polygon(shape.outer(), tolerance),
                shape
                    .holes()
                    .iter()
                    .map(|hole| reduce_polygon(hole, tolerance))
                    .collect(),
            )
        })
        .collect()
}

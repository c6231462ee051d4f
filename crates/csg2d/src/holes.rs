//! Bridge search for connecting holes to an outer boundary.
//!
//! Ear clipping only handles a single ring. A shape with holes can be turned
//! into one ring by cutting a bridge from each hole to the outer boundary;
//! this module finds where those bridges land.

use crate::{GeometryError, Polygon, Result, Shape, Vector};

/// Where a ray first meets a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance travelled along the (normalized) ray.
    pub distance: f64,
    pub point: Vector,
}

/// A bridge from a hole vertex to a point on an outer edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleBridge {
    /// Index of the bridging vertex in the hole ring.
    pub hole_vertex: usize,
    /// Index `i` of the outer edge `outer[i] -> outer[(i + 1) % n]` that is hit.
    pub outer_edge: usize,
    /// Where the bridge meets the outer edge.
    pub point: Vector,
}

fn perp_dot(a: Vector, b: Vector) -> f64 {
    a.x() * b.y() - a.y() * b.x()
}

/// Casts a ray from `origin` along `direction` against segment `a -> b`.
///
/// Parallel segments never report a hit.
///
/// # Errors
/// Returns [`GeometryError::ZeroLength`] if `direction` has zero length.
pub fn ray_segment_intersection(
    origin: Vector,
    direction: Vector,
    a: Vector,
    b: Vector,
) -> Result<Option<RayHit>> {
    let direction = direction.unit().ok_or(GeometryError::ZeroLength)?;
    let edge = b - a;

    let denom = perp_dot(direction, edge);
    if denom.abs() < f64::EPSILON {
        return Ok(None);
    }

    let offset = a - origin;
    let distance = perp_dot(offset, edge) / denom;
    let along_edge = perp_dot(offset, direction) / denom;

    if distance >= 0.0 && (0.0..=1.0).contains(&along_edge) {
        Ok(Some(RayHit {
            distance,
            point: origin + direction * distance,
        }))
    } else {
        Ok(None)
    }
}

/// Finds the bridge for one hole: a ray cast in `+x` from the hole's
/// rightmost vertex to the nearest outer edge it hits.
///
/// Returns `Ok(None)` if the ray misses the outer ring, which means the hole
/// is not inside it.
///
/// # Errors
/// Returns [`GeometryError::TooFewPoints`] if either ring has fewer than
/// three points.
pub fn find_hole_bridge(outer: &Polygon, hole: &Polygon) -> Result<Option<HoleBridge>> {
    for ring in [outer, hole] {
        if ring.len() < 3 {
            return Err(GeometryError::TooFewPoints { count: ring.len() });
        }
    }

    let points = hole.points();
    let mut hole_vertex = 0;
    for (i, point) in points.iter().enumerate() {
        if point.x() > points[hole_vertex].x() {
            hole_vertex = i;
        }
    }
    let origin = points[hole_vertex];

    let ring = outer.points();
    let mut best: Option<(usize, RayHit)> = None;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        if let Some(hit) = ray_segment_intersection(origin, Vector::new(1.0, 0.0), a, b)? {
            if best.is_none_or(|(_, current)| hit.distance < current.distance) {
                best = Some((i, hit));
            }
        }
    }

    Ok(best.map(|(outer_edge, hit)| HoleBridge {
        hole_vertex,
        outer_edge,
        point: hit.point,
    }))
}

impl Shape {
    // TODO: splice each hole into the outer ring at its bridge so shapes
    // with holes can go through `ear_clip`.

    /// Bridges for every hole, in hole order.
    ///
    /// # Errors
    /// See [`find_hole_bridge`].
    pub fn hole_bridges(&self) -> Result<Vec<Option<HoleBridge>>> {
        self.holes()
            .iter()
            .map(|hole| find_hole_bridge(self.outer(), hole))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::new(vec![v(min, min), v(max, min), v(max, max), v(min, max)])
    }

    #[test]
    fn ray_hits_vertical_segment() {
        let hit = ray_segment_intersection(v(0.0, 5.0), v(2.0, 0.0), v(10.0, 0.0), v(10.0, 10.0))
            .unwrap()
            .unwrap();

        assert_eq!(hit.distance, 10.0);
        assert_eq!(hit.point, v(10.0, 5.0));
    }

    #[test]
    fn ray_misses_behind_and_parallel() {
        let behind =
            ray_segment_intersection(v(20.0, 5.0), v(1.0, 0.0), v(10.0, 0.0), v(10.0, 10.0));
        assert_eq!(behind.unwrap(), None);

        let parallel =
            ray_segment_intersection(v(0.0, 0.0), v(1.0, 0.0), v(5.0, 0.0), v(10.0, 0.0));
        assert_eq!(parallel.unwrap(), None);

        let above = ray_segment_intersection(v(0.0, 20.0), v(1.0, 0.0), v(10.0, 0.0), v(10.0, 10.0));
        assert_eq!(above.unwrap(), None);
    }

    #[test]
    fn zero_direction_is_an_error() {
        let err = ray_segment_intersection(v(0.0, 0.0), v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, GeometryError::ZeroLength);
    }

    #[test]
    fn bridge_from_rightmost_hole_vertex() {
        let outer = square(0.0, 10.0);
        let hole = Polygon::new(vec![v(2.0, 2.0), v(2.0, 4.0), v(4.0, 4.0), v(4.0, 2.0)]);

        let bridge = find_hole_bridge(&outer, &hole).unwrap().unwrap();
        assert_eq!(bridge.hole_vertex, 2);
        assert_eq!(bridge.outer_edge, 1);
        assert_eq!(bridge.point, v(10.0, 4.0));
    }

    #[test]
    fn hole_outside_has_no_bridge() {
        let outer = square(0.0, 10.0);
        let hole = square(20.0, 22.0);
        assert_eq!(find_hole_bridge(&outer, &hole).unwrap(), None);
    }

    #[test]
    fn degenerate_rings_are_rejected() {
        let outer = square(0.0, 10.0);
        let hole = Polygon::new(vec![v(1.0, 1.0), v(2.0, 1.0)]);
        assert_eq!(
            find_hole_bridge(&outer, &hole).unwrap_err(),
            GeometryError::TooFewPoints { count: 2 }
        );
    }

    #[test]
    fn shape_bridges_each_hole() {
        let shape = Shape::new(square(0.0, 10.0), vec![square(2.0, 3.0), square(6.0, 7.0)]);
        let bridges = shape.hole_bridges().unwrap();

        assert_eq!(bridges.len(), 2);
        assert_eq!(bridges[0].unwrap().point, v(10.0, 2.0));
        assert_eq!(bridges[1].unwrap().point, v(10.0, 6.0));
    }
}

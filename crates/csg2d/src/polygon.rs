//! Simple polygon and shape (outer loop plus holes) representations.

use crate::{POINT_EPSILON, Vector};

/// An ordered ring of points. The closing edge from the last point back to
/// the first is implicit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Vector>,
}

impl Polygon {
    /// Creates a new polygon from a list of points.
    pub fn new(points: Vec<Vector>) -> Self {
        Self { points }
    }

    /// Creates a polygon from a loop whose last point repeats the first,
    /// as returned by [`Csg::to_polygons`](crate::Csg::to_polygons).
    /// The repeated point is dropped.
    pub fn from_closed_loop(mut points: Vec<Vector>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    /// The ring, without a repeated closing point.
    #[inline]
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    /// Consumes the polygon, returning its points.
    pub fn into_points(self) -> Vec<Vector> {
        self.points
    }

    /// Number of points in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the ring has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the signed area is positive.
    #[inline]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Returns the ring with its point order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Closed point-in-polygon test: points on the boundary count as inside.
    ///
    /// Boundary points are caught by [`Polygon::on_boundary`] first, the
    /// rest are decided by even-odd ray casting. Rings with fewer than three
    /// points contain nothing.
    pub fn contains(&self, point: Vector) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        if self.on_boundary(point) {
            return true;
        }

        let points = &self.points;
        let mut inside = false;
        let mut j = points.len() - 1;
        for i in 0..points.len() {
            let (pi, pj) = (points[i], points[j]);
            if (pi.y() > point.y()) != (pj.y() > point.y()) {
                let x = pi.x() + (point.y() - pi.y()) * (pj.x() - pi.x()) / (pj.y() - pi.y());
                if point.x() < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Whether `point` lies within [`POINT_EPSILON`] of any edge, including
    /// the closing edge.
    pub fn on_boundary(&self, point: Vector) -> bool {
        let n = self.points.len();
        (0..n).any(|i| on_edge(point, self.points[i], self.points[(i + 1) % n]))
    }

    /// Moves every point by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for point in &mut self.points {
            point.translate(dx, dy);
        }
    }

    /// Rotates every point about the origin by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        for point in &mut self.points {
            point.rotate(angle);
        }
    }
}

impl From<Vec<Vector>> for Polygon {
    fn from(points: Vec<Vector>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Vector> for Polygon {
    fn from_iter<I: IntoIterator<Item = Vector>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Shoelace signed area of a ring, positive for counter-clockwise order.
pub fn signed_area(points: &[Vector]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice_area += a.x() * b.y() - b.x() * a.y();
    }
    twice_area / 2.0
}

fn on_edge(point: Vector, a: Vector, b: Vector) -> bool {
    let edge = b - a;
    let length = edge.length();
    if length <= POINT_EPSILON {
        return point.dist(a) <= POINT_EPSILON;
    }

    let offset = point - a;
    let across = (edge.x() * offset.y() - edge.y() * offset.x()) / length;
    let along = edge.dot(offset) / length;
    across.abs() <= POINT_EPSILON && (-POINT_EPSILON..=length + POINT_EPSILON).contains(&along)
}

fn sign(p1: Vector, p2: Vector, p3: Vector) -> f64 {
    (p1.x() - p3.x()) * (p2.y() - p3.y()) - (p2.x() - p3.x()) * (p1.y() - p3.y())
}

/// Inclusive point-in-triangle test, independent of winding.
///
/// Points on an edge or corner count as inside.
pub fn triangle_contains(point: Vector, a: Vector, b: Vector, c: Vector) -> bool {
    let d1 = sign(point, a, b);
    let d2 = sign(point, b, c);
    let d3 = sign(point, c, a);

    let has_neg = d1 < -POINT_EPSILON || d2 < -POINT_EPSILON || d3 < -POINT_EPSILON;
    let has_pos = d1 > POINT_EPSILON || d2 > POINT_EPSILON || d3 > POINT_EPSILON;

    !(has_neg && has_pos)
}

/// An outer boundary with zero or more holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    outer: Polygon,
    holes: Vec<Polygon>,
}

impl Shape {
    /// Creates a shape from an outer boundary and its holes.
    pub fn new(outer: Polygon, holes: Vec<Polygon>) -> Self {
        Self { outer, holes }
    }

    /// Splits loops into a shape: the first loop is the outer boundary and
    /// the rest are holes. Returns `None` for an empty list.
    pub fn from_loops(loops: Vec<Polygon>) -> Option<Self> {
        let mut loops = loops.into_iter();
        let outer = loops.next()?;
        Some(Self::new(outer, loops.collect()))
    }

    /// The outer boundary.
    #[inline]
    pub fn outer(&self) -> &Polygon {
        &self.outer
    }

    /// Holes inside the outer boundary.
    #[inline]
    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    /// Iterates over the outer boundary followed by the holes.
    pub fn loops(&self) -> impl Iterator<Item = &Polygon> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// Outer area minus hole areas.
    pub fn area(&self) -> f64 {
        self.outer.area() - self.holes.iter().map(Polygon::area).sum::<f64>()
    }

    /// Closed test: inside or on the outer boundary, and not strictly
    /// inside any hole. Hole boundaries belong to the shape.
    pub fn contains(&self, point: Vector) -> bool {
        self.outer.contains(point)
            && !self
                .holes
                .iter()
                .any(|hole| hole.contains(point) && !hole.on_boundary(point))
    }
}

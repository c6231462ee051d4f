//! Segment/segment intersection with colinear overlap reporting.

use crate::{ImplicitLine, Vector};

/// Tolerance for parallelism, on-line and in-range tests.
pub const INTERSECT_EPSILON: f64 = 1e-9;

/// How two segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The segments cross or touch at a single point.
    Point(Vector),
    /// The segments are colinear and share the range `lo..=hi`, with `lo`
    /// before `hi` in point order. The range may be a single point when the
    /// segments only touch end to end.
    Overlap(Vector, Vector),
}

fn ranges_overlap(mut a: f64, mut b: f64, mut c: f64, mut d: f64) -> bool {
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }
    if c > d {
        std::mem::swap(&mut c, &mut d);
    }
    a.max(c) <= b.min(d) + INTERSECT_EPSILON
}

fn between(l: f64, r: f64, x: f64) -> bool {
    l.min(r) <= x + INTERSECT_EPSILON && x <= l.max(r) + INTERSECT_EPSILON
}

fn det(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a * d - b * c
}

fn ordered(p: Vector, q: Vector) -> (Vector, Vector) {
    if q < p { (q, p) } else { (p, q) }
}

/// Intersects segment `a-b` with segment `c-d`.
///
/// Returns `None` when they are disjoint, including parallel segments on
/// different lines.
pub fn segment_intersection(a: Vector, b: Vector, c: Vector, d: Vector) -> Option<Intersection> {
    if !ranges_overlap(a.x(), b.x(), c.x(), d.x()) || !ranges_overlap(a.y(), b.y(), c.y(), d.y()) {
        return None;
    }

    let m = ImplicitLine::through(a, b);
    let n = ImplicitLine::through(c, d);
    let zn = det(m.a(), m.b(), n.a(), n.b());

    if zn.abs() < INTERSECT_EPSILON {
        if m.dist(c).abs() > INTERSECT_EPSILON || n.dist(a).abs() > INTERSECT_EPSILON {
            return None;
        }
        let (a, b) = ordered(a, b);
        let (c, d) = ordered(c, d);
        let lo = if a < c { c } else { a };
        let hi = if b < d { b } else { d };
        return Some(Intersection::Overlap(lo, hi));
    }

    let x = -det(m.c(), m.b(), n.c(), n.b()) / zn;
    let y = -det(m.a(), m.c(), n.a(), n.c()) / zn;

    let on_both = between(a.x(), b.x(), x)
        && between(a.y(), b.y(), y)
        && between(c.x(), d.x(), x)
        && between(c.y(), d.y(), y);

    on_both.then(|| Intersection::Point(Vector::new(x, y)))
}

//! Directed line representation and half-plane classification for BSP trees.

use crate::{GeometryError, Result, Vector};

/// Default epsilon for half-plane classification.
/// Points within this distance of the line are considered "on" the line.
pub const LINE_EPSILON: f64 = 1e-5;

/// Which side of a line a point lies on.
///
/// Sides are named by the sign of the normal test `normal · (p - origin)`:
/// negative is `Right`, positive is `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSide {
    /// Normal test below `-epsilon`
    Right,
    /// Normal test above `epsilon`
    Left,
    /// Point lies on the line (within epsilon tolerance)
    Colinear,
}

/// Classification of a segment relative to a splitting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Both endpoints right of the line (or one on it)
    Right,
    /// Both endpoints left of the line (or one on it)
    Left,
    /// Both endpoints on the line
    Colinear,
    /// One endpoint on each side
    Spanning,
}

impl Classification {
    /// Combines the sides of a segment's two endpoints.
    pub fn from_sides(start: LineSide, end: LineSide) -> Self {
        use LineSide::{Colinear, Left, Right};

        match (start, end) {
            (Colinear, Colinear) => Classification::Colinear,
            (Right | Colinear, Right | Colinear) => Classification::Right,
            (Left | Colinear, Left | Colinear) => Classification::Left,
            (Right, Left) | (Left, Right) => Classification::Spanning,
        }
    }
}

/// An infinite directed line through `origin` along a unit `direction`.
///
/// The `normal` is the direction rotated a quarter turn clockwise,
/// `(direction.y, -direction.x)`, and is kept in sync on [`Line::flip`].
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    origin: Vector,
    direction: Vector,
    normal: Vector,
}

impl Line {
    /// Creates a line from a point and a direction.
    /// The direction will be normalized automatically.
    ///
    /// # Errors
    /// Returns [`GeometryError::ZeroLength`] if the direction has zero length.
    pub fn new(origin: Vector, direction: Vector) -> Result<Self> {
        let direction = direction.unit().ok_or(GeometryError::ZeroLength)?;
        Ok(Self::from_unit(origin, direction))
    }

    /// Creates the line through `a` heading towards `b`.
    ///
    /// # Errors
    /// Returns [`GeometryError::ZeroLength`] if the points coincide.
    pub fn from_points(a: Vector, b: Vector) -> Result<Self> {
        Self::new(a, b - a)
    }

    /// Builds a line from an already normalized direction.
    pub(crate) fn from_unit(origin: Vector, direction: Vector) -> Self {
        Self {
            origin,
            direction,
            normal: Vector::new(direction.y(), -direction.x()),
        }
    }

    /// A point on the line.
    #[inline]
    pub fn origin(&self) -> Vector {
        self.origin
    }

    /// Returns the unit direction of the line.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Returns the unit normal used as the half-plane test axis.
    #[inline]
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Reverses the line in place. The origin is unchanged.
    pub fn flip(&mut self) {
        self.direction = self.direction.negated();
        self.normal = self.normal.negated();
    }

    /// Returns a reversed copy of this line.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            direction: self.direction.negated(),
            normal: self.normal.negated(),
        }
    }

    /// Computes the signed distance from a point to the line along the normal.
    #[inline]
    pub fn signed_distance(&self, point: Vector) -> f64 {
        self.normal.dot(point - self.origin)
    }

    /// Classifies which side of the line a point lies on.
    /// Uses the default `LINE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Vector) -> LineSide {
        self.classify_point_with_epsilon(point, LINE_EPSILON)
    }

    /// Classifies which side of the line a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: Vector, epsilon: f64) -> LineSide {
        let t = self.signed_distance(point);
        if t < -epsilon {
            LineSide::Right
        } else if t > epsilon {
            LineSide::Left
        } else {
            LineSide::Colinear
        }
    }

    /// Returns `true` if both lines point the same way.
    #[inline]
    pub fn faces_same_direction(&self, other: &Line) -> bool {
        self.normal.dot(other.normal) > 0.0
    }

    /// Computes where the segment `start -> end` crosses this line.
    ///
    /// Returns `Some((t, point))` with `t` the interpolation parameter
    /// (0.0 = start, 1.0 = end), or `None` if the segment is parallel to the
    /// line or doesn't reach it.
    pub fn intersect_segment(&self, start: Vector, end: Vector) -> Option<(f64, Vector)> {
        let denom = self.normal.dot(end - start);

        if denom.abs() < f64::EPSILON {
            return None;
        }

        let t = self.normal.dot(self.origin - start) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some((t, start.lerp(end, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn from_points_vertical() {
        let line = Line::from_points(v(0.0, 0.0), v(0.0, 10.0)).unwrap();

        assert_eq!(line.origin(), v(0.0, 0.0));
        assert_eq!(line.direction(), v(0.0, 1.0));
        assert_eq!(line.normal(), v(1.0, 0.0));
    }

    #[test]
    fn from_points_horizontal() {
        let line = Line::from_points(v(0.0, 0.0), v(5.0, 0.0)).unwrap();

        assert_eq!(line.direction().x(), 1.0);
        assert_eq!(line.direction().y(), 0.0);
    }

    #[test]
    fn from_coincident_points_fails() {
        let err = Line::from_points(v(1.0, 1.0), v(1.0, 1.0)).unwrap_err();
        assert_eq!(err, GeometryError::ZeroLength);
    }

    #[test]
    fn flip_keeps_origin() {
        let mut line = Line::from_points(v(0.0, 0.0), v(0.0, 10.0)).unwrap();
        line.flip();

        assert_eq!(line.origin(), v(0.0, 0.0));
        assert_eq!(line.direction(), v(0.0, -1.0));
        assert_eq!(line.normal(), v(-1.0, 0.0));
        assert_eq!(line, Line::from_points(v(0.0, 0.0), v(0.0, -10.0)).unwrap());
    }

    #[test]
    fn flip_twice_is_identity() {
        let line = Line::from_points(v(3.0, -1.0), v(7.0, 4.0)).unwrap();
        let mut twice = line.clone();
        twice.flip();
        twice.flip();
        assert_eq!(line, twice);
        assert_eq!(line.flipped().flipped(), line);
    }

    #[test]
    fn classify_uses_normal_sign() {
        // Upward line: normal points to +x.
        let line = Line::from_points(v(0.0, 0.0), v(0.0, 10.0)).unwrap();

        assert_eq!(line.classify_point(v(-1.0, 5.0)), LineSide::Right);
        assert_eq!(line.classify_point(v(1.0, 5.0)), LineSide::Left);
        assert_eq!(line.classify_point(v(0.0, 50.0)), LineSide::Colinear);
        assert_eq!(line.classify_point(v(1e-7, 5.0)), LineSide::Colinear);
        assert_eq!(
            line.classify_point_with_epsilon(v(1e-7, 5.0), 1e-9),
            LineSide::Left
        );
    }

    #[test]
    fn classification_from_sides() {
        use LineSide::*;

        assert_eq!(Classification::from_sides(Colinear, Colinear), Classification::Colinear);
        assert_eq!(Classification::from_sides(Colinear, Right), Classification::Right);
        assert_eq!(Classification::from_sides(Left, Colinear), Classification::Left);
        assert_eq!(Classification::from_sides(Right, Left), Classification::Spanning);
        assert_eq!(Classification::from_sides(Left, Right), Classification::Spanning);
    }

    #[test]
    fn intersect_segment_midpoint() {
        let line = Line::from_points(v(0.0, 0.0), v(0.0, 10.0)).unwrap();
        let (t, point) = line.intersect_segment(v(-10.0, 2.0), v(10.0, 2.0)).unwrap();

        assert!((t - 0.5).abs() < 1e-12);
        assert_eq!(point, v(0.0, 2.0));
        assert!(line.intersect_segment(v(1.0, 0.0), v(1.0, 5.0)).is_none());
        assert!(line.intersect_segment(v(1.0, 0.0), v(5.0, 0.0)).is_none());
    }
}

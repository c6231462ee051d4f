//! Planar vector/point value type.
//!
//! [`Vector`] carries a `z` component so 3D callers can pass data through,
//! but every metric operation (dot product, length, distance, equality and
//! ordering) is planar and ignores `z`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::{Point2, Rotation2, Vector2, Vector3};

/// Absolute tolerance for point equality and ordering.
/// Coordinates closer than this are considered identical.
pub const POINT_EPSILON: f64 = 1e-9;

/// A 2D position (with a passive `z`) compared up to [`POINT_EPSILON`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector {
    coords: Vector3<f64>,
}

impl Vector {
    /// Creates a planar vector with `z = 0`.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self::new_3d(x, y, 0.0)
    }

    /// Creates a vector with an explicit `z` component.
    #[inline]
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: Vector3::new(x, y, z),
        }
    }

    /// The `x` component.
    #[inline]
    pub fn x(&self) -> f64 {
        self.coords.x
    }

    /// The `y` component.
    #[inline]
    pub fn y(&self) -> f64 {
        self.coords.y
    }

    /// The passive `z` component, zero for planar vectors.
    #[inline]
    pub fn z(&self) -> f64 {
        self.coords.z
    }

    /// Returns the underlying nalgebra coordinates.
    #[inline]
    pub fn coords(&self) -> &Vector3<f64> {
        &self.coords
    }

    /// Returns `[x, y]`.
    #[inline]
    pub fn to_array(&self) -> [f64; 2] {
        [self.x(), self.y()]
    }

    /// Component-wise sum.
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        Vector {
            coords: self.coords + other.coords,
        }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn minus(self, other: Vector) -> Vector {
        Vector {
            coords: self.coords - other.coords,
        }
    }

    /// Scales every component by `a`.
    #[inline]
    pub fn times(self, a: f64) -> Vector {
        Vector {
            coords: self.coords * a,
        }
    }

    /// Divides every component by `a`.
    #[inline]
    pub fn divide_by(self, a: f64) -> Vector {
        Vector {
            coords: self.coords / a,
        }
    }

    /// Reverses the vector.
    #[inline]
    pub fn negated(self) -> Vector {
        Vector {
            coords: -self.coords,
        }
    }

    /// Planar dot product.
    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.x() * other.x() + self.y() * other.y()
    }

    /// Full 3D cross product.
    #[inline]
    pub fn cross(self, other: Vector) -> Vector {
        Vector {
            coords: self.coords.cross(&other.coords),
        }
    }

    /// Planar length.
    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns this vector scaled to unit length.
    ///
    /// Returns `None` if the vector is too short to have a direction.
    pub fn unit(self) -> Option<Vector> {
        let len = self.length();
        if len > f64::EPSILON {
            Some(self.divide_by(len))
        } else {
            None
        }
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    #[inline]
    pub fn lerp(self, other: Vector, t: f64) -> Vector {
        self.plus(other.minus(self).times(t))
    }

    /// Planar distance to `other`.
    #[inline]
    pub fn dist(self, other: Vector) -> f64 {
        self.squared_length_to(other).sqrt()
    }

    /// Squared planar distance to `other`, cheaper than [`Vector::dist`].
    #[inline]
    pub fn squared_length_to(self, other: Vector) -> f64 {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        dx * dx + dy * dy
    }

    /// Equality of `x` and `y` within `epsilon`.
    #[inline]
    pub fn approx_eq(self, other: Vector, epsilon: f64) -> bool {
        (self.x() - other.x()).abs() <= epsilon && (self.y() - other.y()).abs() <= epsilon
    }

    /// Lexicographic `(x, y)` ordering within `epsilon`.
    #[inline]
    pub fn approx_lt(self, other: Vector, epsilon: f64) -> bool {
        self.x() < other.x() - epsilon
            || ((self.x() - other.x()).abs() <= epsilon && self.y() < other.y() - epsilon)
    }

    /// Moves this point in place.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.coords.x += dx;
        self.coords.y += dy;
    }

    /// Rotates this point in place about the origin by `angle` radians
    /// (counter-clockwise).
    pub fn rotate(&mut self, angle: f64) {
        let rotated = Rotation2::new(angle) * Vector2::new(self.x(), self.y());
        self.coords.x = rotated.x;
        self.coords.y = rotated.y;
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other, POINT_EPSILON)
    }
}

impl PartialOrd for Vector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.approx_lt(*other, POINT_EPSILON) {
            Some(Ordering::Less)
        } else if other.approx_lt(*self, POINT_EPSILON) {
            Some(Ordering::Greater)
        } else {
            Some(Ordering::Equal)
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {}, {})", self.x(), self.y(), self.z())
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.minus(rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.times(rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        self.divide_by(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.negated()
    }
}

impl From<[f64; 2]> for Vector {
    fn from(p: [f64; 2]) -> Self {
        Vector::new(p[0], p[1])
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Vector::new(x, y)
    }
}

impl From<Point2<f64>> for Vector {
    fn from(p: Point2<f64>) -> Self {
        Vector::new(p.x, p.y)
    }
}

impl From<Vector> for Point2<f64> {
    fn from(v: Vector) -> Self {
        Point2::new(v.x(), v.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn new_is_planar() {
        let p = Vector::new(0.0, 1.0);
        assert_eq!(p.x(), 0.0);
        assert_eq!(p.y(), 1.0);
        assert_eq!(p.z(), 0.0);
    }

    #[test]
    fn display_format() {
        assert_eq!(Vector::new(-4.0, 3.0).to_string(), "Vector(-4, 3, 0)");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = Vector::new(0.0, 0.0);
        let b = Vector::new(-1.0, 0.0);
        assert!(b < a);
        assert!(!(a < b));

        let c = Vector::new(0.0, 1.0);
        assert!(a < c);
    }

    #[test]
    fn equality_tolerates_round_off() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(1.0 + 1e-12, 2.0 - 1e-12);
        assert_eq!(a, b);
        assert_ne!(a, Vector::new(1.0, 2.001));
    }

    #[test]
    fn subtraction_and_distance() {
        let a = Vector::new(0.0, 0.0);
        let b = Vector::new(-1.0, 0.0);
        let c = a - b;
        assert_eq!(c.x(), 1.0);
        assert_eq!(c.y(), 0.0);

        assert_eq!(a.dist(Vector::new(3.0, 4.0)), 5.0);
        assert_eq!(a.squared_length_to(Vector::new(3.0, 4.0)), 25.0);
    }

    #[test]
    fn lerp_midpoint() {
        let v = Vector::new(0.0, 10.0).lerp(Vector::new(0.0, -10.0), 0.5);
        assert!(v.x().abs() < 1e-12);
        assert!(v.y().abs() < 1e-12);
    }

    #[test]
    fn unit_of_zero_is_none() {
        assert!(Vector::new(0.0, 0.0).unit().is_none());
        let u = Vector::new(3.0, 4.0).unit().unwrap();
        assert!((u.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cross_uses_z() {
        let z = Vector::new(1.0, 0.0).cross(Vector::new(0.0, 1.0));
        assert_eq!(z.z(), 1.0);
        assert_eq!(z.x(), 0.0);
    }

    #[test]
    fn translate_and_rotate() {
        let mut p = Vector::new(1.0, 0.0);
        p.translate(1.0, 2.0);
        assert_eq!(p, Vector::new(2.0, 2.0));

        let mut q = Vector::new(1.0, 0.0);
        q.rotate(FRAC_PI_2);
        assert!(q.approx_eq(Vector::new(0.0, 1.0), 1e-12));
    }

    #[test]
    fn nalgebra_round_trip() {
        let p: Point2<f64> = Vector::new(1.5, -2.0).into();
        assert_eq!(Vector::from(p), Vector::new(1.5, -2.0));
    }

    proptest! {
        #[test]
        fn ordering_is_antisymmetric(
            ax in -1e3f64..1e3, ay in -1e3f64..1e3,
            bx in -1e3f64..1e3, by in -1e3f64..1e3,
        ) {
            let a = Vector::new(ax, ay);
            let b = Vector::new(bx, by);
            prop_assert!(!(a < b && b < a));
            prop_assert_eq!(a == b, a.partial_cmp(&b) == Some(Ordering::Equal));
        }
    }
}

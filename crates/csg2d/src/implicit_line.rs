//! Implicit `a·x + b·y + c = 0` line form used for distance queries.

use crate::Vector;

/// Coefficient norm below which a line is left unnormalized.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// A line through two points in implicit form.
///
/// When the two points are distinct the coefficients are scaled so that
/// `(a, b)` has unit length, and [`ImplicitLine::dist`] is then the signed
/// Euclidean distance. Coincident points give an unnormalized, degenerate line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitLine {
    a: f64,
    b: f64,
    c: f64,
}

impl ImplicitLine {
    /// Normalized line through `p` and `q`. Coincident points leave the
    /// coefficients unnormalized (all zero).
    pub fn through(p: Vector, q: Vector) -> Self {
        let a = p.y() - q.y();
        let b = q.x() - p.x();
        let c = p.x() * q.y() - q.x() * p.y();

        let norm = (a * a + b * b).sqrt();
        if norm > NORMALIZE_EPSILON {
            Self {
                a: a / norm,
                b: b / norm,
                c: c / norm,
            }
        } else {
            Self { a, b, c }
        }
    }

    /// Unit normal `x` component.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Unit normal `y` component.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Offset term.
    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Signed distance from `point` to the line.
    #[inline]
    pub fn dist(&self, point: Vector) -> f64 {
        self.a * point.x() + self.b * point.y() + self.c
    }
}

//! Directed boundary segments, the unit of geometry stored in BSP trees.

use std::fmt;

use crate::{Classification, GeometryError, Line, Result, Vector};

/// A directed edge `start -> end` of a polygon boundary.
///
/// Each segment carries the line it lies on and an optional `shared` tag
/// identifying the input loop it came from. Pieces produced by splitting
/// keep the tag of their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    vertices: [Vector; 2],
    shared: Option<usize>,
    line: Line,
}

impl Segment {
    /// Creates an untagged segment.
    ///
    /// # Errors
    /// Returns [`GeometryError::ZeroLength`] if the endpoints coincide.
    pub fn new(start: Vector, end: Vector) -> Result<Self> {
        Self::with_shared(start, end, None)
    }

    /// Creates a segment carrying a `shared` tag.
    ///
    /// # Errors
    /// Returns [`GeometryError::ZeroLength`] if the endpoints coincide.
    pub fn with_shared(start: Vector, end: Vector, shared: Option<usize>) -> Result<Self> {
        let line = Line::from_points(start, end)?;
        Ok(Self {
            vertices: [start, end],
            shared,
            line,
        })
    }

    /// Builds a piece of an existing segment that keeps the parent's direction.
    pub(crate) fn piece(start: Vector, end: Vector, shared: Option<usize>, parent: &Line) -> Self {
        Self {
            vertices: [start, end],
            shared,
            line: Line::from_unit(start, parent.direction()),
        }
    }

    /// Both endpoints, start first.
    #[inline]
    pub fn vertices(&self) -> &[Vector; 2] {
        &self.vertices
    }

    /// Where the segment begins.
    #[inline]
    pub fn start(&self) -> Vector {
        self.vertices[0]
    }

    /// Where the segment ends.
    #[inline]
    pub fn end(&self) -> Vector {
        self.vertices[1]
    }

    /// Returns the tag of the input loop this segment came from, if any.
    #[inline]
    pub fn shared(&self) -> Option<usize> {
        self.shared
    }

    /// Returns the line this segment lies on.
    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Distance between the endpoints.
    pub fn length(&self) -> f64 {
        self.start().dist(self.end())
    }

    /// Reverses the segment in place: swaps the endpoints and flips the line.
    pub fn flip(&mut self) {
        self.vertices.swap(0, 1);
        self.line.flip();
    }

    /// Returns a reversed copy of this segment.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut segment = self.clone();
        segment.flip();
        segment
    }

    /// Classifies this segment relative to a line.
    ///
    /// # Returns
    /// - `Colinear` if both endpoints lie on the line
    /// - `Right` / `Left` if the endpoints are on one side (or on the line)
    /// - `Spanning` if the endpoints are on opposite sides
    pub fn classify(&self, line: &Line, epsilon: f64) -> Classification {
        Classification::from_sides(
            line.classify_point_with_epsilon(self.start(), epsilon),
            line.classify_point_with_epsilon(self.end(), epsilon),
        )
    }

    /// Moves both endpoints by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) -> Result<()> {
        let [mut start, mut end] = self.vertices;
        start.translate(dx, dy);
        end.translate(dx, dy);
        *self = Self::with_shared(start, end, self.shared)?;
        Ok(())
    }

    /// Rotates both endpoints about the origin by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> Result<()> {
        let [mut start, mut end] = self.vertices;
        start.rotate(angle);
        end.rotate(angle);
        *self = Self::with_shared(start, end, self.shared)?;
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment({} -> {})", self.start(), self.end())
    }
}

impl TryFrom<([f64; 2], [f64; 2])> for Segment {
    type Error = GeometryError;

    fn try_from((start, end): ([f64; 2], [f64; 2])) -> Result<Self> {
        Self::new(start.into(), end.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn segment_line_matches_endpoints() {
        let segment = Segment::new(v(0.0, 0.0), v(0.0, 10.0)).unwrap();

        assert_eq!(segment.start(), v(0.0, 0.0));
        assert_eq!(segment.end(), v(0.0, 10.0));
        assert_eq!(segment.line().origin(), v(0.0, 0.0));
        assert_eq!(segment.line().direction(), v(0.0, 1.0));
        assert_eq!(segment.shared(), None);
        assert_eq!(segment.length(), 10.0);
    }

    #[test]
    fn zero_length_segment_is_rejected() {
        assert_eq!(
            Segment::new(v(2.0, 2.0), v(2.0, 2.0)).unwrap_err(),
            GeometryError::ZeroLength
        );
    }

    #[test]
    fn flip_swaps_endpoints_and_line() {
        let mut segment = Segment::with_shared(v(0.0, 0.0), v(10.0, 0.0), Some(3)).unwrap();
        segment.flip();

        assert_eq!(segment.start(), v(10.0, 0.0));
        assert_eq!(segment.end(), v(0.0, 0.0));
        assert_eq!(segment.line().direction(), v(-1.0, 0.0));
        assert_eq!(segment.shared(), Some(3));
    }

    #[test]
    fn classify_against_vertical_line() {
        let line = Line::from_points(v(0.0, 0.0), v(0.0, 10.0)).unwrap();
        let eps = crate::LINE_EPSILON;

        let on = Segment::new(v(0.0, 20.0), v(0.0, 30.0)).unwrap();
        let right = Segment::new(v(-5.0, 0.0), v(-1.0, 3.0)).unwrap();
        let left = Segment::new(v(0.0, 0.0), v(4.0, 3.0)).unwrap();
        let spanning = Segment::new(v(-10.0, 0.0), v(10.0, 0.0)).unwrap();

        assert_eq!(on.classify(&line, eps), Classification::Colinear);
        assert_eq!(right.classify(&line, eps), Classification::Right);
        assert_eq!(left.classify(&line, eps), Classification::Left);
        assert_eq!(spanning.classify(&line, eps), Classification::Spanning);
    }

    #[test]
    fn translate_keeps_tag() {
        let mut segment = Segment::with_shared(v(0.0, 0.0), v(1.0, 0.0), Some(1)).unwrap();
        segment.translate(2.0, 3.0).unwrap();

        assert_eq!(segment.start(), v(2.0, 3.0));
        assert_eq!(segment.end(), v(3.0, 3.0));
        assert_eq!(segment.line().origin(), v(2.0, 3.0));
        assert_eq!(segment.shared(), Some(1));
    }

    #[test]
    fn display_format() {
        let segment = Segment::try_from(([0.0, 0.0], [1.0, 2.0])).unwrap();
        assert_eq!(
            segment.to_string(),
            "Segment(Vector(0, 0, 0) -> Vector(1, 2, 0))"
        );
    }

    proptest! {
        #[test]
        fn flip_is_an_involution(
            ax in -100.0f64..100.0, ay in -100.0f64..100.0,
            dx in 0.5f64..50.0, dy in -50.0f64..50.0,
        ) {
            let segment = Segment::new(v(ax, ay), v(ax + dx, ay + dy)).unwrap();
            let twice = segment.flipped().flipped();
            prop_assert_eq!(twice, segment);
        }
    }
}

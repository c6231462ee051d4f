//! Segment splitting against a partitioning line.

use crate::{Classification, LINE_EPSILON, Line, LineSide, Segment};

/// Where a segment goes relative to a splitting line.
///
/// Colinear segments are routed by facing: a segment whose line points the
/// same way as the splitter is `ColinearRight`, otherwise `ColinearLeft`.
#[derive(Debug, Clone, PartialEq)]
pub enum Split {
    ColinearRight(Segment),
    ColinearLeft(Segment),
    Right(Segment),
    Left(Segment),
    /// The segment crosses the line and has been cut in two.
    Spanning { right: Segment, left: Segment },
}

impl Line {
    /// Splits a segment by this line using the default `LINE_EPSILON`.
    #[inline]
    pub fn split_segment(&self, segment: Segment) -> Split {
        self.split_segment_with_epsilon(segment, LINE_EPSILON)
    }

    /// Splits a segment by this line.
    ///
    /// # Return values by classification
    ///
    /// - **Colinear**: `ColinearRight` or `ColinearLeft` depending on facing
    /// - **Right** / **Left**: the segment unchanged
    /// - **Spanning**: two pieces meeting at the crossing point, both keeping
    ///   the segment's `shared` tag and direction
    pub fn split_segment_with_epsilon(&self, segment: Segment, epsilon: f64) -> Split {
        match segment.classify(self, epsilon) {
            Classification::Colinear => {
                if segment.line().faces_same_direction(self) {
                    Split::ColinearRight(segment)
                } else {
                    Split::ColinearLeft(segment)
                }
            }
            Classification::Right => Split::Right(segment),
            Classification::Left => Split::Left(segment),
            Classification::Spanning => self.cut_spanning(&segment, epsilon),
        }
    }

    fn cut_spanning(&self, segment: &Segment, epsilon: f64) -> Split {
        let [start, end] = *segment.vertices();
        let t = self.normal().dot(self.origin() - start) / self.normal().dot(end - start);
        let crossing = start.lerp(end, t);

        let first = Segment::piece(start, crossing, segment.shared(), segment.line());
        let second = Segment::piece(crossing, end, segment.shared(), segment.line());

        if self.classify_point_with_epsilon(start, epsilon) == LineSide::Right {
            Split::Spanning {
                right: first,
                left: second,
            }
        } else {
            Split::Spanning {
                right: second,
                left: first,
            }
        }
    }
}

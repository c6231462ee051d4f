//! Boolean operations on regions bounded by directed segments.
//!
//! A [`Csg`] is a flat list of boundary segments. Each boolean operation
//! builds two fresh BSP trees from copies of the operands, combines them
//! with a fixed invert/clip/build sequence, and returns the surviving
//! segments as a new `Csg`. The operands are never modified.

use tracing::{debug, instrument};

use crate::{BspNode, CsgConfig, Result, Segment, Vector};

/// A region described only by its boundary segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Csg {
    segments: Vec<Segment>,
    config: CsgConfig,
}

impl Csg {
    /// Creates an empty region with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing boundary segments with the default config.
    ///
    /// The segments are taken as given; no closure check is made.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            config: CsgConfig::default(),
        }
    }

    /// Builds a region from closed point loops.
    ///
    /// Each loop `i` contributes the edges `p[j] -> p[(j + 1) % n]`, all
    /// tagged with `shared = Some(i)`. Empty loops are skipped.
    ///
    /// # Errors
    /// Returns [`GeometryError::ZeroLength`](crate::GeometryError::ZeroLength)
    /// if a loop has two consecutive equal points.
    pub fn from_polygons<I, L, P>(polygons: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = P>,
        P: Into<Vector>,
    {
        let mut segments = Vec::new();
        for (index, polygon) in polygons.into_iter().enumerate() {
            let points: Vec<Vector> = polygon.into_iter().map(Into::into).collect();
            let n = points.len();
            for j in 0..n {
                segments.push(Segment::with_shared(
                    points[j],
                    points[(j + 1) % n],
                    Some(index),
                )?);
            }
        }
        Ok(Self::from_segments(segments))
    }

    /// Builds an untagged region from a single closed ring of points.
    pub fn from_vectors(vectors: &[Vector]) -> Result<Self> {
        let n = vectors.len();
        let segments = (0..n)
            .map(|j| Segment::new(vectors[j], vectors[(j + 1) % n]))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_segments(segments))
    }

    /// Replaces the configuration used by the boolean operations.
    ///
    /// The receiver's config governs both trees of an operation; the other
    /// operand's config is ignored.
    #[must_use]
    pub fn with_config(mut self, config: CsgConfig) -> Self {
        self.config = config;
        self
    }

    /// The tolerances used by the boolean operations.
    #[inline]
    pub fn config(&self) -> &CsgConfig {
        &self.config
    }

    /// The boundary segments, in no particular order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the region, returning its boundary segments.
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Whether the region has no boundary at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the complement: a copy with every segment flipped.
    #[must_use]
    pub fn inverse(&self) -> Csg {
        Csg {
            segments: self.segments.iter().map(Segment::flipped).collect(),
            config: self.config,
        }
    }

    /// Builds a tree from `operand`'s segments using this region's config.
    fn tree(&self, operand: &Csg) -> Result<BspNode> {
        BspNode::from_segments_with_config(operand.segments.clone(), self.config)
    }

    fn with_segments(&self, segments: Vec<Segment>) -> Csg {
        Csg {
            segments,
            config: self.config,
        }
    }

    /// Region covered by either operand.
    ///
    /// # Errors
    /// Propagates [`GeometryError::DepthExceeded`](crate::GeometryError::DepthExceeded)
    /// from tree construction.
    #[instrument(skip_all, fields(lhs = self.segments.len(), rhs = other.segments.len()))]
    pub fn union(&self, other: &Csg) -> Result<Csg> {
        let mut a = self.tree(self)?;
        let mut b = self.tree(other)?;

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(b.into_segments())?;
        a.invert();

        let segments = a.into_segments();
        debug!(segments = segments.len(), "union complete");
        Ok(self.with_segments(segments))
    }

    /// Region covered by `self` but not by `other`.
    ///
    /// # Errors
    /// Propagates [`GeometryError::DepthExceeded`](crate::GeometryError::DepthExceeded)
    /// from tree construction.
    #[instrument(skip_all, fields(lhs = self.segments.len(), rhs = other.segments.len()))]
    pub fn subtract(&self, other: &Csg) -> Result<Csg> {
        let mut b = self.tree(self)?;
        let mut a = self.tree(other)?;

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.into_segments())?;
        a.invert();

        let segments = a.into_segments();
        debug!(segments = segments.len(), "subtract complete");
        Ok(self.with_segments(segments).inverse())
    }

    /// Region covered by both operands.
    ///
    /// # Errors
    /// Propagates [`GeometryError::DepthExceeded`](crate::GeometryError::DepthExceeded)
    /// from tree construction.
    #[instrument(skip_all, fields(lhs = self.segments.len(), rhs = other.segments.len()))]
    pub fn intersect(&self, other: &Csg) -> Result<Csg> {
        let mut a = self.tree(self)?;
        let mut b = self.tree(other)?;

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.into_segments())?;

        let segments = a.into_segments();
        debug!(segments = segments.len(), "intersect complete");
        Ok(self.with_segments(segments))
    }

    /// Chains the segments back into closed point loops.
    ///
    /// Each loop starts from the first unused segment and repeatedly follows
    /// the unused segment whose start is nearest the current end, provided
    /// the squared distance is below `config.join_tolerance`. A loop ends when
    /// it returns to its first point or no continuation exists. Closed loops
    /// repeat their first point at the end.
    pub fn to_polygons(&self) -> Vec<Vec<Vector>> {
        let tolerance = self.config.join_tolerance;
        let mut pool: Vec<&Segment> = self.segments.iter().collect();
        let mut loops = Vec::new();

        while !pool.is_empty() {
            let first = pool.remove(0);
            let start = first.start();
            let mut current = vec![start, first.end()];

            loop {
                let last = current[current.len() - 1];
                if last == start {
                    break;
                }
                let Some(index) = nearest_continuation(&pool, last, tolerance) else {
                    break;
                };
                current.push(pool.remove(index).end());
            }

            loops.push(current);
        }

        debug!(loops = loops.len(), "reassembled polygons");
        loops
    }

    /// Moves every segment by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) -> Result<()> {
        for segment in &mut self.segments {
            segment.translate(dx, dy)?;
        }
        Ok(())
    }

    /// Rotates every segment about the origin by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> Result<()> {
        for segment in &mut self.segments {
            segment.rotate(angle)?;
        }
        Ok(())
    }
}

/// Index of the pool segment starting closest to `point`, if any starts
/// within `tolerance` (squared distance). Ties go to the earliest segment.
fn nearest_continuation(pool: &[&Segment], point: Vector, tolerance: f64) -> Option<usize> {
    pool.iter()
        .enumerate()
        .map(|(i, segment)| (i, segment.start().squared_length_to(point)))
        .filter(|&(_, distance)| distance < tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeometryError, Polygon};

    fn square(min: f64, max: f64) -> Vec<[f64; 2]> {
        vec![[min, min], [max, min], [max, max], [min, max]]
    }

    fn csg(loops: Vec<Vec<[f64; 2]>>) -> Csg {
        Csg::from_polygons(loops).unwrap()
    }

    fn circle(cx: f64, cy: f64, radius: f64, sides: usize) -> Vec<[f64; 2]> {
        (0..sides)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / sides as f64;
                [cx + radius * angle.cos(), cy + radius * angle.sin()]
            })
            .collect()
    }

    fn signed_area(points: &[Vector]) -> f64 {
        Polygon::from_closed_loop(points.to_vec()).signed_area()
    }

    fn assert_area(points: &[Vector], expected: f64) {
        let area = signed_area(points);
        assert!((area - expected).abs() < 1e-9, "area {area}, expected {expected}");
    }

    fn points(raw: &[[f64; 2]]) -> Vec<Vector> {
        raw.iter().map(|&p| Vector::from(p)).collect()
    }

    #[test]
    fn from_polygons_tags_loops() {
        let shape = csg(vec![square(0.0, 1.0), square(5.0, 6.0)]);

        assert_eq!(shape.segments().len(), 8);
        assert_eq!(shape.segments()[0].shared(), Some(0));
        assert_eq!(shape.segments()[7].shared(), Some(1));
        assert_eq!(shape.segments()[3].end(), Vector::new(0.0, 0.0));
    }

    #[test]
    fn repeated_point_is_rejected() {
        let err = Csg::from_polygons(vec![vec![[0.0, 0.0], [0.0, 0.0], [1.0, 1.0]]]).unwrap_err();
        assert_eq!(err, GeometryError::ZeroLength);
    }

    #[test]
    fn round_trip_single_polygon() {
        let ring = square(0.0, 15.0);
        let loops = csg(vec![ring.clone()]).to_polygons();

        assert_eq!(loops.len(), 1);
        let mut expected = points(&ring);
        expected.push(expected[0]);
        assert_eq!(loops[0], expected);
    }

    #[test]
    fn from_vectors_is_untagged() {
        let shape = Csg::from_vectors(&points(&square(0.0, 2.0))).unwrap();
        assert_eq!(shape.segments().len(), 4);
        assert!(shape.segments().iter().all(|s| s.shared().is_none()));
    }

    #[test]
    fn inverse_flips_every_segment() {
        let shape = csg(vec![square(0.0, 1.0)]);
        let inverse = shape.inverse();

        for (a, b) in shape.segments().iter().zip(inverse.segments()) {
            assert_eq!(a.start(), b.end());
            assert_eq!(a.end(), b.start());
        }
        assert_eq!(inverse.inverse(), shape);
    }

    #[test]
    fn union_of_overlapping_squares() {
        let a = csg(vec![square(0.0, 15.0)]);
        let b = csg(vec![square(10.0, 30.0)]);
        let loops = a.union(&b).unwrap().to_polygons();

        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 11);
        assert_area(&loops[0], 600.0);
        assert_eq!(
            loops[0],
            points(&[
                [0.0, 0.0],
                [15.0, 0.0],
                [15.0, 10.0],
                [30.0, 10.0],
                [30.0, 30.0],
                [15.0, 30.0],
                [10.0, 30.0],
                [10.0, 15.0],
                [0.0, 15.0],
                [0.0, 10.0],
                [0.0, 0.0],
            ])
        );
    }

    #[test]
    fn subtract_overlapping_squares() {
        let a = csg(vec![square(0.0, 15.0)]);
        let b = csg(vec![square(10.0, 30.0)]);
        let loops = a.subtract(&b).unwrap().to_polygons();

        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 8);
        assert_area(&loops[0], 200.0);
    }

    #[test]
    fn intersect_overlapping_squares() {
        let a = csg(vec![square(0.0, 15.0)]);
        let b = csg(vec![square(10.0, 30.0)]);
        let loops = a.intersect(&b).unwrap().to_polygons();

        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 5);
        assert_area(&loops[0], 25.0);
    }

    #[test]
    fn operands_are_not_modified() {
        let a = csg(vec![square(0.0, 15.0)]);
        let b = csg(vec![square(10.0, 30.0)]);
        let (a0, b0) = (a.clone(), b.clone());

        a.union(&b).unwrap();
        a.subtract(&b).unwrap();
        a.intersect(&b).unwrap();

        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn self_operations() {
        let a = csg(vec![square(0.0, 15.0)]);

        let union = a.union(&a).unwrap().to_polygons();
        assert_eq!(union.len(), 1);
        assert_eq!(union[0].len(), 5);
        assert_area(&union[0], 225.0);

        let intersection = a.intersect(&a).unwrap().to_polygons();
        assert_eq!(intersection.len(), 1);
        assert_area(&intersection[0], 225.0);

        assert!(a.subtract(&a).unwrap().is_empty());
    }

    #[test]
    fn disjoint_squares() {
        let a = csg(vec![square(0.0, 15.0)]);
        let far = csg(vec![square(40.0, 50.0)]);

        let union = a.union(&far).unwrap().to_polygons();
        assert_eq!(union.len(), 2);
        assert_area(&union[0], 225.0);
        assert_area(&union[1], 100.0);

        assert!(a.intersect(&far).unwrap().is_empty());
    }

    #[test]
    fn subtract_contained_square_leaves_hole() {
        let a = csg(vec![square(0.0, 15.0)]);
        let inner = csg(vec![square(5.0, 10.0)]);

        let loops = a.subtract(&inner).unwrap().to_polygons();
        assert_eq!(loops.len(), 2);

        let areas: Vec<f64> = loops.iter().map(|l| signed_area(l)).collect();
        assert!(areas.iter().any(|a| (a - 225.0).abs() < 1e-9));
        assert!(areas.iter().any(|a| (a + 25.0).abs() < 1e-9));

        let union = a.union(&inner).unwrap().to_polygons();
        assert_eq!(union.len(), 1);
        assert_area(&union[0], 225.0);

        let intersection = a.intersect(&inner).unwrap().to_polygons();
        assert_eq!(intersection.len(), 1);
        assert_area(&intersection[0], 25.0);
    }

    #[test]
    fn union_of_circles_stays_one_loop() {
        let config = CsgConfig::default().with_max_depth(128);
        let mut shape = csg(vec![circle(0.0, 0.0, 10.0, 30)]).with_config(config);
        let mut previous = shape.to_polygons()[0].len();

        for step in 1..=2 {
            let next = csg(vec![circle(6.0 * step as f64, 0.0, 10.0, 30)]);
            shape = shape.union(&next).unwrap();

            let loops = shape.to_polygons();
            assert_eq!(loops.len(), 1);
            assert!(loops[0].len() > previous);
            previous = loops[0].len();
        }
    }

    #[test]
    fn empty_operands() {
        let a = csg(vec![square(0.0, 15.0)]);
        let empty = Csg::new();

        assert_eq!(a.union(&empty).unwrap().segments().len(), 4);
        // An empty tree clips nothing away.
        assert_eq!(a.intersect(&empty).unwrap().segments().len(), 4);
        assert_eq!(a.subtract(&empty).unwrap().segments().len(), 4);
        assert!(empty.to_polygons().is_empty());
    }

    #[test]
    fn receiver_config_applies_to_both_operands() {
        let raised = CsgConfig::default().with_max_depth(200);
        let octagon = csg(vec![circle(0.0, 0.0, 10.0, 8)]).with_config(raised);
        let deep = csg(vec![circle(5.0, 0.0, 10.0, 60)]);

        assert!(octagon.union(&deep).is_ok());
        assert!(octagon.subtract(&deep).is_ok());
        assert!(octagon.intersect(&deep).is_ok());

        let err = deep.union(&octagon).unwrap_err();
        assert_eq!(err, GeometryError::DepthExceeded { max_depth: 50 });
    }

    #[test]
    fn translate_moves_loops() {
        let mut shape = csg(vec![square(0.0, 1.0)]);
        shape.translate(10.0, 0.0).unwrap();
        assert_eq!(shape.to_polygons()[0][0], Vector::new(10.0, 0.0));
    }
}

//! BSP tree node implementation.

use tracing::trace;

use crate::{CsgConfig, GeometryError, Line, Result, Segment, Split};

/// A node in the BSP tree.
///
/// Each node partitions the plane with a splitting line and stores the
/// segments lying on that line. Segments strictly to the right or left are
/// stored in the respective child subtrees.
///
/// A node with no line is empty; the first segment it is given in
/// [`BspNode::build`] supplies the line.
///
/// # Region convention
///
/// During [`BspNode::clip_segments`] a missing right child means "keep" and a
/// missing left child means "discard". The interior of a counter-clockwise
/// loop lies right of each of its edges, so clipping against such a loop
/// keeps the pieces inside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BspNode {
    /// The splitting line, adopted from the first segment built into the node.
    line: Option<Line>,

    /// Segments colinear with the line, of either facing.
    segments: Vec<Segment>,

    /// Subtree for segments RIGHT of the line.
    right: Option<Box<BspNode>>,

    /// Subtree for segments LEFT of the line.
    left: Option<Box<BspNode>>,

    config: CsgConfig,
}

impl BspNode {
    /// Creates an empty node with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty node with a custom configuration.
    pub fn with_config(config: CsgConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builds a tree from segments with the default configuration.
    ///
    /// # Errors
    /// Returns [`GeometryError::DepthExceeded`] if the segments need a
    /// deeper tree than the configured bound.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self> {
        Self::from_segments_with_config(segments, CsgConfig::default())
    }

    /// Builds a tree from segments with a custom configuration.
    pub fn from_segments_with_config(segments: Vec<Segment>, config: CsgConfig) -> Result<Self> {
        let mut node = Self::with_config(config);
        node.build(segments)?;
        Ok(node)
    }

    /// Returns the splitting line, if the node has been given one.
    #[inline]
    pub fn line(&self) -> Option<&Line> {
        self.line.as_ref()
    }

    /// Returns the segments stored at this node.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Subtree holding segments right of the line.
    #[inline]
    pub fn right(&self) -> Option<&BspNode> {
        self.right.as_deref()
    }

    /// Subtree holding segments left of the line.
    #[inline]
    pub fn left(&self) -> Option<&BspNode> {
        self.left.as_deref()
    }

    /// Tolerances and depth bound shared by the whole tree.
    #[inline]
    pub fn config(&self) -> &CsgConfig {
        &self.config
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.right.is_none() && self.left.is_none()
    }

    /// A node with no segments and no children holds no geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.is_leaf()
    }

    /// Returns the total number of segments in this subtree.
    pub fn segment_count(&self) -> usize {
        let mut count = self.segments.len();

        if let Some(ref right) = self.right {
            count += right.segment_count();
        }
        if let Some(ref left) = self.left {
            count += left.segment_count();
        }

        count
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let right_depth = self.right.as_ref().map_or(0, |n| n.depth());
        let left_depth = self.left.as_ref().map_or(0, |n| n.depth());
        1 + right_depth.max(left_depth)
    }

    /// Inserts segments into the tree, splitting them where they span a line.
    ///
    /// Segments on this node's line are kept here regardless of facing.
    /// Children are created on demand.
    ///
    /// # Errors
    /// Returns [`GeometryError::DepthExceeded`] when recursion goes past
    /// `config.max_depth`. The tree may be partially built in that case.
    pub fn build(&mut self, segments: Vec<Segment>) -> Result<()> {
        self.build_at(segments, 1)
    }

    fn build_at(&mut self, segments: Vec<Segment>, level: usize) -> Result<()> {
        if level > self.config.max_depth {
            return Err(GeometryError::DepthExceeded {
                max_depth: self.config.max_depth,
            });
        }
        if segments.is_empty() {
            return Ok(());
        }

        trace!(level, count = segments.len(), "building BSP node");

        let epsilon = self.config.epsilon;
        let line = self
            .line
            .get_or_insert_with(|| segments[0].line().clone());

        let mut right = Vec::new();
        let mut left = Vec::new();
        for segment in segments {
            match line.split_segment_with_epsilon(segment, epsilon) {
                Split::ColinearRight(s) | Split::ColinearLeft(s) => self.segments.push(s),
                Split::Right(s) => right.push(s),
                Split::Left(s) => left.push(s),
                Split::Spanning { right: r, left: l } => {
                    right.push(r);
                    left.push(l);
                }
            }
        }

        let config = self.config;
        if !right.is_empty() {
            self.right
                .get_or_insert_with(|| Box::new(BspNode::with_config(config)))
                .build_at(right, level + 1)?;
        }
        if !left.is_empty() {
            self.left
                .get_or_insert_with(|| Box::new(BspNode::with_config(config)))
                .build_at(left, level + 1)?;
        }

        Ok(())
    }

    /// Converts solid space to empty space and vice versa.
    ///
    /// Flips every segment and line in the subtree and swaps each node's
    /// children. Inverting twice restores the original tree.
    pub fn invert(&mut self) {
        for segment in &mut self.segments {
            segment.flip();
        }
        if let Some(line) = &mut self.line {
            line.flip();
        }
        if let Some(right) = &mut self.right {
            right.invert();
        }
        if let Some(left) = &mut self.left {
            left.invert();
        }
        std::mem::swap(&mut self.right, &mut self.left);
    }

    /// Keeps the parts of `segments` in this tree's kept region.
    ///
    /// Pieces reaching a missing right child are kept, pieces reaching a
    /// missing left child are dropped. Kept right-side pieces come before
    /// left-side ones in the result.
    pub fn clip_segments(&self, segments: Vec<Segment>) -> Vec<Segment> {
        let Some(line) = &self.line else {
            return segments;
        };

        let mut right = Vec::new();
        let mut left = Vec::new();
        for segment in segments {
            match line.split_segment_with_epsilon(segment, self.config.epsilon) {
                Split::ColinearRight(s) | Split::Right(s) => right.push(s),
                Split::ColinearLeft(s) | Split::Left(s) => left.push(s),
                Split::Spanning { right: r, left: l } => {
                    right.push(r);
                    left.push(l);
                }
            }
        }

        let mut kept = match &self.right {
            Some(node) => node.clip_segments(right),
            None => right,
        };
        if let Some(node) = &self.left {
            kept.extend(node.clip_segments(left));
        }
        kept
    }

    /// Trims every segment in this subtree to the kept region of `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        let segments = std::mem::take(&mut self.segments);
        self.segments = other.clip_segments(segments);

        if let Some(right) = &mut self.right {
            right.clip_to(other);
        }
        if let Some(left) = &mut self.left {
            left.clip_to(other);
        }
    }

    /// Collects every segment in the subtree in pre-order: this node's
    /// segments, then the right subtree, then the left subtree.
    pub fn all_segments(&self) -> Vec<Segment> {
        let mut segments = self.segments.clone();

        if let Some(ref right) = self.right {
            segments.extend(right.all_segments());
        }
        if let Some(ref left) = self.left {
            segments.extend(left.all_segments());
        }

        segments
    }

    /// Consumes the tree, returning its segments in the same order as
    /// [`BspNode::all_segments`].
    pub fn into_segments(self) -> Vec<Segment> {
        let mut segments = self.segments;

        if let Some(right) = self.right {
            segments.extend(right.into_segments());
        }
        if let Some(left) = self.left {
            segments.extend(left.into_segments());
        }

        segments
    }
}

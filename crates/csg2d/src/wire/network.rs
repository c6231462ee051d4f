//! Incremental planar wire network.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::intersect::{Intersection, segment_intersection};
use crate::{GeometryError, Result, Vector};

/// Default merge distance for vertices and minimum edge length.
pub const DEFAULT_WIRE_TOLERANCE: f64 = 0.1;

/// An undirected edge between two vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    /// Creates an edge between two vertex indices.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Returns `true` if this edge joins `a` and `b` in either orientation.
    #[inline]
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

/// Serializable snapshot of a network.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub vertices: Vec<[f64; 2]>,
    #[serde(default)]
    pub edges: Vec<[usize; 2]>,
}

/// A set of vertices joined by straight edges that never cross.
///
/// Adding a segment splits it, and any edges it crosses, at the crossing
/// points. Colinear overlaps are merged. Points closer than the tolerance
/// share a vertex.
#[derive(Debug, Clone)]
pub struct WireNetwork {
    vertices: Vec<Vector>,
    edges: Vec<Edge>,
    tolerance: f64,
    /// Segments waiting to be inserted. Processed last-in, first-out.
    pending: Vec<(Vector, Vector)>,
}

impl Default for WireNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl WireNetwork {
    /// Creates an empty network with [`DEFAULT_WIRE_TOLERANCE`].
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_WIRE_TOLERANCE)
    }

    /// Creates an empty network that merges vertices closer than `tolerance`
    /// and ignores shorter segments.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            tolerance,
            pending: Vec::new(),
        }
    }

    /// Deduplicated vertices, in insertion order.
    #[inline]
    pub fn vertices(&self) -> &[Vector] {
        &self.vertices
    }

    /// Edges as index pairs into [`WireNetwork::vertices`].
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertex merge distance and minimum segment length.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Adds the segment `p1-p2`, splitting and merging as needed to keep the
    /// network planar.
    ///
    /// Segments shorter than the tolerance, and segments already present,
    /// are ignored.
    pub fn add_segment(&mut self, p1: impl Into<Vector>, p2: impl Into<Vector>) {
        self.enqueue(p1.into(), p2.into());

        while let Some((a, b)) = self.pending.pop() {
            trace!(%a, %b, "inserting wire segment");
            self.insert_segment(a, b);
        }
    }

    fn find_vertex(&self, point: Vector) -> Option<usize> {
        self.vertices
            .iter()
            .position(|v| v.dist(point) < self.tolerance)
    }

    fn vertex(&mut self, point: Vector) -> usize {
        match self.find_vertex(point) {
            Some(index) => index,
            None => {
                self.vertices.push(point);
                self.vertices.len() - 1
            }
        }
    }

    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges.iter().any(|edge| edge.connects(a, b))
    }

    fn push_edge(&mut self, a: usize, b: usize) {
        if a != b && !self.has_edge(a, b) {
            self.edges.push(Edge::new(a, b));
        }
    }

    /// Endpoints of an edge in point order.
    fn sorted_endpoints(&self, edge: Edge) -> (Vector, Vector) {
        ordered(self.vertices[edge.a], self.vertices[edge.b])
    }

    fn enqueue(&mut self, p1: Vector, p2: Vector) {
        let (p1, p2) = ordered(p1, p2);

        if p1.dist(p2) < self.tolerance {
            return;
        }
        if let (Some(a), Some(b)) = (self.find_vertex(p1), self.find_vertex(p2)) {
            if self.has_edge(a, b) {
                return;
            }
        }
        if self.pending.iter().any(|&(a, b)| a == p1 && b == p2) {
            return;
        }

        self.pending.push((p1, p2));
    }

    fn insert_segment(&mut self, p1: Vector, p2: Vector) {
        let (p1, p2) = ordered(p1, p2);
        let mut crossings: Vec<(usize, Vector)> = Vec::new();
        let mut overlap = None;

        for (index, &edge) in self.edges.iter().enumerate() {
            let (p3, p4) = self.sorted_endpoints(edge);

            match segment_intersection(p1, p2, p3, p4) {
                None => {}
                Some(Intersection::Point(point)) => crossings.push((index, point)),
                Some(Intersection::Overlap(lo, hi)) if lo.dist(hi) < self.tolerance => {
                    crossings.push((index, lo));
                }
                Some(Intersection::Overlap(lo, hi)) => {
                    overlap = Some((index, (p3, p4), (lo, hi)));
                    break;
                }
            }
        }

        if let Some((index, existing, range)) = overlap {
            self.merge_overlap(index, (p1, p2), existing, range);
            return;
        }

        let start = self.vertex(p1);
        let end = self.vertex(p2);

        if crossings.is_empty() {
            self.push_edge(start, end);
            return;
        }

        let crossed: Vec<(Edge, Vector)> = crossings
            .iter()
            .map(|&(index, point)| (self.edges[index], point))
            .collect();
        for &(index, _) in crossings.iter().rev() {
            self.edges.remove(index);
        }

        let mut splits = Vec::with_capacity(crossed.len());
        for (edge, point) in crossed {
            let split = self.vertex(point);
            splits.push(split);
            self.push_edge(edge.a, split);
            self.push_edge(edge.b, split);
        }

        let origin = self.vertices[start];
        splits.sort_by(|&x, &y| {
            self.vertices[x]
                .dist(origin)
                .total_cmp(&self.vertices[y].dist(origin))
        });

        let mut previous = start;
        for split in splits {
            if split != previous {
                self.push_edge(previous, split);
            }
            previous = split;
        }
        self.push_edge(previous, end);
    }

    /// Resolves a colinear overlap between the new segment and edge `index`.
    fn merge_overlap(
        &mut self,
        index: usize,
        (p1, p2): (Vector, Vector),
        (p3, p4): (Vector, Vector),
        (lo, hi): (Vector, Vector),
    ) {
        let tolerance = self.tolerance;

        // The new segment lies within the existing edge.
        if p1.dist(lo) < tolerance && p2.dist(hi) < tolerance {
            return;
        }

        // The existing edge lies within the new segment: add the overhangs.
        if p3.dist(lo) < tolerance && p4.dist(hi) < tolerance {
            self.enqueue(p1, p3);
            self.enqueue(p4, p2);
            return;
        }

        self.edges.remove(index);
        let first = if p3 < p1 { p3 } else { p1 };
        let last = if p2 < p4 { p4 } else { p2 };
        self.enqueue(first, lo);
        self.enqueue(lo, hi);
        self.enqueue(hi, last);
    }

    /// Verifies that no two edges cross or overlap.
    ///
    /// Edges may only meet within the tolerance of an endpoint of each.
    ///
    /// # Errors
    /// - [`GeometryError::EdgesCross`] for a crossing away from endpoints
    /// - [`GeometryError::EdgesOverlap`] for a colinear overlap longer than
    ///   the tolerance
    pub fn check_edges(&self) -> Result<()> {
        let tolerance = self.tolerance;

        for (i, &first) in self.edges.iter().enumerate() {
            let (a, b) = (self.vertices[first.a], self.vertices[first.b]);

            for (j, &second) in self.edges.iter().enumerate().skip(i + 1) {
                let (c, d) = (self.vertices[second.a], self.vertices[second.b]);

                match segment_intersection(a, b, c, d) {
                    None => {}
                    Some(Intersection::Point(p)) => {
                        let near_first = p.dist(a) < tolerance || p.dist(b) < tolerance;
                        let near_second = p.dist(c) < tolerance || p.dist(d) < tolerance;
                        if !(near_first && near_second) {
                            return Err(GeometryError::EdgesCross {
                                first: i,
                                second: j,
                                x: p.x(),
                                y: p.y(),
                            });
                        }
                    }
                    Some(Intersection::Overlap(lo, hi)) => {
                        if lo.dist(hi) >= tolerance {
                            return Err(GeometryError::EdgesOverlap {
                                first: i,
                                second: j,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Snapshot of the vertices and edges.
    pub fn to_dict(&self) -> NetworkData {
        NetworkData {
            vertices: self.vertices.iter().map(Vector::to_array).collect(),
            edges: self.edges.iter().map(|e| [e.a, e.b]).collect(),
        }
    }

    /// Builds a network with the default tolerance from a snapshot.
    ///
    /// # Errors
    /// Returns [`GeometryError::InvalidVertexIndex`] if an edge refers past
    /// the vertex list.
    pub fn from_dict(data: &NetworkData) -> Result<Self> {
        let mut network = Self::new();
        network.load_dict(data)?;
        Ok(network)
    }

    /// Replaces the vertices and edges with a snapshot. The tolerance is
    /// kept.
    ///
    /// # Errors
    /// Returns [`GeometryError::InvalidVertexIndex`] if an edge refers past
    /// the vertex list. The network is left unchanged in that case.
    pub fn load_dict(&mut self, data: &NetworkData) -> Result<()> {
        let count = data.vertices.len();
        for (edge, pair) in data.edges.iter().enumerate() {
            if let Some(&index) = pair.iter().find(|&&index| index >= count) {
                return Err(GeometryError::InvalidVertexIndex { edge, index, count });
            }
        }

        self.vertices = data.vertices.iter().map(|&p| Vector::from(p)).collect();
        self.edges = data.edges.iter().map(|&[a, b]| Edge::new(a, b)).collect();
        self.pending.clear();
        Ok(())
    }
}

impl TryFrom<&NetworkData> for WireNetwork {
    type Error = GeometryError;

    fn try_from(data: &NetworkData) -> Result<Self> {
        Self::from_dict(data)
    }
}

fn ordered(p: Vector, q: Vector) -> (Vector, Vector) {
    if q < p { (q, p) } else { (p, q) }
}

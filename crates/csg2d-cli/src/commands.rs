//! Command implementations over plain coordinate arrays.
//!
//! Each command takes already-parsed input and returns a value ready for
//! JSON output, so the file handling in `main` stays separate.

use csg2d::path::reduce_points;
use csg2d::triangulate::ear_clip;
use csg2d::wire::{NetworkData, WireNetwork};
use csg2d::{Csg, CsgConfig, Result, Vector};
use serde::Serialize;

/// A list of point loops, `[[[x, y], ...], ...]`.
pub type Loops = Vec<Vec<[f64; 2]>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

/// Output of the `triangulate` command.
#[derive(Debug, Serialize)]
pub struct Triangulation {
    /// Vertex index triples into the input ring.
    pub indices: Vec<[usize; 3]>,
    pub triangles: Loops,
}

fn to_arrays(points: &[Vector]) -> Vec<[f64; 2]> {
    points.iter().map(Vector::to_array).collect()
}

fn to_vectors(points: &[[f64; 2]]) -> Vec<Vector> {
    points.iter().map(|&p| Vector::from(p)).collect()
}

pub fn boolean(op: BooleanOp, a: &Loops, b: &Loops, config: CsgConfig) -> Result<Loops> {
    let a = Csg::from_polygons(a.iter().cloned())?.with_config(config);
    let b = Csg::from_polygons(b.iter().cloned())?.with_config(config);

    let result = match op {
        BooleanOp::Union => a.union(&b)?,
        BooleanOp::Subtract => a.subtract(&b)?,
        BooleanOp::Intersect => a.intersect(&b)?,
    };

    Ok(result
        .to_polygons()
        .iter()
        .map(|points| to_arrays(points))
        .collect())
}

pub fn triangulate(ring: &[[f64; 2]]) -> Result<Triangulation> {
    let indices = ear_clip(&to_vectors(ring))?;
    let triangles = indices
        .iter()
        .map(|triangle| triangle.iter().map(|&i| ring[i]).collect())
        .collect();

    Ok(Triangulation { indices, triangles })
}

pub fn wire(segments: &[[[f64; 2]; 2]], tolerance: f64, check: bool) -> Result<NetworkData> {
    let mut network = WireNetwork::with_tolerance(tolerance);
    for &[a, b] in segments {
        network.add_segment(a, b);
    }
    if check {
        network.check_edges()?;
    }
    Ok(network.to_dict())
}

pub fn simplify(path: &[[f64; 2]], tolerance: f64) -> Vec<[f64; 2]> {
    to_arrays(&reduce_points(&to_vectors(path), tolerance))
}

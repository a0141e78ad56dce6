//! Per-triangle approximation error
//!
//! One bottom-up pass over the hierarchy stores, for every triangle with a
//! split point, the larger of its own approximation error and the stored
//! errors of its children. Ancestors therefore never report less error than
//! any descendant.

use crate::hierarchy::{Triangle, TriangleHierarchy};
use rayon::prelude::*;
use rtincrate_core::{rasterize_triangle, Heightmap};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a triangle's own error is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorMetric {
    /// Largest deviation of any covered sample from the triangle's plane.
    ///
    /// Output meshes are guaranteed to stay within the requested error.
    #[default]
    Exact,
    /// Deviation of the split point from the hypotenuse it splits.
    ///
    /// Constant work per triangle; the requested error is a heuristic target.
    Midpoint,
}

/// Flat id-indexed table of triangle errors
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorTable {
    errors: Vec<f32>,
    metric: ErrorMetric,
}

impl ErrorTable {
    /// Evaluate every triangle of `hierarchy` against `heightmap`.
    ///
    /// With `parallel` set, depth levels holding at least `min_parallel_len`
    /// triangles are evaluated with rayon; a level only starts once the level
    /// below it is complete. Both paths produce identical tables.
    pub fn compute(
        heightmap: &Heightmap,
        hierarchy: &TriangleHierarchy,
        metric: ErrorMetric,
        parallel: bool,
        min_parallel_len: usize,
    ) -> Self {
        let mut errors = vec![0.0f32; hierarchy.leaf_start()];

        if parallel {
            for depth in (0..hierarchy.leaf_depth()).rev() {
                let range = hierarchy.depth_range(depth);
                let (head, deeper) = errors.split_at_mut(range.end);
                let level = &mut head[range.start..];
                let deeper: &[f32] = deeper;
                let evaluate = |(offset, slot): (usize, &mut f32)| {
                    let id = range.start + offset;
                    *slot =
                        triangle_error(heightmap, hierarchy, id, metric, deeper, range.end);
                };
                if level.len() >= min_parallel_len {
                    level.par_iter_mut().enumerate().for_each(evaluate);
                } else {
                    level.iter_mut().enumerate().for_each(evaluate);
                }
            }
        } else {
            for id in hierarchy.split_ids().rev() {
                let (head, deeper) = errors.split_at_mut(id + 1);
                head[id] = triangle_error(heightmap, hierarchy, id, metric, deeper, id + 1);
            }
        }

        debug!(
            triangles = errors.len().saturating_sub(2),
            ?metric,
            parallel,
            "Computed triangle error table"
        );

        Self { errors, metric }
    }

    /// Stored error of `id`; leaves and ids outside the table report zero
    #[inline]
    pub fn get(&self, id: usize) -> f32 {
        self.errors.get(id).copied().unwrap_or(0.0)
    }

    /// Error of the coarsest mesh (the two root triangles)
    pub fn root_error(&self) -> f32 {
        self.get(2).max(self.get(3))
    }

    pub fn metric(&self) -> ErrorMetric {
        self.metric
    }

    /// Number of table slots (ids `0` and `1` are unused)
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.len() <= 2
    }

    /// Raw table indexed by triangle id
    pub fn as_slice(&self) -> &[f32] {
        &self.errors
    }

    /// Errors of all triangles with a split point, in id order
    pub fn values(&self) -> &[f32] {
        self.errors.get(2..).unwrap_or(&[])
    }
}

/// Error of one triangle given the finished table of deeper ids.
///
/// `deeper` holds the table entries from id `offset` onwards.
fn triangle_error(
    heightmap: &Heightmap,
    hierarchy: &TriangleHierarchy,
    id: usize,
    metric: ErrorMetric,
    deeper: &[f32],
    offset: usize,
) -> f32 {
    let Some(tri) = hierarchy.triangle(id) else {
        return 0.0;
    };
    let mut error = own_error(heightmap, &tri, metric);
    if !hierarchy.is_leaf(id * 2) {
        error = error
            .max(deeper[id * 2 - offset])
            .max(deeper[id * 2 + 1 - offset]);
    }
    error
}

fn own_error(heightmap: &Heightmap, tri: &Triangle, metric: ErrorMetric) -> f32 {
    match metric {
        ErrorMetric::Midpoint => {
            let interpolated = (heightmap.at(tri.a) as f64 + heightmap.at(tri.b) as f64) / 2.0;
            (heightmap.at(tri.midpoint()) as f64 - interpolated).abs() as f32
        }
        ErrorMetric::Exact => {
            let z = tri.corners().map(|p| heightmap.at(p) as f64);
            let mut max_error = 0.0f64;
            rasterize_triangle(tri.a, tri.b, tri.c, |p, bary| {
                max_error = max_error.max(bary.deviation(z, heightmap.at(p) as f64));
            });
            max_error as f32
        }
    }
}

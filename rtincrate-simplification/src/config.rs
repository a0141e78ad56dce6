//! Session and extraction configuration

use crate::error_table::ErrorMetric;
use rtincrate_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration used when building a [`crate::Tin`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TinConfig {
    /// How each triangle's own error is measured
    pub metric: ErrorMetric,
    /// Evaluate large depth levels of the error table in parallel
    pub parallel: bool,
    /// Minimum number of triangles in a depth level before it is split across threads
    pub parallel_min_depth_len: usize,
}

impl Default for TinConfig {
    fn default() -> Self {
        Self {
            metric: ErrorMetric::Exact,
            parallel: true,
            parallel_min_depth_len: 4096,
        }
    }
}

impl TinConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metric(mut self, metric: ErrorMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_min_depth_len(mut self, len: usize) -> Self {
        self.parallel_min_depth_len = len.max(1);
        self
    }
}

/// Upper bounds on the size of an extracted mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeshLimits {
    pub max_vertices: Option<usize>,
    pub max_triangles: Option<usize>,
}

impl MeshLimits {
    /// No limits
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = Some(max_vertices);
        self
    }

    pub fn with_max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = Some(max_triangles);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_vertices.is_none() && self.max_triangles.is_none()
    }

    /// Whether a mesh of the given size satisfies every limit
    pub fn admits(&self, vertices: usize, triangles: usize) -> bool {
        self.max_vertices.map_or(true, |max| vertices <= max)
            && self.max_triangles.map_or(true, |max| triangles <= max)
    }

    /// Reject limits that even the two-triangle mesh cannot meet
    pub fn validate(&self) -> Result<()> {
        if !self.admits(4, 2) {
            return Err(Error::InvalidData(format!(
                "mesh limits {:?} are below the minimal mesh of 4 vertices and 2 triangles",
                self
            )));
        }
        Ok(())
    }
}

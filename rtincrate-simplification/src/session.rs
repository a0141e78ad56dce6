//! Terrain simplification session
//!
//! A [`Tin`] owns a heightmap together with its triangle hierarchy and error
//! table. Both are computed once at construction and only read afterwards, so
//! any number of meshes can be extracted from one session.

use crate::compaction::compact;
use crate::config::{MeshLimits, TinConfig};
use crate::error_table::ErrorTable;
use crate::extraction::{extract, Extraction};
use crate::hierarchy::TriangleHierarchy;
use itertools::Itertools;
use rtincrate_core::{Error, Heightmap, Result, TerrainMesh};
use tracing::info;

/// Right-triangulated irregular network over one heightmap
#[derive(Debug, Clone)]
pub struct Tin {
    heightmap: Heightmap,
    hierarchy: TriangleHierarchy,
    errors: ErrorTable,
    config: TinConfig,
}

impl Tin {
    /// Build a session from `width * height` row-major samples
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        Self::with_config(data, width, height, TinConfig::default())
    }

    pub fn with_config(
        data: Vec<f32>,
        width: usize,
        height: usize,
        config: TinConfig,
    ) -> Result<Self> {
        Self::from_heightmap(Heightmap::new(data, width, height)?, config)
    }

    pub fn from_heightmap(heightmap: Heightmap, config: TinConfig) -> Result<Self> {
        let hierarchy = TriangleHierarchy::for_heightmap(&heightmap)?;
        let errors = ErrorTable::compute(
            &heightmap,
            &hierarchy,
            config.metric,
            config.parallel,
            config.parallel_min_depth_len,
        );

        info!(
            grid_size = hierarchy.grid_size(),
            triangles = errors.values().len(),
            root_error = errors.root_error(),
            metric = ?config.metric,
            "Built terrain error table"
        );

        Ok(Self {
            heightmap,
            hierarchy,
            errors,
            config,
        })
    }

    /// Extract the coarsest conforming mesh whose triangles all have an
    /// error of at most `max_error`.
    pub fn extract(&self, max_error: f32) -> Result<TerrainMesh> {
        let extraction = self.refine(max_error)?;
        compact(&extraction.triangles, self.hierarchy.grid_size())
    }

    /// Run the refinement without building the indexed mesh
    pub fn refine(&self, max_error: f32) -> Result<Extraction> {
        validate_threshold(max_error)?;
        Ok(extract(&self.hierarchy, &self.errors, max_error))
    }

    /// Extract the finest mesh that is no finer than `extract(max_error)`
    /// and satisfies `limits`.
    pub fn extract_with_limits(&self, max_error: f32, limits: MeshLimits) -> Result<TerrainMesh> {
        validate_threshold(max_error)?;
        limits.validate()?;

        let fits = |ex: &Extraction| limits.admits(ex.vertex_count, ex.triangles.len());

        let base = extract(&self.hierarchy, &self.errors, max_error);
        if fits(&base) {
            return compact(&base.triangles, self.hierarchy.grid_size());
        }

        // mesh size only shrinks as the threshold grows, and at the largest
        // stored error only the two roots remain
        let candidates: Vec<f32> = self
            .errors
            .values()
            .iter()
            .copied()
            .filter(|&e| e > max_error)
            .sorted_by(|a, b| a.total_cmp(b))
            .dedup()
            .collect();

        let mut lo = 0;
        let mut hi = candidates.len();
        let mut best = None;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let ex = extract(&self.hierarchy, &self.errors, candidates[mid]);
            if fits(&ex) {
                best = Some((candidates[mid], ex));
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        let (threshold, extraction) = best.ok_or_else(|| {
            Error::InvalidData(format!("no mesh satisfies the limits {:?}", limits))
        })?;

        info!(
            requested = max_error,
            threshold,
            vertices = extraction.vertex_count,
            triangles = extraction.triangles.len(),
            "Raised error threshold to meet mesh limits"
        );

        compact(&extraction.triangles, self.hierarchy.grid_size())
    }

    /// Smallest threshold at which only the two root triangles remain
    pub fn root_error(&self) -> f32 {
        self.errors.root_error()
    }

    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    pub fn hierarchy(&self) -> &TriangleHierarchy {
        &self.hierarchy
    }

    pub fn error_table(&self) -> &ErrorTable {
        &self.errors
    }

    pub fn config(&self) -> &TinConfig {
        &self.config
    }
}

fn validate_threshold(max_error: f32) -> Result<()> {
    if max_error.is_nan() || max_error < 0.0 {
        return Err(Error::InvalidThreshold(max_error));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ridge(size: usize) -> Vec<f32> {
        (0..size * size)
            .map(|i| {
                let (x, y) = ((i % size) as f32, (i / size) as f32);
                (x * 0.3).sin() * 4.0 + (y * 0.2).cos() * 3.0
            })
            .collect()
    }

    #[test]
    fn test_invalid_threshold() {
        let tin = Tin::new(ridge(9), 9, 9).unwrap();
        assert_eq!(tin.extract(-1.0), Err(Error::InvalidThreshold(-1.0)));
        assert!(matches!(tin.extract(f32::NAN), Err(Error::InvalidThreshold(_))));
        assert!(tin.extract(f32::INFINITY).is_ok());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(Tin::new(vec![0.0; 20], 4, 5), Err(Error::InvalidDimensions(_))));
        assert!(matches!(Tin::new(vec![0.0; 10], 3, 3), Err(Error::InvalidDimensions(_))));
    }

    #[test]
    fn test_root_error_gives_trivial_mesh() {
        let tin = Tin::new(ridge(17), 17, 17).unwrap();
        let mesh = tin.extract(tin.root_error()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_limits_are_respected() {
        let tin = Tin::new(ridge(33), 33, 33).unwrap();
        let full = tin.extract(0.0).unwrap();
        let limits = MeshLimits::none().with_max_triangles(full.triangle_count() / 4);
        let limited = tin.extract_with_limits(0.0, limits).unwrap();
        assert!(limited.triangle_count() <= full.triangle_count() / 4);
        assert!(limited.triangle_count() >= 2);

        let unlimited = tin.extract_with_limits(0.5, MeshLimits::none()).unwrap();
        assert_eq!(unlimited, tin.extract(0.5).unwrap());

        assert!(tin
            .extract_with_limits(0.0, MeshLimits::none().with_max_vertices(2))
            .is_err());
    }
}

//! Fidelity metrics of a terrain mesh against its source heightmap

use crate::error::Result;
use crate::heightmap::Heightmap;
use crate::mesh::TerrainMesh;
use crate::point::GridPoint;
use crate::raster::rasterize_triangle;
use serde::{Deserialize, Serialize};

/// How closely a mesh reproduces the heightmap it was built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshMetrics {
    /// Largest absolute vertical deviation over all covered samples
    pub max_error: f64,
    /// Root-mean-square deviation over all samples of the grid
    pub rmsd: f64,
    /// Grid point where `max_error` occurs, if any sample deviates
    pub worst: Option<[u32; 2]>,
    /// Number of samples covered by at least one triangle
    pub covered_samples: usize,
}

impl TerrainMesh {
    /// Rasterize every triangle and compare its plane with the samples it covers.
    ///
    /// Samples on shared edges are counted once per triangle for the maximum
    /// and once overall for the RMSD.
    pub fn measure(&self, heightmap: &Heightmap) -> Result<MeshMetrics> {
        self.validate()?;
        for &[x, y] in &self.coords {
            heightmap.elevation_at(x, y)?;
        }

        let mut seen = vec![false; heightmap.len()];
        let mut max_error = 0.0f64;
        let mut worst = None;
        let mut sum_sq = 0.0f64;
        let mut covered_samples = 0usize;
        let width = heightmap.width();

        for tri in &self.triangles {
            let p = tri.map(|i| {
                let [x, y] = self.coords[i as usize];
                GridPoint::new(x, y)
            });
            let z = p.map(|q| heightmap.at(q) as f64);

            rasterize_triangle(p[0], p[1], p[2], |q, bary| {
                let dz = bary.deviation(z, heightmap.at(q) as f64);
                if dz > max_error {
                    max_error = dz;
                    worst = Some([q.x, q.y]);
                }
                let id = q.x as usize + q.y as usize * width;
                if !seen[id] {
                    seen[id] = true;
                    covered_samples += 1;
                    sum_sq += dz * dz;
                }
            });
        }

        let rmsd = if heightmap.is_empty() {
            0.0
        } else {
            (sum_sq / heightmap.len() as f64).sqrt()
        };

        Ok(MeshMetrics {
            max_error,
            rmsd,
            worst,
            covered_samples,
        })
    }
}

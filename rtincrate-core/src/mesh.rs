//! Terrain mesh output type

use crate::error::{Error, Result};
use crate::heightmap::Heightmap;
use crate::point::{GridPoint, Point3f};
use serde::{Deserialize, Serialize};

/// A simplified terrain mesh in grid space.
///
/// `coords` holds unique `[x, y]` grid positions; `triangles` holds index
/// triples into `coords`. Elevations are looked up from the heightmap the
/// mesh was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerrainMesh {
    pub coords: Vec<[u32; 2]>,
    pub triangles: Vec<[u32; 3]>,
}

impl TerrainMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from coordinates and index triples
    pub fn from_parts(coords: Vec<[u32; 2]>, triangles: Vec<[u32; 3]>) -> Self {
        Self { coords, triangles }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.coords.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty() || self.triangles.is_empty()
    }

    /// Grid position of vertex `index`
    pub fn vertex(&self, index: usize) -> Option<GridPoint> {
        self.coords.get(index).map(|&[x, y]| GridPoint::new(x, y))
    }

    /// Corner positions of triangle `index`
    pub fn triangle_points(&self, index: usize) -> Option<[GridPoint; 3]> {
        let tri = self.triangles.get(index)?;
        Some([
            self.vertex(tri[0] as usize)?,
            self.vertex(tri[1] as usize)?,
            self.vertex(tri[2] as usize)?,
        ])
    }

    /// Flat `x0, y0, x1, y1, ...` coordinate buffer
    pub fn coordinate_buffer(&self) -> &[u32] {
        bytemuck::cast_slice(&self.coords)
    }

    /// Flat index buffer, three indices per triangle
    pub fn index_buffer(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// 3D vertex positions: grid x/y with elevation scaled by `z_scale`
    pub fn positions(&self, heightmap: &Heightmap, z_scale: f32) -> Result<Vec<Point3f>> {
        self.coords
            .iter()
            .map(|&[x, y]| {
                let z = heightmap.elevation_at(x, y)?;
                Ok(Point3f::new(x as f32, y as f32, z * z_scale))
            })
            .collect()
    }

    /// Check that every index is in range and no triangle repeats a vertex
    pub fn validate(&self) -> Result<()> {
        let n = self.coords.len() as u32;
        for (i, tri) in self.triangles.iter().enumerate() {
            if tri.iter().any(|&v| v >= n) {
                return Err(Error::InvalidData(format!(
                    "triangle {} references a vertex outside 0..{}",
                    i, n
                )));
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
                return Err(Error::InvalidData(format!(
                    "triangle {} repeats a vertex: {:?}",
                    i, tri
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TerrainMesh {
        TerrainMesh::from_parts(
            vec![[2, 2], [0, 0], [0, 2], [2, 0]],
            vec![[0, 1, 2], [1, 0, 3]],
        )
    }

    #[test]
    fn test_counts_and_buffers() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.index_buffer(), &[0, 1, 2, 1, 0, 3]);
        assert_eq!(mesh.coordinate_buffer(), &[2, 2, 0, 0, 0, 2, 2, 0]);
        assert!(!mesh.is_empty());
        assert!(TerrainMesh::new().is_empty());
    }

    #[test]
    fn test_positions() {
        let hm = Heightmap::new((0..9).map(|v| v as f32).collect(), 3, 3).unwrap();
        let positions = quad().positions(&hm, 2.0).unwrap();
        assert_eq!(positions[0], Point3f::new(2.0, 2.0, 16.0));
        assert_eq!(positions[3], Point3f::new(2.0, 0.0, 4.0));
    }

    #[test]
    fn test_positions_out_of_bounds() {
        let hm = Heightmap::new(vec![0.0; 4], 2, 2).unwrap();
        assert!(matches!(
            quad().positions(&hm, 1.0),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_validate() {
        assert!(quad().validate().is_ok());
        let bad = TerrainMesh::from_parts(vec![[0, 0], [1, 0]], vec![[0, 1, 1]]);
        assert!(bad.validate().is_err());
        let bad = TerrainMesh::from_parts(vec![[0, 0], [1, 0]], vec![[0, 1, 2]]);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_triangle_points() {
        let mesh = quad();
        let [a, b, c] = mesh.triangle_points(1).unwrap();
        assert_eq!(
            (a, b, c),
            (GridPoint::new(0, 0), GridPoint::new(2, 2), GridPoint::new(2, 0))
        );
        assert!(mesh.triangle_points(2).is_none());
    }
}

//! Conversion of retained triangles into an indexed mesh

use crate::hierarchy::Triangle;
use rtincrate_core::{Error, GridPoint, Result, TerrainMesh};

const UNASSIGNED: u32 = u32::MAX;

/// Assign output indices to grid vertices in first-seen order and emit one
/// index triple per triangle, keeping each triangle's `(a, b, c)` winding.
///
/// Fails with [`Error::OutOfBounds`] if a corner lies outside the
/// `grid_size x grid_size` grid.
pub fn compact(triangles: &[Triangle], grid_size: u32) -> Result<TerrainMesh> {
    let side = grid_size as usize;
    let mut lookup = vec![UNASSIGNED; side * side];
    let mut coords: Vec<[u32; 2]> = Vec::new();
    let mut indices = Vec::with_capacity(triangles.len());

    let mut index_of = |p: GridPoint| -> Result<u32> {
        if p.x >= grid_size || p.y >= grid_size {
            return Err(Error::OutOfBounds {
                x: p.x,
                y: p.y,
                width: grid_size,
                height: grid_size,
            });
        }
        let slot = &mut lookup[p.x as usize + p.y as usize * side];
        if *slot == UNASSIGNED {
            *slot = coords.len() as u32;
            coords.push([p.x, p.y]);
        }
        Ok(*slot)
    };

    for tri in triangles {
        indices.push([index_of(tri.a)?, index_of(tri.b)?, index_of(tri.c)?]);
    }

    Ok(TerrainMesh::from_parts(coords, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::TriangleHierarchy;

    #[test]
    fn test_roots_share_diagonal() {
        let h = TriangleHierarchy::new(4).unwrap();
        let mesh = compact(&h.roots(), 5).unwrap();
        assert_eq!(mesh.coords, vec![[4, 4], [0, 0], [4, 0], [0, 4]]);
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [1, 0, 3]]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_first_seen_order() {
        let h = TriangleHierarchy::new(2).unwrap();
        let tris: Vec<_> = h.depth_range(1).filter_map(|id| h.triangle(id)).collect();
        let mesh = compact(&tris, 3).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.triangles[0], [0, 1, 2]);
        // the centre is introduced by the first triangle and reused by all
        let centre = mesh.coords.iter().position(|&c| c == [1, 1]).unwrap() as u32;
        assert!(mesh.triangles.iter().all(|t| t.contains(&centre)));
    }

    #[test]
    fn test_out_of_bounds_vertex() {
        let h = TriangleHierarchy::new(4).unwrap();
        let err = compact(&h.roots(), 3).unwrap_err();
        assert_eq!(
            err,
            Error::OutOfBounds { x: 4, y: 4, width: 3, height: 3 }
        );
    }

    #[test]
    fn test_empty_input() {
        let mesh = compact(&[], 5).unwrap();
        assert!(mesh.is_empty());
    }
}

//! Greedy refinement of the hierarchy against an error threshold
//!
//! A triangle is split when its stored error exceeds the threshold, or when a
//! vertex introduced by a neighbouring split lies on one of its edges. The
//! second rule is applied until no pass includes a new vertex, so the retained
//! triangles always form a conforming mesh.

use crate::error_table::ErrorTable;
use crate::hierarchy::{Triangle, TriangleHierarchy};
use rtincrate_core::GridPoint;
use tracing::debug;

/// Result of one refinement: the retained triangles in traversal order
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub triangles: Vec<Triangle>,
    /// Number of distinct grid points used by `triangles`
    pub vertex_count: usize,
    /// Traversals needed to reach the fixed point (at least one)
    pub passes: usize,
    /// Split points included only to keep neighbouring edges consistent
    pub forced_splits: usize,
}

/// Grid points included so far, indexed by `x + y * grid_size`
struct IncludedSet {
    flags: Vec<bool>,
    grid_size: usize,
    count: usize,
}

impl IncludedSet {
    fn new(hierarchy: &TriangleHierarchy) -> Self {
        let grid_size = hierarchy.grid_size() as usize;
        let mut set = Self {
            flags: vec![false; grid_size * grid_size],
            grid_size,
            count: 0,
        };
        for corner in hierarchy.corners() {
            set.insert(corner);
        }
        set
    }

    #[inline]
    fn index(&self, p: GridPoint) -> usize {
        p.x as usize + p.y as usize * self.grid_size
    }

    #[inline]
    fn contains(&self, p: GridPoint) -> bool {
        self.flags[self.index(p)]
    }

    /// Returns true if `p` was not included before
    #[inline]
    fn insert(&mut self, p: GridPoint) -> bool {
        let i = self.index(p);
        if self.flags[i] {
            return false;
        }
        self.flags[i] = true;
        self.count += 1;
        true
    }
}

/// Refine `hierarchy` until every retained triangle has an error of at most
/// `max_error` and no retained triangle has an included vertex on its edges.
///
/// The threshold is not validated here; callers reject negative and NaN values.
pub fn extract(hierarchy: &TriangleHierarchy, errors: &ErrorTable, max_error: f32) -> Extraction {
    let mut included = IncludedSet::new(hierarchy);
    let mut triangles = Vec::new();
    let mut stack: Vec<Triangle> = Vec::new();
    let mut passes = 0;
    let mut forced_splits = 0;

    loop {
        passes += 1;
        triangles.clear();
        let mut changed = false;

        stack.extend(hierarchy.roots().into_iter().rev());
        while let Some(tri) = stack.pop() {
            if hierarchy.is_leaf(tri.id) {
                triangles.push(tri);
                continue;
            }

            let m = tri.midpoint();
            let split = if included.contains(m) {
                true
            } else if errors.get(tri.id) > max_error {
                included.insert(m);
                changed = true;
                true
            } else if !hierarchy.is_leaf(tri.id * 2)
                && tri.leg_midpoints().iter().any(|&p| included.contains(p))
            {
                included.insert(m);
                forced_splits += 1;
                changed = true;
                true
            } else {
                false
            };

            if split {
                let [left, right] = tri.children();
                stack.push(right);
                stack.push(left);
            } else {
                triangles.push(tri);
            }
        }

        if !changed {
            break;
        }
    }

    debug!(
        max_error,
        passes,
        forced_splits,
        vertices = included.count,
        triangles = triangles.len(),
        "Extracted terrain mesh"
    );

    Extraction {
        triangles,
        vertex_count: included.count,
        passes,
        forced_splits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_table::ErrorMetric;
    use rtincrate_core::Heightmap;
    use std::collections::HashSet;

    fn setup(data: Vec<f32>, size: usize) -> (TriangleHierarchy, ErrorTable) {
        let hm = Heightmap::new(data, size, size).unwrap();
        let h = TriangleHierarchy::for_heightmap(&hm).unwrap();
        let t = ErrorTable::compute(&hm, &h, ErrorMetric::Exact, false, 1);
        (h, t)
    }

    fn distinct_corners(ex: &Extraction) -> usize {
        ex.triangles
            .iter()
            .flat_map(|t| t.corners())
            .collect::<HashSet<_>>()
            .len()
    }

    #[test]
    fn test_flat_grid_keeps_roots() {
        let (h, t) = setup(vec![1.0; 25], 5);
        let ex = extract(&h, &t, 0.0);
        assert_eq!(ex.triangles.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(ex.vertex_count, 4);
        assert_eq!(ex.passes, 1);
        assert_eq!(ex.forced_splits, 0);
    }

    #[test]
    fn test_single_spike_forces_neighbour() {
        // a spike off the diagonal splits one root; the shared midpoint
        // then forces the other root to split as well
        let mut data = vec![0.0; 25];
        data[1 + 3 * 5] = 4.0;
        let (h, t) = setup(data, 5);
        let ex = extract(&h, &t, 0.5);
        assert!(ex.triangles.iter().all(|t| t.id >= 4));
        assert_eq!(ex.vertex_count, distinct_corners(&ex));
        assert!(ex.passes >= 1);
    }

    #[test]
    fn test_single_cell_grid() {
        let (h, t) = setup(vec![0.0, 3.0, 1.0, 8.0], 2);
        let ex = extract(&h, &t, 0.0);
        assert_eq!(ex.triangles.len(), 2);
        assert_eq!(ex.vertex_count, 4);
    }

    #[test]
    fn test_vertex_count_matches_corners() {
        let data: Vec<f32> = (0..81)
            .map(|i| ((i % 9) as f32 * 0.7).sin() * ((i / 9) as f32 * 0.4).cos() * 5.0)
            .collect();
        let (h, t) = setup(data, 9);
        for max_error in [0.0, 0.1, 0.5, 1.0, 10.0] {
            let ex = extract(&h, &t, max_error);
            assert_eq!(ex.vertex_count, distinct_corners(&ex));
            for tri in &ex.triangles {
                assert!(t.get(tri.id) <= max_error);
            }
        }
    }
}

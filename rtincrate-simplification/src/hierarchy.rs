//! Implicit right-triangle hierarchy over a square grid
//!
//! Triangles are never stored. Each one is addressed by an integer id and its
//! corners are derived from the id and the tile size alone:
//!
//! - id 1 is the whole square; ids 2 and 3 are the two root triangles that
//!   split it along the `(0,0)-(T,T)` diagonal
//! - the children of `id` are `2 * id` and `2 * id + 1`, its parent `id / 2`
//! - a triangle at depth `d` has an id in `[2^(d+1), 2^(d+2))`
//!
//! Every triangle is stored as `(a, b, c)` where `a-b` is the hypotenuse and
//! `c` the right-angle apex. Splitting at the hypotenuse midpoint `m` yields
//! `(b, c, m)` for the even child and `(c, a, m)` for the odd one, which keeps
//! the winding of every descendant identical to the roots'.

use rtincrate_core::{midpoint, Error, GridPoint, Heightmap, Result};
use std::ops::Range;

/// A triangle of the hierarchy with its derived corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub id: usize,
    /// First hypotenuse endpoint
    pub a: GridPoint,
    /// Second hypotenuse endpoint
    pub b: GridPoint,
    /// Right-angle apex
    pub c: GridPoint,
}

impl Triangle {
    /// The split point: midpoint of the hypotenuse
    #[inline]
    pub fn midpoint(&self) -> GridPoint {
        midpoint(self.a, self.b)
    }

    pub fn corners(&self) -> [GridPoint; 3] {
        [self.a, self.b, self.c]
    }

    /// Both children, even id first
    #[inline]
    pub fn children(&self) -> [Triangle; 2] {
        let m = self.midpoint();
        [
            Triangle { id: self.id * 2, a: self.b, b: self.c, c: m },
            Triangle { id: self.id * 2 + 1, a: self.c, b: self.a, c: m },
        ]
    }

    /// Midpoints of the two legs (the children's split points)
    #[inline]
    pub fn leg_midpoints(&self) -> [GridPoint; 2] {
        [midpoint(self.b, self.c), midpoint(self.c, self.a)]
    }
}

/// Addressing scheme for the triangles covering a `(T + 1) x (T + 1)` grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleHierarchy {
    tile_size: u32,
}

impl TriangleHierarchy {
    /// Hierarchy for a tile of `tile_size` cells per side (a power of two)
    pub fn new(tile_size: u32) -> Result<Self> {
        if !tile_size.is_power_of_two() || tile_size > 1 << 15 {
            return Err(Error::InvalidDimensions(format!(
                "tile size must be a power of two up to {}, got {}",
                1 << 15,
                tile_size
            )));
        }
        Ok(Self { tile_size })
    }

    /// Hierarchy matching the dimensions of `heightmap`
    pub fn for_heightmap(heightmap: &Heightmap) -> Result<Self> {
        Self::new(heightmap.tile_size())
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Samples per side
    pub fn grid_size(&self) -> u32 {
        self.tile_size + 1
    }

    /// Depth of the leaf triangles (half grid cells)
    pub fn leaf_depth(&self) -> u32 {
        2 * self.tile_size.trailing_zeros()
    }

    /// First leaf id; also the length of an id-indexed table of splittable triangles
    pub fn leaf_start(&self) -> usize {
        let t = self.tile_size as usize;
        2 * t * t
    }

    /// One past the last valid id
    pub fn id_end(&self) -> usize {
        2 * self.leaf_start()
    }

    /// Ids of all triangles that have a split point, ordered parents first
    pub fn split_ids(&self) -> Range<usize> {
        2.min(self.leaf_start())..self.leaf_start()
    }

    /// Ids of all triangles at `depth`
    pub fn depth_range(&self, depth: u32) -> Range<usize> {
        if depth > self.leaf_depth() {
            return 0..0;
        }
        (1usize << (depth + 1))..(1usize << (depth + 2))
    }

    pub fn is_valid(&self, id: usize) -> bool {
        id >= 2 && id < self.id_end()
    }

    pub fn is_leaf(&self, id: usize) -> bool {
        id >= self.leaf_start()
    }

    /// Depth of `id` (roots are at depth 0)
    pub fn depth_of(id: usize) -> u32 {
        debug_assert!(id >= 2);
        usize::BITS - 1 - id.leading_zeros() - 1
    }

    /// Parent id, `None` for the roots
    pub fn parent(&self, id: usize) -> Option<usize> {
        (self.is_valid(id) && id >= 4).then_some(id / 2)
    }

    /// Child ids, `None` for leaves
    pub fn children(&self, id: usize) -> Option<[usize; 2]> {
        (self.is_valid(id) && !self.is_leaf(id)).then_some([id * 2, id * 2 + 1])
    }

    /// The other child of the same parent
    pub fn sibling(&self, id: usize) -> Option<usize> {
        self.is_valid(id).then_some(id ^ 1)
    }

    /// The two root triangles
    pub fn roots(&self) -> [Triangle; 2] {
        let t = self.tile_size;
        [
            Triangle {
                id: 2,
                a: GridPoint::new(t, t),
                b: GridPoint::new(0, 0),
                c: GridPoint::new(t, 0),
            },
            Triangle {
                id: 3,
                a: GridPoint::new(0, 0),
                b: GridPoint::new(t, t),
                c: GridPoint::new(0, t),
            },
        ]
    }

    /// Derive the corners of triangle `id` by walking down from its root
    pub fn triangle(&self, id: usize) -> Option<Triangle> {
        if !self.is_valid(id) {
            return None;
        }
        let depth = Self::depth_of(id);
        let mut tri = self.roots()[(id >> depth) & 1];
        for bit in (0..depth).rev() {
            tri = tri.children()[(id >> bit) & 1];
        }
        Some(tri)
    }

    /// The four corners of the grid, in the order the roots introduce them
    pub fn corners(&self) -> [GridPoint; 4] {
        let t = self.tile_size;
        [
            GridPoint::new(t, t),
            GridPoint::new(0, 0),
            GridPoint::new(t, 0),
            GridPoint::new(0, t),
        ]
    }
}

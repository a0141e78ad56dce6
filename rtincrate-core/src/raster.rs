//! Triangle rasterization over the integer sample grid
//!
//! Walks the grid points covered by a triangle (edges and corners included)
//! using incrementally updated edge functions, and hands each point to a
//! callback together with its barycentric coordinates.

use crate::point::{orient, GridPoint};

/// Integer barycentric coordinates of a grid point inside a triangle.
///
/// `weights[i] / area` is the usual normalized weight of corner `i`; keeping
/// them as integers lets planar data interpolate without rounding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barycentric {
    pub weights: [i64; 3],
    pub area: i64,
}

impl Barycentric {
    /// Normalized weights
    pub fn lambda(&self) -> [f64; 3] {
        let inv = 1.0 / self.area as f64;
        self.weights.map(|w| w as f64 * inv)
    }

    /// Value of the plane through `z` at this point
    #[inline]
    pub fn interpolate(&self, z: [f64; 3]) -> f64 {
        z[0] + self.offset(z)
    }

    /// Absolute difference between `sample` and the plane through `z`
    #[inline]
    pub fn deviation(&self, z: [f64; 3], sample: f64) -> f64 {
        ((sample - z[0]) - self.offset(z)).abs()
    }

    #[inline]
    fn offset(&self, z: [f64; 3]) -> f64 {
        let [_, w1, w2] = self.weights;
        (w1 as f64 * (z[1] - z[0]) + w2 as f64 * (z[2] - z[0])) / self.area as f64
    }
}

/// Visit every grid point inside or on the boundary of the triangle `(a, b, c)`.
///
/// The callback receives the point and its barycentric coordinates with
/// respect to `a`, `b` and `c`, in that order. Degenerate (zero-area)
/// triangles cover nothing. Either winding is accepted.
pub fn rasterize_triangle<F>(a: GridPoint, b: GridPoint, c: GridPoint, mut visit: F)
where
    F: FnMut(GridPoint, Barycentric),
{
    let area = orient(a, b, c);
    if area == 0 {
        return;
    }
    let sign = area.signum();
    let area = area * sign;

    let min_x = a.x.min(b.x).min(c.x);
    let max_x = a.x.max(b.x).max(c.x);
    let min_y = a.y.min(b.y).min(c.y);
    let max_y = a.y.max(b.y).max(c.y);

    // per-step increments of the three edge functions
    let (ax, ay) = (a.x as i64, a.y as i64);
    let (bx, by) = (b.x as i64, b.y as i64);
    let (cx, cy) = (c.x as i64, c.y as i64);
    let (dx0, dy0) = ((cy - by) * sign, (bx - cx) * sign);
    let (dx1, dy1) = ((ay - cy) * sign, (cx - ax) * sign);
    let (dx2, dy2) = ((by - ay) * sign, (ax - bx) * sign);

    let origin = GridPoint::new(min_x, min_y);
    let mut row0 = orient(b, c, origin) * sign;
    let mut row1 = orient(c, a, origin) * sign;
    let mut row2 = orient(a, b, origin) * sign;

    for y in min_y..=max_y {
        let (mut w0, mut w1, mut w2) = (row0, row1, row2);
        let mut was_inside = false;

        for x in min_x..=max_x {
            if w0 >= 0 && w1 >= 0 && w2 >= 0 {
                was_inside = true;
                visit(
                    GridPoint::new(x, y),
                    Barycentric {
                        weights: [w0, w1, w2],
                        area,
                    },
                );
            } else if was_inside {
                break;
            }
            w0 += dx0;
            w1 += dx1;
            w2 += dx2;
        }

        row0 += dy0;
        row1 += dy1;
        row2 += dy2;
    }
}

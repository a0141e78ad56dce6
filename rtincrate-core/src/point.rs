//! Point types used across rtincrate

use nalgebra::{Point2, Point3, Vector3};

/// An integer vertex position on the sample grid
pub type GridPoint = Point2<u32>;

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Positive when `c` lies to the left of `a -> b` in a y-down grid, zero when
/// the three points are collinear. Exact for any grid up to 2^31 samples wide.
#[inline]
pub fn orient(a: GridPoint, b: GridPoint, c: GridPoint) -> i64 {
    let (ax, ay) = (a.x as i64, a.y as i64);
    let (bx, by) = (b.x as i64, b.y as i64);
    let (cx, cy) = (c.x as i64, c.y as i64);
    (bx - cx) * (ay - cy) - (by - cy) * (ax - cx)
}

/// Midpoint of two grid points, rounded towards the origin
#[inline]
pub fn midpoint(a: GridPoint, b: GridPoint) -> GridPoint {
    GridPoint::new((a.x + b.x) / 2, (a.y + b.y) / 2)
}

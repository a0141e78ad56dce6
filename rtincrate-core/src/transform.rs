//! Georeferencing helpers for terrain mesh positions

use crate::point::Point3f;
use serde::{Deserialize, Serialize};

/// An axis-aligned target extent `[min_x, min_y, max_x, max_y]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Linearly map grid-space x/y positions into `bounds`.
///
/// The tile extent is the largest x or y found in `positions`, so a mesh that
/// spans its whole grid maps corner to corner. With `flip_y` the grid origin
/// (top-left in image space) lands on `max_y`. Elevations are left untouched.
pub fn rescale_positions(positions: &[Point3f], bounds: Bounds, flip_y: bool) -> Vec<Point3f> {
    let tile_size = positions
        .iter()
        .map(|p| p.x.max(p.y))
        .fold(0.0f32, f32::max) as f64;
    if tile_size == 0.0 {
        return positions.to_vec();
    }

    let x_scale = bounds.width() / tile_size;
    let y_scale = bounds.height() / tile_size;
    let (y_scale, y_offset) = if flip_y {
        (-y_scale, bounds.max_y)
    } else {
        (y_scale, bounds.min_y)
    };

    positions
        .iter()
        .map(|p| {
            Point3f::new(
                (p.x as f64 * x_scale + bounds.min_x) as f32,
                (p.y as f64 * y_scale + y_offset) as f32,
                p.z,
            )
        })
        .collect()
}

/// Horizontal scale factor of web-mercator at `latitude` degrees
pub fn latitude_adjustment(latitude: f64) -> f64 {
    latitude.to_radians().cos()
}

//! Heightmap: the immutable sample grid a terrain mesh is built from

use crate::error::{Error, Result};
use crate::point::GridPoint;
use ndarray::{Array2, ArrayView2};

/// A square grid of elevation samples.
///
/// Samples are stored row-major (`[[y, x]]`). The side length must be
/// `2^k + 1` so the grid can be tiled by a right-triangle hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    samples: Array2<f32>,
}

impl Heightmap {
    /// Create a heightmap from a flat row-major sample buffer
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            Error::InvalidDimensions(format!("{}x{} grid is too large", width, height))
        })?;
        if data.len() != expected {
            return Err(Error::InvalidDimensions(format!(
                "expected {} samples for a {}x{} grid, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        validate_dimensions(width, height)?;
        let samples = Array2::from_shape_vec((height, width), data)
            .map_err(|e| Error::InvalidDimensions(e.to_string()))?;
        Self::from_array(samples)
    }

    /// Create a heightmap from a `(height, width)` array
    pub fn from_array(samples: Array2<f32>) -> Result<Self> {
        let (height, width) = samples.dim();
        validate_dimensions(width, height)?;
        // keep row-major layout so `as_slice` always succeeds
        let samples = if samples.is_standard_layout() {
            samples
        } else {
            samples.as_standard_layout().to_owned()
        };
        let heightmap = Self { samples };
        heightmap.check_finite()?;
        Ok(heightmap)
    }

    /// Reject grids holding NaN or infinite samples
    pub(crate) fn check_finite(&self) -> Result<()> {
        if let Some(((y, x), v)) = self.samples.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidData(format!(
                "sample at ({}, {}) is not finite: {}",
                x, y, v
            )));
        }
        Ok(())
    }

    /// Number of samples per row
    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of grid cells along one side (`width - 1`)
    pub fn tile_size(&self) -> u32 {
        (self.width() - 1) as u32
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether `(x, y)` lies inside the grid
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Elevation at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        self.samples.get((y as usize, x as usize)).copied()
    }

    /// Elevation at `(x, y)`
    pub fn elevation_at(&self, x: u32, y: u32) -> Result<f32> {
        self.get(x, y).ok_or(Error::OutOfBounds {
            x,
            y,
            width: self.width() as u32,
            height: self.height() as u32,
        })
    }

    /// Elevation at a grid point, panicking outside the grid.
    ///
    /// Used on hot paths where the point was derived from the grid itself.
    #[inline]
    pub fn at(&self, p: GridPoint) -> f32 {
        self.samples[(p.y as usize, p.x as usize)]
    }

    /// Vertex id of `(x, y)`: `x + y * width`
    pub fn vertex_id(&self, x: u32, y: u32) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width() as u32,
                height: self.height() as u32,
            });
        }
        Ok(x as usize + y as usize * self.width())
    }

    /// Grid point of a vertex id
    pub fn point_of(&self, id: usize) -> Option<GridPoint> {
        if id >= self.len() {
            return None;
        }
        let w = self.width();
        Some(GridPoint::new((id % w) as u32, (id / w) as u32))
    }

    /// Minimum and maximum sample value
    pub fn range(&self) -> (f32, f32) {
        self.samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Row-major view of all samples
    pub fn as_slice(&self) -> &[f32] {
        // from_array guarantees standard layout
        self.samples.as_slice().unwrap_or(&[])
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.samples.view()
    }

    pub(crate) fn samples_mut(&mut self) -> &mut Array2<f32> {
        &mut self.samples
    }
}

/// Check that a `width x height` grid can be tiled by the triangle hierarchy.
///
/// Accepted grids are square with a side of `2^k + 1` samples, `k >= 0`.
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width != height {
        return Err(Error::InvalidDimensions(format!(
            "grid must be square, got {}x{}",
            width, height
        )));
    }
    if width < 2 {
        return Err(Error::InvalidDimensions(format!(
            "grid must have at least 2x2 samples, got {}x{}",
            width, height
        )));
    }
    let tile = width - 1;
    if !tile.is_power_of_two() {
        return Err(Error::InvalidDimensions(format!(
            "grid side must be 2^k + 1 samples, got {}",
            width
        )));
    }
    if tile > 1 << 15 {
        return Err(Error::InvalidDimensions(format!(
            "grid side {} exceeds the supported maximum of {}",
            width,
            (1 << 15) + 1
        )));
    }
    Ok(())
}

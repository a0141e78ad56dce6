//! Heightmap preprocessing applied before triangulation
//!
//! Blur, auto-leveling, inversion and gamma shaping of the raw samples.

use crate::error::{Error, Result};
use crate::heightmap::Heightmap;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options controlling heightmap preprocessing.
///
/// Steps run in a fixed order: blur, level, invert, gamma.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    /// Rescale samples linearly to `[0, 1]`
    pub level: bool,
    /// Mirror samples within their range
    pub invert: bool,
    /// Gaussian blur standard deviation in samples (0 disables)
    pub blur_sigma: f32,
    /// Gamma exponent applied to range-normalized samples (0 disables)
    pub gamma: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            level: false,
            invert: false,
            blur_sigma: 0.0,
            gamma: 0.0,
        }
    }
}

impl PreprocessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: bool) -> Self {
        self.level = level;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_blur(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Whether these options leave the heightmap untouched
    pub fn is_identity(&self) -> bool {
        !self.level && !self.invert && self.blur_sigma == 0.0 && self.gamma == 0.0
    }

    fn validate(&self) -> Result<()> {
        if !(self.blur_sigma >= 0.0) || !self.blur_sigma.is_finite() {
            return Err(Error::InvalidData(format!(
                "blur sigma must be non-negative, got {}",
                self.blur_sigma
            )));
        }
        // the kernel divides by 2 sigma^2
        let denom = 2.0 * self.blur_sigma * self.blur_sigma;
        if self.blur_sigma > 0.0 && !denom.is_normal() {
            return Err(Error::InvalidData(format!(
                "blur sigma {} is outside the representable kernel range",
                self.blur_sigma
            )));
        }
        if !(self.gamma >= 0.0) || !self.gamma.is_finite() {
            return Err(Error::InvalidData(format!(
                "gamma must be non-negative, got {}",
                self.gamma
            )));
        }
        Ok(())
    }
}

impl Heightmap {
    /// Return a preprocessed copy of this heightmap
    pub fn preprocess(&self, options: &PreprocessOptions) -> Result<Heightmap> {
        options.validate()?;
        let mut out = self.clone();
        if options.is_identity() {
            return Ok(out);
        }
        debug!(
            width = self.width(),
            level = options.level,
            invert = options.invert,
            blur_sigma = options.blur_sigma,
            gamma = options.gamma,
            "Preprocessing heightmap"
        );

        if options.blur_sigma > 0.0 {
            let blurred = gaussian_blur(out.samples_mut(), options.blur_sigma);
            *out.samples_mut() = blurred;
        }
        if options.level {
            let (lo, hi) = out.range();
            let span = hi - lo;
            out.samples_mut().mapv_inplace(|v| if span > 0.0 { (v - lo) / span } else { 0.0 });
        }
        if options.invert {
            let (lo, hi) = out.range();
            out.samples_mut().mapv_inplace(|v| lo + hi - v);
        }
        if options.gamma > 0.0 {
            let (lo, hi) = out.range();
            let span = hi - lo;
            if span > 0.0 {
                let gamma = options.gamma;
                out.samples_mut()
                    .mapv_inplace(|v| lo + ((v - lo) / span).powf(gamma) * span);
            }
        }
        out.check_finite()?;
        Ok(out)
    }
}

/// Normalized kernel of radius `ceil(3 sigma)`, capped at `max_radius`.
///
/// Offsets past the grid side only ever sample the clamped edge.
fn gaussian_kernel(sigma: f32, max_radius: usize) -> Vec<f32> {
    let radius = ((3.0 * sigma).ceil() as i64).min(max_radius as i64);
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= sum);
    kernel
}

/// Separable Gaussian blur with clamped edges
fn gaussian_blur(samples: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let side = samples.nrows().max(samples.ncols());
    let kernel = gaussian_kernel(sigma, side);
    let horizontal = convolve_axis(samples, &kernel, Axis(1));
    convolve_axis(&horizontal, &kernel, Axis(0))
}

fn convolve_axis(input: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let radius = (kernel.len() / 2) as i64;
    let mut output = Array2::zeros(input.raw_dim());
    for (src, mut dst) in input.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let last = src.len() as i64 - 1;
        for i in 0..src.len() as i64 {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let j = (i + k as i64 - radius).clamp(0, last);
                acc += weight * src[j as usize];
            }
            dst[i as usize] = acc;
        }
    }
    output
}

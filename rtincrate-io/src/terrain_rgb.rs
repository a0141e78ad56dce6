//! Terrain-RGB elevation decoding
//!
//! Web map tile services publish elevation as 8-bit RGB images where the
//! three channels together encode one height value.

use crate::error::{DecodeError, Result};
use rtincrate_core::Heightmap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Packing of an elevation value into the red, green and blue channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainEncoding {
    /// Mapbox Terrain-RGB: 0.1 m steps offset by -10000 m
    Mapbox,
    /// Terrarium: whole metres in R/G, fractional part in B, offset by -32768 m
    Terrarium,
}

impl TerrainEncoding {
    /// Elevation in metres of one pixel
    #[inline]
    pub fn decode(self, r: u8, g: u8, b: u8) -> f32 {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        let value = match self {
            TerrainEncoding::Mapbox => (r * 65536.0 + g * 256.0 + b) / 10.0 - 10000.0,
            TerrainEncoding::Terrarium => r * 256.0 + g + b / 256.0 - 32768.0,
        };
        value as f32
    }
}

impl fmt::Display for TerrainEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainEncoding::Mapbox => write!(f, "mapbox"),
            TerrainEncoding::Terrarium => write!(f, "terrarium"),
        }
    }
}

impl FromStr for TerrainEncoding {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mapbox" => Ok(TerrainEncoding::Mapbox),
            "terrarium" => Ok(TerrainEncoding::Terrarium),
            _ => Err(DecodeError::UnknownEncoding { name: s.to_string() }),
        }
    }
}

/// Decode an interleaved 8-bit image into a heightmap.
///
/// `pixels` holds `width * height` pixels of `channels` bytes each; only the
/// first three channels are read, so RGBA buffers work unchanged.
pub fn decode_elevations(
    pixels: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    encoding: TerrainEncoding,
) -> Result<Heightmap> {
    if channels < 3 {
        return Err(DecodeError::ChannelCount { channels });
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            rtincrate_core::Error::InvalidDimensions(format!(
                "{}x{} raster with {} channels is too large",
                width, height, channels
            ))
        })?;
    if pixels.len() != expected {
        return Err(DecodeError::BufferLength {
            expected,
            actual: pixels.len(),
        });
    }

    let data: Vec<f32> = pixels
        .chunks_exact(channels)
        .map(|px| encoding.decode(px[0], px[1], px[2]))
        .collect();

    debug!(width, height, %encoding, "Decoded terrain raster");

    Ok(Heightmap::new(data, width, height)?)
}

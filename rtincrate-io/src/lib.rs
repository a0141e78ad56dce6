//! Raster decoding for rtincrate
//!
//! This crate turns encoded elevation images (Mapbox Terrain-RGB and
//! Terrarium tiles) into heightmaps ready for simplification.

pub mod terrain_rgb;
pub mod error;

pub use terrain_rgb::*;
pub use error::*;

#[cfg(test)]
mod tests;

//! Core data structures for rtincrate
//!
//! This crate provides the fundamental types for terrain mesh simplification:
//! the heightmap sample grid, the simplified terrain mesh, fidelity metrics,
//! preprocessing and georeferencing helpers, and the shared error type.

pub mod point;
pub mod heightmap;
pub mod preprocess;
pub mod raster;
pub mod mesh;
pub mod metrics;
pub mod transform;
pub mod error;

pub use point::*;
pub use heightmap::*;
pub use preprocess::*;
pub use raster::*;
pub use mesh::*;
pub use metrics::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3};

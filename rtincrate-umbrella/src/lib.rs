//! # rtincrate
//!
//! Terrain heightmap to simplified triangle mesh conversion for Rust.
//!
//! This is the umbrella crate that provides convenient access to all rtincrate functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Heightmaps, terrain meshes, fidelity metrics, preprocessing and georeferencing
//! - **Simplification**: Right-triangulated irregular network (RTIN) mesh extraction
//! - **I/O**: Terrain-RGB and Terrarium elevation decoding
//!
//! ## Quick Start
//!
//! ```rust
//! use rtincrate::prelude::*;
//!
//! // A 5x5 grid with a bump in the middle
//! let mut samples = vec![0.0f32; 25];
//! samples[12] = 4.0;
//!
//! let tin = Tin::new(samples, 5, 5).unwrap();
//! let mesh = tin.extract(0.5).unwrap();
//! assert!(mesh.vertex_count() > 4);
//!
//! let coarse = tin.extract(tin.root_error()).unwrap();
//! assert_eq!(coarse.triangle_count(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core, simplification and io
//! - `simplification`: Error tables, extraction and limits
//! - `io`: Elevation raster decoding
//! - `all`: Enables all features

// Re-export core functionality
pub use rtincrate_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use rtincrate_io as io;

#[cfg(feature = "simplification")]
pub use rtincrate_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use rtincrate_core::*;

    #[cfg(feature = "io")]
    pub use rtincrate_io::{decode_elevations, DecodeError, TerrainEncoding};

    #[cfg(feature = "simplification")]
    pub use rtincrate_simplification::{
        BudgetedSimplifier, ErrorMetric, ErrorTable, MeshLimits, TerrainSimplifier, Tin,
        TinConfig, TriangleHierarchy,
    };
}

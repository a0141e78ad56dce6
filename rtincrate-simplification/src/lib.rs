//! Terrain mesh simplification over right-triangulated irregular networks
//!
//! This crate turns a heightmap into a conforming triangle mesh whose
//! approximation error stays below a requested bound:
//! - Implicit right-triangle hierarchy addressed by integer ids
//! - Bottom-up error table (sequential or rayon-parallel by depth)
//! - Greedy extraction with neighbour forcing (no T-junctions)
//! - Compaction into an indexed mesh, optionally under vertex/triangle limits

pub mod hierarchy;
pub mod error_table;
pub mod extraction;
pub mod compaction;
pub mod config;
pub mod session;

pub use hierarchy::*;
pub use error_table::*;
pub use extraction::*;
pub use compaction::*;
pub use config::*;
pub use session::*;

use rtincrate_core::{Result, TerrainMesh};

/// Produce a simplified terrain mesh for an error bound
pub trait TerrainSimplifier {
    /// Simplify with a maximum vertical error (0.0 = exact wherever the surface is non-planar)
    fn simplify(&self, max_error: f32) -> Result<TerrainMesh>;
}

impl TerrainSimplifier for Tin {
    fn simplify(&self, max_error: f32) -> Result<TerrainMesh> {
        self.extract(max_error)
    }
}

/// Simplifier that additionally keeps every mesh within fixed size limits
#[derive(Debug, Clone, Copy)]
pub struct BudgetedSimplifier<'a> {
    pub tin: &'a Tin,
    pub limits: MeshLimits,
}

impl<'a> BudgetedSimplifier<'a> {
    pub fn new(tin: &'a Tin, limits: MeshLimits) -> Self {
        Self { tin, limits }
    }
}

impl TerrainSimplifier for BudgetedSimplifier<'_> {
    fn simplify(&self, max_error: f32) -> Result<TerrainMesh> {
        self.tin.extract_with_limits(max_error, self.limits)
    }
}

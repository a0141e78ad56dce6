//! Error types for raster decoding

use thiserror::Error;

/// Errors that can occur while decoding elevation rasters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Unknown terrain encoding: {name}")]
    UnknownEncoding { name: String },

    #[error("Unsupported channel count: {channels} (need at least 3)")]
    ChannelCount { channels: usize },

    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error(transparent)]
    Core(#[from] rtincrate_core::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

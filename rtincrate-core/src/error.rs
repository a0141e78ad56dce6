//! Error types for rtincrate

use thiserror::Error;

/// Main error type for rtincrate operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The grid shape cannot be subdivided, or the sample count does not match it
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A negative or NaN maximum error was requested
    #[error("Invalid threshold: {0} (must be a non-negative number)")]
    InvalidThreshold(f32),

    /// A derived vertex fell outside the sample grid.
    ///
    /// This signals a defect in triangle addressing, not bad user input.
    #[error("Out of bounds: ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for rtincrate operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidThreshold(-1.5);
        assert!(format!("{err}").contains("-1.5"));

        let err = Error::OutOfBounds { x: 9, y: 2, width: 5, height: 5 };
        assert_eq!(format!("{err}"), "Out of bounds: (9, 2) is outside the 5x5 grid");
    }
}

//! Error types for algoviz-model.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when editing a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The coordinate lies outside the grid.
    #[error("cell ({x},{y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A grid needs at least one row and one column.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A sequence length or grid side above the supported maximum.
    #[error("size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: usize, max: usize },
}

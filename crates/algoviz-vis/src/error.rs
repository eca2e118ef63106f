//! Error types for the visualizer.

use thiserror::Error;

/// Result type for visualizer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in visualizer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The data cannot change while a run is playing or paused
    #[error("a run is in progress; stop it first")]
    Busy,

    /// Invalid grid edit or dimensions
    #[error(transparent)]
    Model(#[from] algoviz_model::Error),

    /// Malformed preferences file
    #[error("Preferences error: {0}")]
    Preferences(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for nessie-features

use thiserror::Error;

/// Errors that can occur during feature extraction
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] nessie_core::Error),

    /// A pattern without ink pixels
    #[error("degenerate pattern: {height}x{width} raster has no ink pixels")]
    DegeneratePattern { height: u32, width: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for feature extraction
pub type FeatureResult<T> = Result<T, FeatureError>;

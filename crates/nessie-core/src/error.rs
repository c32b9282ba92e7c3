//! Error types for nessie-core
//!
//! Provides a unified error type for the pixel containers and the
//! geometry types shared by the preprocessing and feature extraction
//! crates. Each variant carries enough context to explain which contract
//! was violated.

use thiserror::Error;

/// Nessie core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Zero-area or otherwise invalid dimensions
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Requested clip does not lie entirely within the source image
    #[error(
        "clip ({row}, {column}) {height}x{width} falls outside a {image_width}x{image_height} image"
    )]
    ClipOutOfBounds {
        row: u32,
        column: u32,
        height: u32,
        width: u32,
        image_width: u32,
        image_height: u32,
    },

    /// Pixel coordinates outside the buffer
    #[error("pixel ({row}, {column}) out of bounds for {height}x{width} buffer")]
    IndexOutOfBounds {
        row: u32,
        column: u32,
        height: u32,
        width: u32,
    },

    /// Raw data length disagrees with the declared dimensions
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// A region without pixels where one is required
    #[error("region has no pixels")]
    EmptyRegion,

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

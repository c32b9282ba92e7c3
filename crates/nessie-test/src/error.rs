//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write a debug image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Malformed synthetic fixture
    #[error("bad fixture: {0}")]
    Fixture(String),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] nessie_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;

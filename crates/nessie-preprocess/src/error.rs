//! Error types for nessie-preprocess

use crate::preprocessor::PipelineStage;
use thiserror::Error;

/// Errors that can occur during preprocessing
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] nessie_core::Error),

    /// A stage was invoked before the stage it depends on
    #[error("{operation} requires {required}, but the clip is {actual}")]
    StageOrder {
        /// Operation that was called
        operation: &'static str,
        /// Stage(s) the operation accepts
        required: &'static str,
        /// Stage the preprocessor was in
        actual: PipelineStage,
    },

    /// The clip handed to the preprocessor cannot be processed
    #[error("invalid clip: {0}")]
    InvalidClip(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for preprocessing operations
pub type PreprocessResult<T> = Result<T, PreprocessError>;

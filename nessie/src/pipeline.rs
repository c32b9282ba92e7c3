//! One-call pipeline from press clip to feature vectors
//!
//! Runs every preprocessing stage in order, then extracts one feature
//! vector per region.

use nessie_core::{Clip, FeatureExtractorStatistics, PreprocessorStatistics, Region};
use nessie_features::{FeatureError, FeatureExtractor, FeatureOptions, FeatureVector};
use nessie_io::IoError;
use nessie_preprocess::{PreprocessError, Preprocessor, PreprocessorOptions};
use std::path::Path;
use thiserror::Error;

/// Errors from any pipeline stage
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Image could not be read
    #[error("io error: {0}")]
    Io(#[from] IoError),

    /// Clip request or clip contents rejected
    #[error("core error: {0}")]
    Core(#[from] nessie_core::Error),

    /// Preprocessing failed
    #[error("preprocess error: {0}")]
    Preprocess(#[from] PreprocessError),

    /// Feature extraction failed
    #[error("feature error: {0}")]
    Feature(#[from] FeatureError),
}

/// Result type for pipeline runs
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Options for every stage of the pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub preprocessor: PreprocessorOptions,
    pub features: FeatureOptions,
}

impl PipelineOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preprocessing options
    pub fn with_preprocessor(mut self, options: PreprocessorOptions) -> Self {
        self.preprocessor = options;
        self
    }

    /// Set the feature extraction options
    pub fn with_features(mut self, options: FeatureOptions) -> Self {
        self.features = options;
        self
    }

    /// Validate all options
    pub fn validate(&self) -> PipelineResult<()> {
        self.preprocessor.validate()?;
        self.features.validate()?;
        Ok(())
    }
}

/// Everything the pipeline produces for one clip
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Regions in reading order, in clip coordinates
    pub regions: Vec<Region>,
    /// One vector per region, same order
    pub feature_vectors: Vec<FeatureVector>,
    /// Indices of regions preceded by a word space
    pub spaces: Vec<usize>,
    /// Mean region height, 0.0 for a blank clip
    pub average_character_height: f64,
    pub preprocessor_statistics: PreprocessorStatistics,
    pub feature_statistics: FeatureExtractorStatistics,
}

impl PipelineOutput {
    /// Whether no region was found.
    pub fn is_blank(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Run every stage on `clip`.
pub fn run(clip: Clip, options: &PipelineOptions) -> PipelineResult<PipelineOutput> {
    options.validate()?;

    let mut pre = Preprocessor::new(clip, options.preprocessor.clone())?;
    pre.run_all()?;
    let spaces = pre.spaces().to_vec();
    let average_character_height = pre.average_character_height();
    let (regions, preprocessor_statistics) = pre.into_parts();

    let mut extractor = FeatureExtractor::new(options.features.clone())?;
    let feature_vectors = extractor.extract(&regions)?;

    tracing::debug!(
        target: "nessie::pipeline",
        "{} regions, {} spaces, average height {:.2}",
        regions.len(),
        spaces.len(),
        average_character_height
    );

    Ok(PipelineOutput {
        regions,
        feature_vectors,
        spaces,
        average_character_height,
        preprocessor_statistics,
        feature_statistics: extractor.into_statistics(),
    })
}

/// Read an image, cut the clip `(row, column, height, width)` out of it
/// and run every stage.
pub fn run_file<P: AsRef<Path>>(
    path: P,
    rect: (u32, u32, u32, u32),
    options: &PipelineOptions,
) -> PipelineResult<PipelineOutput> {
    let image = nessie_io::read_image(path)?;
    let (row, column, height, width) = rect;
    let clip = Clip::new(&image, row, column, height, width)?;
    run(clip, options)
}

//! Aggregated preprocessing options

use crate::PreprocessResult;
use crate::filter::AveragingOptions;
use crate::segment::SegmentationOptions;
use crate::slant::SlantOptions;
use crate::spacing::SpacingOptions;
use crate::template::TemplateFilterOptions;

/// Options for every preprocessing stage
#[derive(Debug, Clone, Default)]
pub struct PreprocessorOptions {
    pub averaging: AveragingOptions,
    pub templates: TemplateFilterOptions,
    pub segmentation: SegmentationOptions,
    pub slant: SlantOptions,
    pub spacing: SpacingOptions,
}

impl PreprocessorOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the averaging filter options
    pub fn with_averaging(mut self, options: AveragingOptions) -> Self {
        self.averaging = options;
        self
    }

    /// Set the template filter options
    pub fn with_templates(mut self, options: TemplateFilterOptions) -> Self {
        self.templates = options;
        self
    }

    /// Set the segmentation options
    pub fn with_segmentation(mut self, options: SegmentationOptions) -> Self {
        self.segmentation = options;
        self
    }

    /// Set the slant correction options
    pub fn with_slant(mut self, options: SlantOptions) -> Self {
        self.slant = options;
        self
    }

    /// Set the word spacing options
    pub fn with_spacing(mut self, options: SpacingOptions) -> Self {
        self.spacing = options;
        self
    }

    /// Validate every stage's options
    pub fn validate(&self) -> PreprocessResult<()> {
        self.averaging.validate()?;
        self.templates.validate()?;
        self.segmentation.validate()?;
        self.slant.validate()?;
        self.spacing.validate()
    }
}

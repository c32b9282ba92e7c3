//! Feature extraction options

use crate::FeatureResult;
use crate::moments::MomentScheme;

/// Options for feature extraction
#[derive(Debug, Clone, Default)]
pub struct FeatureOptions {
    /// Moment scheme (default: Tchebichef of order 3)
    pub scheme: MomentScheme,
}

impl FeatureOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the moment scheme
    pub fn with_scheme(mut self, scheme: MomentScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Validate options
    pub fn validate(&self) -> FeatureResult<()> {
        self.scheme.validate()
    }
}

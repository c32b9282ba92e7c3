//! Image moment schemes
//!
//! Two schemes are available. They produce vectors of different lengths
//! and meanings, so a classifier trained on one cannot consume the other.
//!
//! - [`geometric`]: area, centroid and scale-normalized central moments
//! - [`tchebichef`]: orthonormal discrete Tchebichef moments

pub mod geometric;
pub mod tchebichef;

use crate::{FeatureError, FeatureResult};

/// Highest supported Tchebichef order
pub const MAX_TCHEBICHEF_ORDER: u32 = 12;

/// Moment scheme used to build feature vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentScheme {
    /// Geometric central moments, 15 values
    Geometric,
    /// Tchebichef moments of orders `0..=order` in both axes
    Tchebichef {
        /// Highest polynomial order
        order: u32,
    },
}

impl Default for MomentScheme {
    fn default() -> Self {
        MomentScheme::Tchebichef { order: 3 }
    }
}

impl MomentScheme {
    /// Length of every feature vector produced by the scheme.
    pub fn vector_len(self) -> usize {
        match self {
            MomentScheme::Geometric => geometric::GEOMETRIC_VECTOR_LEN,
            MomentScheme::Tchebichef { order } => {
                let n = order as usize + 1;
                n * n
            }
        }
    }

    /// Validate the scheme parameters
    pub fn validate(self) -> FeatureResult<()> {
        if let MomentScheme::Tchebichef { order } = self
            && order > MAX_TCHEBICHEF_ORDER
        {
            return Err(FeatureError::InvalidParameters(format!(
                "tchebichef order {} exceeds {}",
                order, MAX_TCHEBICHEF_ORDER
            )));
        }
        Ok(())
    }
}

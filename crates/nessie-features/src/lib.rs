//! nessie-features - moment feature vectors for segmented regions
//!
//! Each region is normalized and rasterized into a [`Pattern`]; the
//! [`FeatureExtractor`] reduces every pattern to a fixed-length
//! [`FeatureVector`] with one of two [`MomentScheme`]s:
//!
//! - **Geometric**: area, centroid and scale-normalized central moments
//! - **Tchebichef**: orthonormal discrete Tchebichef moments (default)
//!
//! # Quick Start
//!
//! ```no_run
//! use nessie_core::Region;
//! use nessie_features::{FeatureExtractor, FeatureOptions};
//!
//! let regions: Vec<Region> = Vec::new();
//! let mut extractor = FeatureExtractor::new(FeatureOptions::default()).unwrap();
//! let vectors = extractor.extract(&regions).unwrap();
//! println!("{}", extractor.statistics());
//! # let _ = vectors;
//! ```

mod error;
pub mod extractor;
pub mod feature_vector;
pub mod moments;
mod options;
pub mod pattern;

pub use error::{FeatureError, FeatureResult};

pub use extractor::FeatureExtractor;
pub use feature_vector::FeatureVector;
pub use moments::MomentScheme;
pub use options::FeatureOptions;
pub use pattern::Pattern;

// Re-export core for convenience
pub use nessie_core;

//! Nessie - press clip OCR core
//!
//! Isolates the printed characters of a grayscale press clip and reduces
//! each one to a moment feature vector for a downstream classifier.
//!
//! # Overview
//!
//! - Clip and region data structures (re-exported from `nessie-core`)
//! - Image decoding and debug output ([`io`])
//! - Smoothing, binarization, segmentation, slant correction and word
//!   spacing ([`preprocess`])
//! - Geometric and Tchebichef moment feature vectors ([`features`])
//! - All of the above in one call ([`pipeline`])
//!
//! # Example
//!
//! ```
//! use nessie::pipeline::{PipelineOptions, run};
//! use nessie::{Clip, GrayImage};
//!
//! let mut data = vec![255u8; 20 * 20];
//! for r in 8..12 {
//!     for c in 3..7 {
//!         data[r * 20 + c] = 0;
//!     }
//! }
//! let image = GrayImage::new(20, 20, data).unwrap();
//! let clip = Clip::from_image(&image).unwrap();
//! let output = run(clip, &PipelineOptions::default()).unwrap();
//! assert_eq!(output.regions.len(), 1);
//! ```

pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use nessie_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use nessie_features as features;
pub use nessie_io as io;
pub use nessie_preprocess as preprocess;

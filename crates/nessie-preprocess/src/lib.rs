//! nessie-preprocess - press clip preprocessing
//!
//! Turns a grayscale press clip into an ordered list of clean, upright ink
//! regions plus word spacing hints:
//!
//! - **Averaging filter** ([`filter`]): 3x3 weighted smoothing
//! - **Global thresholding** ([`threshold`]): Otsu binarization
//! - **Template filter** ([`template`]): hit-or-miss cleanup of the binary clip
//! - **Segmentation** ([`segment`]): flood fill, accent merge, reading order
//! - **Slant correction** ([`slant`]): per-region rotation search
//! - **Word spacing** ([`spacing`]): gaps between neighbouring regions
//!
//! [`Preprocessor`] owns the clip and runs the stages in order.
//!
//! # Quick Start
//!
//! ```no_run
//! use nessie_core::{Clip, GrayImage};
//! use nessie_preprocess::{Preprocessor, PreprocessorOptions};
//!
//! let image = GrayImage::filled(200, 50, 255).unwrap();
//! let clip = Clip::from_image(&image).unwrap();
//! let mut pre = Preprocessor::new(clip, PreprocessorOptions::default()).unwrap();
//! pre.run_all().unwrap();
//! println!("{} regions, spaces at {:?}", pre.regions().len(), pre.spaces());
//! ```

mod error;
pub mod filter;
mod options;
pub mod preprocessor;
pub mod segment;
pub mod slant;
pub mod spacing;
pub mod template;
pub mod threshold;

pub use error::{PreprocessError, PreprocessResult};

pub use filter::{AveragingMask, AveragingOptions};
pub use options::PreprocessorOptions;
pub use preprocessor::{PipelineStage, Preprocessor};
pub use segment::{Connectivity, LineDelimiter, SegmentationOptions};
pub use slant::{SlantEstimate, SlantOptions};
pub use spacing::SpacingOptions;
pub use template::{Template, TemplateFilterOptions, TemplateFilterOutcome};

// Re-export core for convenience
pub use nessie_core;

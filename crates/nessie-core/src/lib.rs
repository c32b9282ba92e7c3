//! Nessie Core - Basic data structures for press clip recognition
//!
//! This crate provides the data structures shared by the preprocessing
//! and feature extraction stages:
//!
//! - [`GrayImage`] - A decoded grayscale source image
//! - [`Clip`] - The press clip pixel buffer cut out of a source image
//! - [`Region`] - A set of ink pixels, candidate for one character
//! - [`Bounds`] - Inclusive bounding rectangles
//! - [`stats`] - Write-only statistics accumulators

pub mod bounds;
pub mod clip;
pub mod error;
pub mod image;
pub mod region;
pub mod stats;

pub use bounds::Bounds;
pub use clip::{Clip, ClipMode};
pub use error::{Error, Result};
pub use image::GrayImage;
pub use region::{PixelCoordinates, Region};
pub use stats::{
    Accumulate, FeatureExtractorStatistics, Measurement, NullStatistics, PreprocessorStatistics,
    Stage, StatsError, Stopwatch,
};

//! Word spacing detection

use crate::{PreprocessError, PreprocessResult};
use nessie_core::Region;

/// Options for word spacing detection
#[derive(Debug, Clone)]
pub struct SpacingOptions {
    /// Smallest blank gap, relative to the average character height,
    /// that separates two words (default: 0.4)
    pub gap_ratio: f64,
}

impl Default for SpacingOptions {
    fn default() -> Self {
        Self { gap_ratio: 0.4 }
    }
}

impl SpacingOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap ratio
    pub fn with_gap_ratio(mut self, ratio: f64) -> Self {
        self.gap_ratio = ratio;
        self
    }

    /// Validate options
    pub fn validate(&self) -> PreprocessResult<()> {
        if !(self.gap_ratio >= 0.0 && self.gap_ratio.is_finite()) {
            return Err(PreprocessError::InvalidParameters(
                "gap_ratio must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Indices of the regions that are preceded by a blank.
///
/// `regions` must be in reading order and `lines[i]` must hold the line of
/// `regions[i]`. Only neighbours on the same line are compared; the blank
/// gap between them is `next.left - prev.right - 1` pixels.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidParameters`] when `lines` and
/// `regions` differ in length or the options are invalid.
pub fn find_spaces(
    regions: &[Region],
    lines: &[usize],
    average_height: f64,
    options: &SpacingOptions,
) -> PreprocessResult<Vec<usize>> {
    options.validate()?;
    if regions.len() != lines.len() {
        return Err(PreprocessError::InvalidParameters(format!(
            "{} regions but {} line indices",
            regions.len(),
            lines.len()
        )));
    }

    let threshold = options.gap_ratio * average_height;
    let mut spaces = Vec::new();

    for i in 1..regions.len() {
        if lines[i] != lines[i - 1] {
            continue;
        }
        let (Some(prev), Some(next)) = (regions[i - 1].bounds(), regions[i].bounds()) else {
            continue;
        };
        let gap = i64::from(next.left) - i64::from(prev.right) - 1;
        if gap as f64 > threshold {
            spaces.push(i);
        }
    }

    Ok(spaces)
}

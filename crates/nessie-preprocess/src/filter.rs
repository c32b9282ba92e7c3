//! Averaging filter
//!
//! Weighted 3x3 mean over every interior pixel of a grayscale clip. Each
//! output value is computed from the original neighbourhood, never from
//! pixels already rewritten in the same pass. The one-pixel border is
//! copied through unchanged.

use crate::{PreprocessError, PreprocessResult};
use nessie_core::{Clip, ClipMode};

/// 3x3 averaging mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AveragingMask {
    /// Weights 1 1 1 / 1 2 1 / 1 1 1, normaliser 10
    #[default]
    CenterWeighted,
    /// Plain 3x3 box, normaliser 9
    Uniform,
}

impl AveragingMask {
    /// Row-major weights.
    pub fn weights(self) -> [u32; 9] {
        match self {
            AveragingMask::CenterWeighted => [1, 1, 1, 1, 2, 1, 1, 1, 1],
            AveragingMask::Uniform => [1; 9],
        }
    }

    /// Sum of the weights.
    pub fn normaliser(self) -> u32 {
        self.weights().iter().sum()
    }
}

/// Options for the averaging filter
#[derive(Debug, Clone, Default)]
pub struct AveragingOptions {
    /// Mask applied to interior pixels (default: center weighted)
    pub mask: AveragingMask,
}

impl AveragingOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mask
    pub fn with_mask(mut self, mask: AveragingMask) -> Self {
        self.mask = mask;
        self
    }

    /// Validate options
    pub fn validate(&self) -> PreprocessResult<()> {
        // Every mask variant is well formed
        Ok(())
    }
}

/// Smooth a grayscale clip in place.
///
/// Clips narrower or shorter than 3 pixels have no interior and are left
/// unchanged.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidClip`] if the clip is binary.
pub fn averaging_filter(clip: &mut Clip, options: &AveragingOptions) -> PreprocessResult<()> {
    options.validate()?;
    if clip.mode() != ClipMode::Grayscale {
        return Err(PreprocessError::InvalidClip(
            "averaging filter needs a grayscale clip".to_string(),
        ));
    }

    let w = clip.width() as usize;
    let h = clip.height() as usize;
    if w < 3 || h < 3 {
        return Ok(());
    }

    let weights = options.mask.weights();
    let norm = options.mask.normaliser();
    let half = norm / 2;
    let src = clip.data().to_vec();
    let dst = clip.data_mut();

    for r in 1..h - 1 {
        for c in 1..w - 1 {
            let mut acc = 0u32;
            for (k, weight) in weights.iter().enumerate() {
                let rr = r + k / 3 - 1;
                let cc = c + k % 3 - 1;
                acc += weight * u32::from(src[rr * w + cc]);
            }
            // Rounded weighted mean always fits in a byte
            dst[r * w + c] = ((acc + half) / norm) as u8;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_clip_is_unchanged() {
        let mut clip = Clip::from_rows(&[[100u8; 5]; 5]).unwrap();
        let before = clip.clone();
        averaging_filter(&mut clip, &AveragingOptions::default()).unwrap();
        assert_eq!(clip, before);
    }

    #[test]
    fn test_border_passes_through() {
        let mut clip = Clip::from_rows(&[[0u8, 0, 0], [0, 255, 0], [0, 0, 0]]).unwrap();
        averaging_filter(&mut clip, &AveragingOptions::default()).unwrap();
        // (2 * 255 + 5) / 10
        assert_eq!(clip.get(1, 1), Some(51));
        assert_eq!(clip.get(0, 0), Some(0));
        assert_eq!(clip.get(2, 1), Some(0));
    }

    #[test]
    fn test_uniform_mask() {
        let mut clip = Clip::from_rows(&[[9u8, 9, 9], [9, 0, 9], [9, 9, 9]]).unwrap();
        let opts = AveragingOptions::new().with_mask(AveragingMask::Uniform);
        averaging_filter(&mut clip, &opts).unwrap();
        assert_eq!(clip.get(1, 1), Some(8));
    }

    #[test]
    fn test_reads_original_neighbourhood() {
        let mut clip = Clip::from_rows(&[
            [255u8, 255, 255, 255],
            [255, 0, 255, 255],
            [255, 255, 255, 255],
        ])
        .unwrap();
        averaging_filter(&mut clip, &AveragingOptions::default()).unwrap();
        // (8 * 255 + 5) / 10
        assert_eq!(clip.get(1, 1), Some(204));
        // (9 * 255 + 5) / 10, using the original (1, 1) = 0
        assert_eq!(clip.get(1, 2), Some(230));
    }

    #[test]
    fn test_small_clip_unchanged() {
        let mut clip = Clip::from_rows(&[[0u8, 255], [255, 0]]).unwrap();
        let before = clip.clone();
        averaging_filter(&mut clip, &AveragingOptions::default()).unwrap();
        assert_eq!(clip, before);
    }

    #[test]
    fn test_binary_clip_rejected() {
        let mut clip = Clip::from_rows(&[[1u8; 3]; 3]).unwrap();
        clip.set_mode(ClipMode::Binary);
        assert!(averaging_filter(&mut clip, &AveragingOptions::default()).is_err());
    }
}

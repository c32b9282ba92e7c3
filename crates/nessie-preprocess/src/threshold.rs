//! Global thresholding with Otsu's method
//!
//! The threshold is the intensity `t` that maximizes the between-class
//! variance `w0 * w1 * (mu0 - mu1)^2`, where class 0 holds the pixels with
//! intensity `<= t`. Pixels in class 0 become ink (1), the brighter class
//! becomes background (0).

use crate::{PreprocessError, PreprocessResult};
use nessie_core::{Clip, ClipMode};

/// Compute Otsu's threshold from a 256-bin histogram.
///
/// Ties keep the smallest threshold. A histogram with a single occupied
/// bin (or no pixels at all) has no split and yields 0.
pub fn otsu_threshold(histogram: &[u32; 256]) -> u8 {
    let total: f64 = histogram.iter().map(|&n| f64::from(n)).sum();
    if total == 0.0 {
        return 0;
    }
    let weighted_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(v, &n)| v as f64 * f64::from(n))
        .sum();

    let mut best_threshold = 0u8;
    let mut best_variance = 0.0f64;
    let mut count0 = 0.0f64;
    let mut weighted0 = 0.0f64;

    for (t, &n) in histogram.iter().enumerate() {
        count0 += f64::from(n);
        weighted0 += t as f64 * f64::from(n);
        let count1 = total - count0;
        if count0 == 0.0 || count1 == 0.0 {
            continue;
        }

        let w0 = count0 / total;
        let w1 = count1 / total;
        let mu0 = weighted0 / count0;
        let mu1 = (weighted_total - weighted0) / count1;
        let variance = w0 * w1 * (mu0 - mu1) * (mu0 - mu1);

        if variance > best_variance {
            best_variance = variance;
            best_threshold = t as u8;
        }
    }

    best_threshold
}

/// Binarize a grayscale clip in place and return the chosen threshold.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidClip`] if the clip is already binary.
pub fn global_threshold(clip: &mut Clip) -> PreprocessResult<u8> {
    if clip.mode() != ClipMode::Grayscale {
        return Err(PreprocessError::InvalidClip(
            "global thresholding needs a grayscale clip".to_string(),
        ));
    }

    let threshold = otsu_threshold(&clip.histogram());
    for v in clip.data_mut() {
        *v = u8::from(*v <= threshold);
    }
    clip.set_mode(ClipMode::Binary);

    Ok(threshold)
}

/// Between-class variance for one candidate threshold.
///
/// Direct evaluation used to cross-check [`otsu_threshold`].
#[cfg(test)]
fn between_class_variance(histogram: &[u32; 256], t: usize) -> f64 {
    let (mut n0, mut s0, mut n1, mut s1) = (0.0, 0.0, 0.0, 0.0);
    for (v, &n) in histogram.iter().enumerate() {
        if v <= t {
            n0 += f64::from(n);
            s0 += v as f64 * f64::from(n);
        } else {
            n1 += f64::from(n);
            s1 += v as f64 * f64::from(n);
        }
    }
    if n0 == 0.0 || n1 == 0.0 {
        return 0.0;
    }
    let total = n0 + n1;
    let d = s0 / n0 - s1 / n1;
    (n0 / total) * (n1 / total) * d * d
}

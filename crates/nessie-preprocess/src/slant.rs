//! Slant correction
//!
//! Each region is rotated about its centroid through a sweep of candidate
//! angles. A candidate is scored by the differential square sum of the
//! column projection of the rotated region: upright strokes pile their
//! pixels into few columns and produce sharp steps between neighbouring
//! column counts, so the score peaks when the dominant stroke is vertical.
//!
//! # Algorithm
//!
//! 1. Rasterize the region into a mask over its bounding box.
//! 2. For every angle in `-sweep_range..=sweep_range` at `sweep_delta`,
//!    visited in order of increasing magnitude, rotate the mask by inverse
//!    nearest-neighbour mapping and score it.
//! 3. Keep the best angle only when it is beyond `tolerance` and beats the
//!    upright score by `min_score_gain`.
//!
//! Tilting a flat bar also sharpens its column projection, so the score
//! alone would turn hyphens and underscores into diagonals. A rotation is
//! therefore only applied when the principal axis of the region, taken
//! from its second central moments, lies within `sweep_range` of vertical.

use crate::{PreprocessError, PreprocessResult};
use nessie_core::{PixelCoordinates, Region};

/// Slack on the principal axis bound, so an exact diagonal stays eligible.
const AXIS_SLACK: f64 = 1e-9;

/// Options for slant correction
#[derive(Debug, Clone)]
pub struct SlantOptions {
    /// Half the sweep range in degrees (default: 45.0)
    pub sweep_range: f64,
    /// Angle increment in degrees (default: 1.0)
    pub sweep_delta: f64,
    /// Angles at or below this magnitude are not applied (default: 1.0)
    pub tolerance: f64,
    /// Required ratio of best score to upright score (default: 1.1)
    pub min_score_gain: f64,
}

impl Default for SlantOptions {
    fn default() -> Self {
        Self {
            sweep_range: 45.0,
            sweep_delta: 1.0,
            tolerance: 1.0,
            min_score_gain: 1.1,
        }
    }
}

impl SlantOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep range (half the full range)
    pub fn with_sweep_range(mut self, range: f64) -> Self {
        self.sweep_range = range;
        self
    }

    /// Set the sweep delta (angle increment)
    pub fn with_sweep_delta(mut self, delta: f64) -> Self {
        self.sweep_delta = delta;
        self
    }

    /// Set the tolerance around zero
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the minimum score gain
    pub fn with_min_score_gain(mut self, gain: f64) -> Self {
        self.min_score_gain = gain;
        self
    }

    /// Validate options
    pub fn validate(&self) -> PreprocessResult<()> {
        if !(self.sweep_range >= 0.0 && self.sweep_range <= 90.0) {
            return Err(PreprocessError::InvalidParameters(
                "sweep_range must be within 0..=90 degrees".to_string(),
            ));
        }
        if !(self.sweep_delta > 0.0 && self.sweep_delta.is_finite()) {
            return Err(PreprocessError::InvalidParameters(
                "sweep_delta must be positive".to_string(),
            ));
        }
        if !(self.tolerance >= 0.0 && self.tolerance.is_finite()) {
            return Err(PreprocessError::InvalidParameters(
                "tolerance must be non-negative".to_string(),
            ));
        }
        if !(self.min_score_gain >= 1.0 && self.min_score_gain.is_finite()) {
            return Err(PreprocessError::InvalidParameters(
                "min_score_gain must be at least 1.0".to_string(),
            ));
        }
        Ok(())
    }

    /// Candidate angles ordered by increasing magnitude, positive first.
    pub fn candidate_angles(&self) -> Vec<f64> {
        let steps = (self.sweep_range / self.sweep_delta + 1e-9).floor() as i64;
        let mut angles = Vec::with_capacity(2 * steps as usize + 1);
        angles.push(0.0);
        for k in 1..=steps {
            let a = k as f64 * self.sweep_delta;
            angles.push(a);
            angles.push(-a);
        }
        angles
    }
}

/// Result of [`estimate_slant`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlantEstimate {
    /// Best scoring angle in degrees
    pub angle: f64,
    /// Score at `angle`
    pub score: f64,
    /// Score of the unrotated region
    pub upright_score: f64,
    /// Principal axis of the region in degrees from vertical
    pub axis_angle: f64,
}

impl SlantEstimate {
    /// Whether the rotation is worth applying under `options`.
    pub fn is_significant(&self, options: &SlantOptions) -> bool {
        self.angle.abs() > options.tolerance
            && self.axis_angle.abs() <= options.sweep_range + AXIS_SLACK
            && self.score >= options.min_score_gain * self.upright_score
    }
}

/// Region mask over its bounding box, plus the centroid in mask coordinates.
struct Mask {
    top: i64,
    left: i64,
    height: i64,
    width: i64,
    data: Vec<bool>,
    center: (f64, f64),
}

impl Mask {
    fn from_region(region: &Region) -> Option<Self> {
        let b = region.bounds()?;
        let (cr, cc) = region.centroid()?;
        let height = i64::from(b.height());
        let width = i64::from(b.width());
        let mut data = vec![false; (height * width) as usize];
        for &(r, c) in region.coordinates() {
            let idx = i64::from(r - b.top) * width + i64::from(c - b.left);
            data[idx as usize] = true;
        }
        Some(Self {
            top: i64::from(b.top),
            left: i64::from(b.left),
            height,
            width,
            data,
            center: (cr - f64::from(b.top), cc - f64::from(b.left)),
        })
    }

    #[inline]
    fn is_ink(&self, r: i64, c: i64) -> bool {
        r >= 0
            && c >= 0
            && r < self.height
            && c < self.width
            && self.data[(r * self.width + c) as usize]
    }

    /// Half side of a square canvas that holds the mask at any rotation.
    fn radius(&self) -> i64 {
        let diag = ((self.height * self.height + self.width * self.width) as f64).sqrt();
        diag.ceil() as i64 + 1
    }

    /// Visit every ink pixel of the mask rotated by `degrees` about its
    /// centroid, in mask coordinates.
    fn for_each_rotated<F: FnMut(i64, i64)>(&self, degrees: f64, mut f: F) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (cr, cc) = self.center;
        let radius = self.radius();
        let r0 = cr.floor() as i64;
        let c0 = cc.floor() as i64;

        for r in r0 - radius..=r0 + radius {
            let dr = r as f64 - cr;
            for c in c0 - radius..=c0 + radius {
                let dc = c as f64 - cc;
                let sr = (cr + dr * cos - dc * sin).round() as i64;
                let sc = (cc + dr * sin + dc * cos).round() as i64;
                if self.is_ink(sr, sc) {
                    f(r, c);
                }
            }
        }
    }

    fn score(&self, degrees: f64) -> f64 {
        let radius = self.radius();
        let c0 = self.center.1.floor() as i64 - radius;
        let mut columns = vec![0u32; (2 * radius + 1) as usize];
        self.for_each_rotated(degrees, |_, c| columns[(c - c0) as usize] += 1);
        differential_square_sum(&columns)
    }
}

/// Sum of squared differences between neighbouring counts.
///
/// The sequence is padded with a zero at both ends.
pub fn differential_square_sum(counts: &[u32]) -> f64 {
    let mut sum = 0.0f64;
    let mut prev = 0.0f64;
    for &n in counts.iter().chain(std::iter::once(&0)) {
        let v = f64::from(n);
        sum += (v - prev) * (v - prev);
        prev = v;
    }
    sum
}

/// Orientation of the principal axis of a region, in degrees from vertical.
///
/// The result lies in `-90.0..=90.0`: 0.0 for a vertical stroke, ±45.0 for
/// a diagonal and 90.0 for a horizontal bar. Regions without a dominant
/// direction, such as a square or a single pixel, give 0.0. Returns `None`
/// for an empty region.
pub fn principal_axis_angle(region: &Region) -> Option<f64> {
    let (cr, cc) = region.centroid()?;
    let (mut mu_rr, mut mu_cc, mut mu_rc) = (0.0f64, 0.0f64, 0.0f64);
    for &(r, c) in region.coordinates() {
        let dr = f64::from(r) - cr;
        let dc = f64::from(c) - cc;
        mu_rr += dr * dr;
        mu_cc += dc * dc;
        mu_rc += dr * dc;
    }
    Some((0.5 * (2.0 * mu_rc).atan2(mu_rr - mu_cc)).to_degrees())
}

/// Find the best scoring rotation of a region.
///
/// Ties keep the angle visited first, i.e. the smallest magnitude.
/// Returns `None` for an empty region.
pub fn estimate_slant(region: &Region, options: &SlantOptions) -> Option<SlantEstimate> {
    let mask = Mask::from_region(region)?;
    let axis_angle = principal_axis_angle(region)?;
    let upright_score = mask.score(0.0);
    let mut best = SlantEstimate {
        angle: 0.0,
        score: upright_score,
        upright_score,
        axis_angle,
    };
    for angle in options.candidate_angles().into_iter().skip(1) {
        let score = mask.score(angle);
        if score > best.score {
            best.score = score;
            best.angle = angle;
        }
    }
    Some(best)
}

/// Pixels of `region` rotated by `degrees` about its centroid.
///
/// Coordinates are shifted as a whole when the rotation would make any
/// of them negative.
pub fn rotate_region(region: &Region, degrees: f64) -> Vec<PixelCoordinates> {
    let Some(mask) = Mask::from_region(region) else {
        return Vec::new();
    };
    let mut pixels = Vec::with_capacity(region.size());
    mask.for_each_rotated(degrees, |r, c| pixels.push((r + mask.top, c + mask.left)));

    let min_r = pixels.iter().map(|p| p.0).min().unwrap_or(0).min(0);
    let min_c = pixels.iter().map(|p| p.1).min().unwrap_or(0).min(0);
    pixels
        .into_iter()
        .map(|(r, c)| ((r - min_r) as u32, (c - min_c) as u32))
        .collect()
}

/// Straighten a region in place and return the applied angle.
///
/// Returns 0.0 and leaves the region untouched when no candidate is
/// significant.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidParameters`] for invalid options.
pub fn correct_slant(region: &mut Region, options: &SlantOptions) -> PreprocessResult<f64> {
    options.validate()?;
    let Some(estimate) = estimate_slant(region, options) else {
        return Ok(0.0);
    };
    if !estimate.is_significant(options) {
        tracing::trace!(
            target: "nessie::preprocess",
            "slant {:.1} deg rejected, axis {:.1} deg, score {:.1} (upright {:.1})",
            estimate.angle,
            estimate.axis_angle,
            estimate.score,
            estimate.upright_score
        );
        return Ok(0.0);
    }

    let rotated = rotate_region(region, estimate.angle);
    if rotated.is_empty() {
        return Ok(0.0);
    }
    tracing::trace!(
        target: "nessie::preprocess",
        "slant {:.1} deg, score {:.1} (upright {:.1})",
        estimate.angle,
        estimate.score,
        estimate.upright_score
    );
    region.replace_coordinates(rotated);
    Ok(estimate.angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nessie_test::synth::{region, square_region};

    fn diagonal(len: u32, top: u32, left: u32) -> Region {
        (0..len).map(|k| (top + k, left + k)).collect()
    }

    fn bar(top: u32, left: u32, height: u32, width: u32) -> Region {
        (top..top + height)
            .flat_map(|r| (left..left + width).map(move |c| (r, c)))
            .collect()
    }

    #[test]
    fn test_differential_square_sum_pads_with_zero() {
        assert_eq!(differential_square_sum(&[]), 0.0);
        assert_eq!(differential_square_sum(&[3]), 18.0);
        assert_eq!(differential_square_sum(&[1, 1, 1]), 2.0);
        assert_eq!(differential_square_sum(&[0, 4, 0]), 32.0);
    }

    #[test]
    fn test_candidate_angles_order() {
        let opts = SlantOptions::new().with_sweep_range(2.0);
        assert_eq!(opts.candidate_angles(), vec![0.0, 1.0, -1.0, 2.0, -2.0]);
        assert_eq!(SlantOptions::default().candidate_angles().len(), 91);
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let region = diagonal(7, 3, 5);
        let mut rotated = rotate_region(&region, 0.0);
        let mut original = region.coordinates().to_vec();
        rotated.sort_unstable();
        original.sort_unstable();
        assert_eq!(rotated, original);
    }

    #[test]
    fn test_upright_square_untouched() {
        let mut region = square_region(10, 10, 5);
        let before = region.clone();
        let angle = correct_slant(&mut region, &SlantOptions::default()).unwrap();
        assert_eq!(angle, 0.0);
        assert_eq!(region, before);
    }

    #[test]
    fn test_vertical_bar_untouched() {
        let mut region: Region = (0..12).map(|r| (r + 4, 6)).collect();
        let before = region.clone();
        assert_eq!(correct_slant(&mut region, &SlantOptions::default()).unwrap(), 0.0);
        assert_eq!(region, before);
    }

    #[test]
    fn test_principal_axis_angle() {
        let vertical: Region = (0..10).map(|r| (r, 3)).collect();
        let anti: Region = (0..9).map(|k| (10 + k, 20 - k)).collect();
        assert_eq!(principal_axis_angle(&vertical), Some(0.0));
        assert_eq!(principal_axis_angle(&bar(4, 2, 1, 9)), Some(90.0));
        assert_eq!(principal_axis_angle(&square_region(0, 0, 4)), Some(0.0));
        let diag = principal_axis_angle(&diagonal(9, 0, 0)).unwrap();
        assert!((diag - 45.0).abs() < 1e-9, "diag {}", diag);
        let anti = principal_axis_angle(&anti).unwrap();
        assert!((anti + 45.0).abs() < 1e-9, "anti {}", anti);
        assert!(principal_axis_angle(&Region::new()).is_none());
    }

    #[test]
    fn test_horizontal_bars_untouched() {
        let options = SlantOptions::default();
        for (height, width) in [(1, 8), (2, 12), (1, 20), (1, 4)] {
            let mut region = bar(5, 3, height, width);
            let before = region.clone();

            // Tilting a bar sharpens its column projection
            let estimate = estimate_slant(&region, &options).unwrap();
            assert!(estimate.score > estimate.upright_score);
            assert_eq!(estimate.axis_angle, 90.0);
            assert!(!estimate.is_significant(&options));

            let angle = correct_slant(&mut region, &options).unwrap();
            assert_eq!(angle, 0.0, "{}x{}", height, width);
            assert_eq!(region, before, "{}x{}", height, width);
        }
    }

    #[test]
    fn test_upright_glyphs_untouched() {
        let glyphs: [&[&str]; 5] = [
            &["#####", "..#..", "..#..", "..#..", "..#..", "..#.."],
            &["#....", "#....", "#....", "#....", "#....", "#####"],
            &["####", "#...", "###.", "#...", "#...", "#..."],
            &["..#..", "..#..", "#####", "..#..", "..#.."],
            &["#..#", "#..#", "####", "#..#", "#..#", "#..#"],
        ];
        for rows in glyphs {
            let mut glyph = region(rows, 7, 11).unwrap();
            let before = glyph.clone();
            let angle = correct_slant(&mut glyph, &SlantOptions::default()).unwrap();
            assert_eq!(angle, 0.0, "{:?}", rows);
            assert_eq!(glyph, before, "{:?}", rows);
        }
    }

    #[test]
    fn test_anti_diagonal_stroke_is_straightened() {
        let mut region: Region = (0..15).map(|k| (20 + k, 40 - k)).collect();
        let angle = correct_slant(&mut region, &SlantOptions::default()).unwrap();
        assert!(angle.abs() > 30.0, "angle {}", angle);
        assert!(region.width() <= 3, "width {}", region.width());
    }

    #[test]
    fn test_diagonal_stroke_is_straightened() {
        let mut region = diagonal(15, 20, 20);
        let (cr, cc) = region.centroid().unwrap();
        let angle = correct_slant(&mut region, &SlantOptions::default()).unwrap();
        assert!(angle.abs() > 30.0, "angle {}", angle);
        assert!(region.width() <= 3, "width {}", region.width());
        assert!(region.height() >= 15);

        let (nr, nc) = region.centroid().unwrap();
        assert!((nr - cr).abs() <= 1.0);
        assert!((nc - cc).abs() <= 1.0);
    }

    #[test]
    fn test_rotation_near_origin_stays_non_negative() {
        let region = diagonal(9, 0, 0);
        let rotated = rotate_region(&region, 45.0);
        assert!(!rotated.is_empty());
        // The stroke turns into one column reaching above row 0
        assert_eq!(rotated.len(), 13);
        assert_eq!(rotated.iter().map(|p| p.0).min(), Some(0));
        assert!(rotated.iter().all(|p| p.1 == 4));
    }

    #[test]
    fn test_single_pixel_not_rotated() {
        let mut region = Region::from_coordinates([(3, 3)]);
        assert_eq!(correct_slant(&mut region, &SlantOptions::default()).unwrap(), 0.0);
        assert_eq!(region.coordinates(), &[(3, 3)]);
    }

    #[test]
    fn test_validate() {
        assert!(SlantOptions::default().validate().is_ok());
        assert!(SlantOptions::new().with_sweep_delta(0.0).validate().is_err());
        assert!(SlantOptions::new().with_min_score_gain(0.5).validate().is_err());
        assert!(SlantOptions::new().with_sweep_range(120.0).validate().is_err());
    }
}

//! Preprocessor - the staged pipeline over one press clip
//!
//! The preprocessor owns the clip and tracks which stage has run last.
//! Each operation checks that stage before touching the clip and fails
//! with [`PreprocessError::StageOrder`] when called out of order:
//!
//! | operation | accepted stages | next stage |
//! |---|---|---|
//! | `apply_averaging_filter` | grayscale | smoothed |
//! | `apply_global_thresholding` | grayscale, smoothed | binary |
//! | `apply_template_filters` | binary | filtered |
//! | `extract_regions` | filtered | segmented |
//! | `correct_slanting` | segmented | deskewed |
//! | `find_spaces_between_words` | segmented, deskewed | unchanged |
//!
//! Slant correction moves region pixels, so it discards any word spaces
//! found before it ran.

use crate::filter::averaging_filter;
use crate::options::PreprocessorOptions;
use crate::segment::{LineDelimiter, average_height, segment};
use crate::slant::correct_slant;
use crate::spacing::find_spaces;
use crate::template::{TemplateFilterOutcome, apply_templates};
use crate::threshold::global_threshold;
use crate::{PreprocessError, PreprocessResult};
use nessie_core::stats::record;
use nessie_core::{
    Accumulate, Clip, ClipMode, Measurement, PreprocessorStatistics, Region, Stage, Stopwatch,
};
use std::fmt;

const TARGET: &str = "nessie::preprocess";

/// Last stage applied to the clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    /// Raw grayscale input
    Grayscale,
    /// Averaging filter applied
    Smoothed,
    /// Binarized
    Binary,
    /// Template filter applied
    Filtered,
    /// Regions extracted, merged and sorted
    Segmented,
    /// Slant corrected
    Deskewed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Grayscale => "grayscale",
            PipelineStage::Smoothed => "smoothed",
            PipelineStage::Binary => "binary",
            PipelineStage::Filtered => "filtered",
            PipelineStage::Segmented => "segmented",
            PipelineStage::Deskewed => "deskewed",
        };
        f.write_str(name)
    }
}

/// Press clip preprocessor
///
/// # Example
///
/// ```
/// use nessie_core::{Clip, GrayImage};
/// use nessie_preprocess::{Preprocessor, PreprocessorOptions};
///
/// let mut data = vec![255u8; 12 * 12];
/// for r in 4..8 {
///     for c in 4..8 {
///         data[r * 12 + c] = 0;
///     }
/// }
/// let image = GrayImage::new(12, 12, data).unwrap();
/// let clip = Clip::from_image(&image).unwrap();
///
/// let mut pre = Preprocessor::new(clip, PreprocessorOptions::default()).unwrap();
/// pre.apply_averaging_filter().unwrap();
/// pre.apply_global_thresholding().unwrap();
/// pre.apply_template_filters().unwrap();
/// pre.extract_regions().unwrap();
/// assert_eq!(pre.regions().len(), 1);
/// ```
pub struct Preprocessor<S: Accumulate = PreprocessorStatistics> {
    clip: Clip,
    options: PreprocessorOptions,
    stage: PipelineStage,
    regions: Vec<Region>,
    lines: Vec<usize>,
    delimiters: Vec<LineDelimiter>,
    average_character_height: f64,
    slant_angles: Vec<f64>,
    spaces: Vec<usize>,
    statistics: S,
}

impl Preprocessor<PreprocessorStatistics> {
    /// Create a preprocessor collecting [`PreprocessorStatistics`].
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessError::InvalidClip`] if the clip is not
    /// grayscale, or an options validation error.
    pub fn new(clip: Clip, options: PreprocessorOptions) -> PreprocessResult<Self> {
        Self::with_statistics(clip, options, PreprocessorStatistics::default())
    }
}

impl<S: Accumulate> Preprocessor<S> {
    /// Create a preprocessor reporting into `statistics`.
    pub fn with_statistics(
        clip: Clip,
        options: PreprocessorOptions,
        mut statistics: S,
    ) -> PreprocessResult<Self> {
        options.validate()?;
        if clip.mode() != ClipMode::Grayscale {
            return Err(PreprocessError::InvalidClip(
                "the preprocessor starts from a grayscale clip".to_string(),
            ));
        }
        record(&mut statistics, Measurement::ClipSize(clip.size()));
        tracing::debug!(
            target: TARGET,
            "preprocessor created for {}x{} clip at ({}, {})",
            clip.width(),
            clip.height(),
            clip.row(),
            clip.column()
        );

        Ok(Self {
            clip,
            options,
            stage: PipelineStage::Grayscale,
            regions: Vec::new(),
            lines: Vec::new(),
            delimiters: Vec::new(),
            average_character_height: 0.0,
            slant_angles: Vec::new(),
            spaces: Vec::new(),
            statistics,
        })
    }

    fn require(
        &self,
        operation: &'static str,
        required: &'static str,
        accepted: &[PipelineStage],
    ) -> PreprocessResult<()> {
        if accepted.contains(&self.stage) {
            Ok(())
        } else {
            Err(PreprocessError::StageOrder {
                operation,
                required,
                actual: self.stage,
            })
        }
    }

    fn finish(&mut self, watch: Stopwatch, stage: Stage) {
        let m = watch.measurement(stage);
        if let Measurement::Elapsed { seconds, .. } = m {
            tracing::debug!(target: TARGET, "{:?} took {:.6} s", stage, seconds);
        }
        record(&mut self.statistics, m);
    }

    /// Smooth the grayscale clip.
    pub fn apply_averaging_filter(&mut self) -> PreprocessResult<()> {
        self.require(
            "averaging filter",
            "a grayscale clip",
            &[PipelineStage::Grayscale],
        )?;
        let watch = Stopwatch::start();
        averaging_filter(&mut self.clip, &self.options.averaging)?;
        self.stage = PipelineStage::Smoothed;
        self.finish(watch, Stage::AveragingFilter);
        Ok(())
    }

    /// Binarize the clip with Otsu's threshold and return the threshold.
    pub fn apply_global_thresholding(&mut self) -> PreprocessResult<u8> {
        self.require(
            "global thresholding",
            "a grayscale or smoothed clip",
            &[PipelineStage::Grayscale, PipelineStage::Smoothed],
        )?;
        let watch = Stopwatch::start();
        let threshold = global_threshold(&mut self.clip)?;
        self.stage = PipelineStage::Binary;
        tracing::debug!(
            target: TARGET,
            "global threshold {} leaves {} ink pixels",
            threshold,
            self.clip.ink_count()
        );
        self.finish(watch, Stage::GlobalThresholding);
        Ok(threshold)
    }

    /// Clean the binary clip with the template bank.
    pub fn apply_template_filters(&mut self) -> PreprocessResult<TemplateFilterOutcome> {
        self.require(
            "template filter",
            "a binary clip",
            &[PipelineStage::Binary],
        )?;
        let watch = Stopwatch::start();
        let outcome = apply_templates(&mut self.clip, &self.options.templates)?;
        if !outcome.converged {
            tracing::warn!(
                target: TARGET,
                "template filter stopped after {} passes without converging",
                outcome.passes
            );
        }
        self.stage = PipelineStage::Filtered;
        self.finish(watch, Stage::TemplateFilter);
        Ok(outcome)
    }

    /// Extract, merge and sort the regions of the binary clip.
    ///
    /// Returns the number of regions.
    pub fn extract_regions(&mut self) -> PreprocessResult<usize> {
        self.require(
            "region extraction",
            "a filtered binary clip",
            &[PipelineStage::Filtered],
        )?;
        let watch = Stopwatch::start();
        let seg = segment(&self.clip, &self.options.segmentation)?;
        self.regions = seg.regions;
        self.lines = seg.lines;
        self.delimiters = seg.delimiters;
        self.average_character_height = match average_height(&self.regions) {
            Some(h) => h,
            None => {
                tracing::warn!(target: TARGET, "no regions found, the clip is blank");
                0.0
            }
        };
        self.stage = PipelineStage::Segmented;

        record(
            &mut self.statistics,
            Measurement::RegionCount(self.regions.len()),
        );
        self.finish(watch, Stage::RegionExtraction);
        Ok(self.regions.len())
    }

    /// Straighten every region.
    pub fn correct_slanting(&mut self) -> PreprocessResult<()> {
        self.require(
            "slant correction",
            "segmented regions",
            &[PipelineStage::Segmented],
        )?;
        let watch = Stopwatch::start();
        let mut angles = Vec::with_capacity(self.regions.len());
        for region in &mut self.regions {
            angles.push(correct_slant(region, &self.options.slant)?);
        }
        let corrected = angles.iter().filter(|a| **a != 0.0).count();
        tracing::debug!(
            target: TARGET,
            "slant corrected on {} of {} regions",
            corrected,
            angles.len()
        );
        self.slant_angles = angles;
        if !self.spaces.is_empty() {
            tracing::debug!(
                target: TARGET,
                "discarding {} word spaces found before slant correction",
                self.spaces.len()
            );
            self.spaces.clear();
        }
        self.stage = PipelineStage::Deskewed;
        self.finish(watch, Stage::SlantCorrection);
        Ok(())
    }

    /// Find the regions preceded by a word space.
    pub fn find_spaces_between_words(&mut self) -> PreprocessResult<Vec<usize>> {
        self.require(
            "word spacing",
            "segmented or deskewed regions",
            &[PipelineStage::Segmented, PipelineStage::Deskewed],
        )?;
        let watch = Stopwatch::start();
        self.spaces = find_spaces(
            &self.regions,
            &self.lines,
            self.average_character_height,
            &self.options.spacing,
        )?;
        tracing::debug!(target: TARGET, "{} word spaces", self.spaces.len());
        self.finish(watch, Stage::SpaceDetection);
        Ok(self.spaces.clone())
    }

    /// Run every stage in order.
    pub fn run_all(&mut self) -> PreprocessResult<()> {
        self.apply_averaging_filter()?;
        self.apply_global_thresholding()?;
        self.apply_template_filters()?;
        self.extract_regions()?;
        self.correct_slanting()?;
        self.find_spaces_between_words()?;
        Ok(())
    }

    /// Last stage applied.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Current clip contents.
    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    /// Regions in reading order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Line index of every region.
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// Text bands found during segmentation.
    pub fn line_delimiters(&self) -> &[LineDelimiter] {
        &self.delimiters
    }

    /// Mean region height, 0.0 for a blank clip.
    pub fn average_character_height(&self) -> f64 {
        self.average_character_height
    }

    /// Whether segmentation found no regions.
    pub fn is_blank(&self) -> bool {
        self.stage >= PipelineStage::Segmented && self.regions.is_empty()
    }

    /// Rotation applied to every region, 0.0 where none was.
    pub fn slant_angles(&self) -> &[f64] {
        &self.slant_angles
    }

    /// Space indices from the last word spacing run.
    pub fn spaces(&self) -> &[usize] {
        &self.spaces
    }

    /// Statistics sink.
    pub fn statistics(&self) -> &S {
        &self.statistics
    }

    /// Take the regions and the statistics sink.
    pub fn into_parts(self) -> (Vec<Region>, S) {
        (self.regions, self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateFilterOptions;
    use nessie_core::NullStatistics;
    use nessie_test::synth::{gray_clip, image_with_squares};

    fn squares_clip() -> Clip {
        let image = image_with_squares(20, 20, &[(8, 3, 4), (8, 13, 4)]).unwrap();
        Clip::from_image(&image).unwrap()
    }

    #[test]
    fn test_out_of_order_fails_fast() {
        let mut pre = Preprocessor::new(squares_clip(), PreprocessorOptions::default()).unwrap();
        let err = pre.extract_regions().unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::StageOrder {
                actual: PipelineStage::Grayscale,
                ..
            }
        ));
        assert!(pre.apply_template_filters().is_err());
        assert!(pre.correct_slanting().is_err());
        assert!(pre.find_spaces_between_words().is_err());
        assert!(!pre.is_blank());
    }

    #[test]
    fn test_stage_cannot_repeat() {
        let mut pre = Preprocessor::new(squares_clip(), PreprocessorOptions::default()).unwrap();
        pre.apply_averaging_filter().unwrap();
        assert!(pre.apply_averaging_filter().is_err());
        pre.apply_global_thresholding().unwrap();
        assert!(pre.apply_global_thresholding().is_err());
        assert!(pre.apply_averaging_filter().is_err());
        assert_eq!(pre.stage(), PipelineStage::Binary);
    }

    #[test]
    fn test_extraction_needs_template_filter() {
        let mut pre = Preprocessor::new(squares_clip(), PreprocessorOptions::default()).unwrap();
        pre.apply_averaging_filter().unwrap();
        pre.apply_global_thresholding().unwrap();
        let err = pre.extract_regions().unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::StageOrder {
                actual: PipelineStage::Binary,
                ..
            }
        ));
        pre.apply_template_filters().unwrap();
        assert_eq!(pre.extract_regions().unwrap(), 2);
    }

    #[test]
    fn test_slant_correction_discards_earlier_spaces() {
        let mut pre = Preprocessor::new(squares_clip(), PreprocessorOptions::default()).unwrap();
        pre.apply_averaging_filter().unwrap();
        pre.apply_global_thresholding().unwrap();
        pre.apply_template_filters().unwrap();
        pre.extract_regions().unwrap();
        assert_eq!(pre.find_spaces_between_words().unwrap(), vec![1]);
        assert_eq!(pre.spaces(), &[1]);

        pre.correct_slanting().unwrap();
        assert!(pre.spaces().is_empty());
        assert_eq!(pre.find_spaces_between_words().unwrap(), vec![1]);
    }

    const DOTTED: [&str; 8] = [
        "........",
        "...#....",
        "........",
        "..###...",
        "..###...",
        "..###...",
        "..###...",
        "........",
    ];

    fn segment_dotted(options: PreprocessorOptions) -> Vec<Region> {
        let mut pre = Preprocessor::new(gray_clip(&DOTTED).unwrap(), options).unwrap();
        pre.apply_global_thresholding().unwrap();
        pre.apply_template_filters().unwrap();
        pre.extract_regions().unwrap();
        pre.into_parts().0
    }

    #[test]
    fn test_default_templates_erase_single_pixel_dot() {
        let regions = segment_dotted(PreprocessorOptions::default());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].size(), 12);
        assert_eq!(regions[0].height(), 4);
    }

    #[test]
    fn test_single_pixel_dot_merges_without_templates() {
        let options = PreprocessorOptions::default()
            .with_templates(TemplateFilterOptions::new().with_templates(Vec::new()));
        let regions = segment_dotted(options);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].size(), 13);
        assert_eq!(regions[0].height(), 6);
        assert_eq!(regions[0][0], (3, 2));
    }

    #[test]
    fn test_binary_clip_rejected_at_construction() {
        let mut clip = squares_clip();
        clip.set_mode(ClipMode::Binary);
        assert!(Preprocessor::new(clip, PreprocessorOptions::default()).is_err());
    }

    #[test]
    fn test_full_run_on_two_squares() {
        let mut pre = Preprocessor::new(squares_clip(), PreprocessorOptions::default()).unwrap();
        pre.apply_averaging_filter().unwrap();
        let t = pre.apply_global_thresholding().unwrap();
        assert_eq!(t, 128);
        pre.apply_template_filters().unwrap();
        assert_eq!(pre.extract_regions().unwrap(), 2);
        pre.correct_slanting().unwrap();
        let spaces = pre.find_spaces_between_words().unwrap();

        assert_eq!(pre.slant_angles(), &[0.0, 0.0]);
        assert_eq!(spaces, vec![1]);
        assert_eq!(pre.average_character_height(), 4.0);
        assert_eq!(pre.regions()[0].size(), 16);
        assert_eq!(pre.regions()[1].size(), 16);
        assert!(pre.regions()[0].bounds().unwrap().left < pre.regions()[1].bounds().unwrap().left);

        let stats = pre.statistics();
        assert_eq!(stats.clip_size, 400);
        assert_eq!(stats.region_count, 2);
        assert!(stats.total_time() >= 0.0);
    }

    #[test]
    fn test_blank_clip() {
        let clip = gray_clip(&["....", "....", "...."]).unwrap();
        let mut pre =
            Preprocessor::with_statistics(clip, PreprocessorOptions::default(), NullStatistics)
                .unwrap();
        pre.run_all().unwrap();
        assert!(pre.is_blank());
        assert_eq!(pre.average_character_height(), 0.0);
        assert!(pre.spaces().is_empty());
    }

    #[test]
    fn test_stage_order_message() {
        let mut pre = Preprocessor::new(squares_clip(), PreprocessorOptions::default()).unwrap();
        let msg = pre.correct_slanting().unwrap_err().to_string();
        assert!(msg.contains("slant correction"));
        assert!(msg.contains("grayscale"));
    }
}

//! Processing statistics
//!
//! The recognition core reports counters and elapsed times through the
//! write-only [`Accumulate`] trait. It never reads the values back, and a
//! failing accumulator never aborts processing: [`record`] logs and drops
//! the error.

use std::fmt;
use std::time::Instant;
use thiserror::Error;

/// Processing stages that report elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    AveragingFilter,
    GlobalThresholding,
    TemplateFilter,
    RegionExtraction,
    SlantCorrection,
    SpaceDetection,
    MomentComputation,
}

impl Stage {
    /// Whether the stage belongs to the preprocessor.
    pub fn is_preprocessing(self) -> bool {
        !matches!(self, Stage::MomentComputation)
    }
}

/// One value reported by the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Press clip size in pixels
    ClipSize(usize),
    /// Wall time spent in a stage
    Elapsed { stage: Stage, seconds: f64 },
    /// Regions produced by segmentation
    RegionCount(usize),
    /// Patterns handed to the feature extractor
    PatternCount(usize),
}

/// Errors an accumulator may report.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The accumulator does not track this measurement
    #[error("measurement not tracked by this accumulator: {0:?}")]
    Unsupported(Measurement),

    /// The accumulator could not store the measurement
    #[error("statistics sink unavailable: {0}")]
    Unavailable(String),
}

/// Write-only statistics sink.
pub trait Accumulate {
    /// Store one measurement.
    fn accumulate(&mut self, measurement: Measurement) -> Result<(), StatsError>;
}

/// Report a measurement, discarding any accumulator failure.
pub fn record(sink: &mut dyn Accumulate, measurement: Measurement) {
    if let Err(e) = sink.accumulate(measurement) {
        tracing::trace!(target: "nessie::stats", "statistics dropped: {}", e);
    }
}

/// Accumulator that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStatistics;

impl Accumulate for NullStatistics {
    fn accumulate(&mut self, _measurement: Measurement) -> Result<(), StatsError> {
        Ok(())
    }
}

/// Statistics gathered while preprocessing one press clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessorStatistics {
    pub clip_size: usize,
    pub region_count: usize,
    pub averaging_filter_time: f64,
    pub global_thresholding_time: f64,
    pub template_filter_time: f64,
    pub region_extraction_time: f64,
    pub slant_correction_time: f64,
    pub space_detection_time: f64,
}

impl PreprocessorStatistics {
    /// Sum of all stage times in seconds.
    pub fn total_time(&self) -> f64 {
        self.averaging_filter_time
            + self.global_thresholding_time
            + self.template_filter_time
            + self.region_extraction_time
            + self.slant_correction_time
            + self.space_detection_time
    }
}

impl Accumulate for PreprocessorStatistics {
    fn accumulate(&mut self, measurement: Measurement) -> Result<(), StatsError> {
        match measurement {
            Measurement::ClipSize(n) => self.clip_size = n,
            Measurement::RegionCount(n) => self.region_count = n,
            Measurement::Elapsed { stage, seconds } => {
                let slot = match stage {
                    Stage::AveragingFilter => &mut self.averaging_filter_time,
                    Stage::GlobalThresholding => &mut self.global_thresholding_time,
                    Stage::TemplateFilter => &mut self.template_filter_time,
                    Stage::RegionExtraction => &mut self.region_extraction_time,
                    Stage::SlantCorrection => &mut self.slant_correction_time,
                    Stage::SpaceDetection => &mut self.space_detection_time,
                    Stage::MomentComputation => return Err(StatsError::Unsupported(measurement)),
                };
                *slot += seconds;
            }
            Measurement::PatternCount(_) => return Err(StatsError::Unsupported(measurement)),
        }
        Ok(())
    }
}

impl fmt::Display for PreprocessorStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Preprocessing statistics")?;
        writeln!(f, "  clip size:            {} pixels", self.clip_size)?;
        writeln!(f, "  regions found:        {}", self.region_count)?;
        writeln!(f, "  averaging filter:     {:.6} s", self.averaging_filter_time)?;
        writeln!(f, "  global thresholding:  {:.6} s", self.global_thresholding_time)?;
        writeln!(f, "  template filter:      {:.6} s", self.template_filter_time)?;
        writeln!(f, "  region extraction:    {:.6} s", self.region_extraction_time)?;
        writeln!(f, "  slant correction:     {:.6} s", self.slant_correction_time)?;
        writeln!(f, "  space detection:      {:.6} s", self.space_detection_time)?;
        write!(f, "  total:                {:.6} s", self.total_time())
    }
}

/// Statistics gathered while computing feature vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureExtractorStatistics {
    pub pattern_count: usize,
    pub moments_computing_time: f64,
}

impl Accumulate for FeatureExtractorStatistics {
    fn accumulate(&mut self, measurement: Measurement) -> Result<(), StatsError> {
        match measurement {
            Measurement::PatternCount(n) => self.pattern_count = n,
            Measurement::Elapsed {
                stage: Stage::MomentComputation,
                seconds,
            } => self.moments_computing_time += seconds,
            _ => return Err(StatsError::Unsupported(measurement)),
        }
        Ok(())
    }
}

impl fmt::Display for FeatureExtractorStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Feature extraction statistics")?;
        writeln!(f, "  patterns:             {}", self.pattern_count)?;
        write!(f, "  moments computing:    {:.6} s", self.moments_computing_time)
    }
}

/// Elapsed-time helper for stage timing.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Start timing now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since [`Stopwatch::start`].
    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Elapsed-time measurement for `stage`.
    pub fn measurement(&self, stage: Stage) -> Measurement {
        Measurement::Elapsed {
            stage,
            seconds: self.elapsed_seconds(),
        }
    }
}

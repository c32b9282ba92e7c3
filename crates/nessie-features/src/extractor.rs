//! FeatureExtractor - patterns in, feature vectors out
//!
//! The extractor turns every pattern into one [`FeatureVector`] of the
//! configured scheme, preserving input order. Elapsed time and pattern
//! counts go to a write-only statistics sink; a failing sink never
//! affects the vectors.

use crate::feature_vector::FeatureVector;
use crate::moments::MomentScheme;
use crate::moments::geometric::geometric_moments;
use crate::moments::tchebichef::BasisCache;
use crate::options::FeatureOptions;
use crate::pattern::Pattern;
use crate::FeatureResult;
use nessie_core::stats::record;
use nessie_core::{Accumulate, FeatureExtractorStatistics, Measurement, Region, Stage, Stopwatch};

const TARGET: &str = "nessie::features";

/// Feature extractor
///
/// # Example
///
/// ```
/// use nessie_core::Region;
/// use nessie_features::{FeatureExtractor, FeatureOptions, MomentScheme};
///
/// let square: Region = (0..4).flat_map(|r| (0..4).map(move |c| (r, c))).collect();
/// let options = FeatureOptions::new().with_scheme(MomentScheme::Geometric);
/// let mut extractor = FeatureExtractor::new(options).unwrap();
/// let vectors = extractor.extract(&[square]).unwrap();
/// assert_eq!(vectors[0][0], 16.0);
/// ```
pub struct FeatureExtractor<S: Accumulate = FeatureExtractorStatistics> {
    options: FeatureOptions,
    cache: Option<BasisCache>,
    statistics: S,
}

impl FeatureExtractor<FeatureExtractorStatistics> {
    /// Create an extractor collecting [`FeatureExtractorStatistics`].
    pub fn new(options: FeatureOptions) -> FeatureResult<Self> {
        Self::with_statistics(options, FeatureExtractorStatistics::default())
    }
}

impl<S: Accumulate> FeatureExtractor<S> {
    /// Create an extractor reporting into `statistics`.
    pub fn with_statistics(options: FeatureOptions, statistics: S) -> FeatureResult<Self> {
        options.validate()?;
        let cache = match options.scheme {
            MomentScheme::Tchebichef { order } => Some(BasisCache::new(order)),
            MomentScheme::Geometric => None,
        };
        Ok(Self {
            options,
            cache,
            statistics,
        })
    }

    /// Scheme in use.
    pub fn scheme(&self) -> MomentScheme {
        self.options.scheme
    }

    /// One feature vector per pattern, in input order.
    pub fn compute_moments(&mut self, patterns: &[Pattern]) -> Vec<FeatureVector> {
        let watch = Stopwatch::start();
        let scheme = self.options.scheme;

        let vectors: Vec<FeatureVector> = patterns
            .iter()
            .map(|pattern| {
                let values = match self.cache.as_mut() {
                    Some(cache) => cache.moments(pattern),
                    None => geometric_moments(pattern),
                };
                FeatureVector::new(scheme, values)
            })
            .collect();

        record(
            &mut self.statistics,
            Measurement::PatternCount(patterns.len()),
        );
        let m = watch.measurement(Stage::MomentComputation);
        if let Measurement::Elapsed { seconds, .. } = m {
            tracing::debug!(
                target: TARGET,
                "{:?} moments for {} patterns in {:.6} s",
                scheme,
                patterns.len(),
                seconds
            );
        }
        record(&mut self.statistics, m);

        vectors
    }

    /// Rasterize every region and compute its feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FeatureError::DegeneratePattern`] if any region is
    /// empty; no vectors are produced in that case.
    pub fn extract(&mut self, regions: &[Region]) -> FeatureResult<Vec<FeatureVector>> {
        let patterns = regions
            .iter()
            .map(Pattern::from_region)
            .collect::<FeatureResult<Vec<_>>>()?;
        Ok(self.compute_moments(&patterns))
    }

    /// Statistics sink.
    pub fn statistics(&self) -> &S {
        &self.statistics
    }

    /// Take the statistics sink.
    pub fn into_statistics(self) -> S {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureError;
    use nessie_core::StatsError;
    use nessie_test::synth::{region, square_region};

    struct OfflineTimer;

    impl Accumulate for OfflineTimer {
        fn accumulate(&mut self, _m: Measurement) -> Result<(), StatsError> {
            Err(StatsError::Unavailable("timer unavailable".into()))
        }
    }

    const GLYPH: [&str; 5] = [".##.", "#..#", "####", "#..#", "#..#"];

    fn both_schemes() -> [MomentScheme; 2] {
        [MomentScheme::Geometric, MomentScheme::Tchebichef { order: 4 }]
    }

    #[test]
    fn test_translation_invariance() {
        for scheme in both_schemes() {
            let mut ex = FeatureExtractor::new(FeatureOptions::new().with_scheme(scheme)).unwrap();
            let near = region(&GLYPH, 0, 0).unwrap();
            let far = region(&GLYPH, 37, 112).unwrap();
            let v = ex.extract(&[near, far]).unwrap();
            assert!(v[0].max_abs_diff(&v[1]).unwrap() < 1e-12, "{:?}", scheme);
        }
    }

    #[test]
    fn test_fixed_lengths() {
        for scheme in both_schemes() {
            let mut ex = FeatureExtractor::new(FeatureOptions::new().with_scheme(scheme)).unwrap();
            let regions = [
                square_region(0, 0, 1),
                square_region(3, 3, 2),
                region(&GLYPH, 10, 10).unwrap(),
            ];
            for v in ex.extract(&regions).unwrap() {
                assert_eq!(v.len(), scheme.vector_len());
                assert!(v.as_slice().iter().all(|x| x.is_finite()));
            }
        }
    }

    #[test]
    fn test_empty_region_rejected() {
        let mut ex = FeatureExtractor::new(FeatureOptions::default()).unwrap();
        let err = ex.extract(&[square_region(0, 0, 2), Region::new()]).unwrap_err();
        assert!(matches!(err, FeatureError::DegeneratePattern { .. }));
    }

    #[test]
    fn test_statistics_failure_is_ignored() {
        let options = FeatureOptions::new().with_scheme(MomentScheme::Geometric);
        let mut ex = FeatureExtractor::with_statistics(options, OfflineTimer).unwrap();
        let v = ex.extract(&[square_region(5, 5, 4)]).unwrap();
        assert_eq!(v[0][0], 16.0);
    }

    #[test]
    fn test_statistics_recorded() {
        let mut ex = FeatureExtractor::new(FeatureOptions::default()).unwrap();
        ex.extract(&[square_region(0, 0, 3), square_region(9, 9, 2)]).unwrap();
        assert_eq!(ex.statistics().pattern_count, 2);
        assert!(ex.statistics().moments_computing_time >= 0.0);
    }

    #[test]
    fn test_invalid_order_rejected() {
        let options = FeatureOptions::new().with_scheme(MomentScheme::Tchebichef { order: 20 });
        assert!(FeatureExtractor::new(options).is_err());
    }
}

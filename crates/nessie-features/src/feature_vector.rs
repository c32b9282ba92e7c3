//! FeatureVector - fixed-length moment vector of one pattern

use crate::moments::MomentScheme;
use std::fmt;
use std::ops::Index;

/// Moment values of one pattern
///
/// Index `i` always names the same moment for a given scheme; see
/// [`crate::moments::geometric`] and [`crate::moments::tchebichef`] for the
/// layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    scheme: MomentScheme,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new(scheme: MomentScheme, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), scheme.vector_len());
        Self { scheme, values }
    }

    /// Scheme that produced the vector
    pub fn scheme(&self) -> MomentScheme {
        self.scheme
    }

    /// Number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// All values
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Take the values
    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }

    /// Largest absolute difference to `other`, `None` across schemes.
    pub fn max_abs_diff(&self, other: &FeatureVector) -> Option<f64> {
        if self.scheme != other.scheme {
            return None;
        }
        Some(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.6}", v)?;
        }
        write!(f, "]")
    }
}

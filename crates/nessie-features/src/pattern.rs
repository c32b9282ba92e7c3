//! Pattern - dense binary raster of one normalized region

use crate::{FeatureError, FeatureResult};
use nessie_core::{Error, Region};

/// Binary raster with ink = 1, background = 0
///
/// A pattern always holds at least one ink pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    height: u32,
    width: u32,
    data: Vec<u8>,
}

impl Pattern {
    /// Create a pattern from row-major pixels.
    ///
    /// Any non-zero value counts as ink and is stored as 1.
    ///
    /// # Errors
    ///
    /// Returns a core `InvalidDimension` or `BufferLength` error for a bad
    /// raster and [`FeatureError::DegeneratePattern`] when no pixel is ink.
    pub fn new(height: u32, width: u32, data: Vec<u8>) -> FeatureResult<Self> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension { width, height }.into());
        }
        let expected = height as usize * width as usize;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            }
            .into());
        }
        let data: Vec<u8> = data.into_iter().map(|v| u8::from(v != 0)).collect();
        if data.iter().all(|&v| v == 0) {
            return Err(FeatureError::DegeneratePattern { height, width });
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Rasterize a region over its own bounding box.
    ///
    /// The region is normalized on a copy; `region` itself is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::DegeneratePattern`] for an empty region.
    pub fn from_region(region: &Region) -> FeatureResult<Self> {
        let mut local = region.clone();
        local.normalize_coordinates().map_err(|e| match e {
            Error::EmptyRegion => FeatureError::DegeneratePattern {
                height: 0,
                width: 0,
            },
            other => other.into(),
        })?;

        let height = local.height();
        let width = local.width();
        let mut data = vec![0u8; height as usize * width as usize];
        for &(r, c) in local.coordinates() {
            data[r as usize * width as usize + c as usize] = 1;
        }
        Self::new(height, width, data)
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel at `(row, column)`.
    #[inline]
    pub fn get(&self, row: u32, column: u32) -> Option<u8> {
        if row < self.height && column < self.width {
            Some(self.data[row as usize * self.width as usize + column as usize])
        } else {
            None
        }
    }

    /// Row-major pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of ink pixels.
    pub fn ink_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Coordinates `(row, column)` of every ink pixel, row-major.
    pub fn ink_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let w = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(move |(i, _)| ((i / w) as u32, (i % w) as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_region_rasterizes_bounding_box() {
        let region = Region::from_coordinates([(10, 20), (11, 21), (12, 20)]);
        let pattern = Pattern::from_region(&region).unwrap();
        assert_eq!((pattern.height(), pattern.width()), (3, 2));
        assert_eq!(pattern.data(), &[1, 0, 0, 1, 1, 0]);
        assert_eq!(pattern.ink_count(), 3);
        // The source region keeps its coordinates
        assert_eq!(region[0], (10, 20));
    }

    #[test]
    fn test_degenerate_pattern_rejected() {
        assert!(matches!(
            Pattern::new(2, 2, vec![0; 4]),
            Err(FeatureError::DegeneratePattern { .. })
        ));
        assert!(matches!(
            Pattern::from_region(&Region::new()),
            Err(FeatureError::DegeneratePattern { .. })
        ));
    }

    #[test]
    fn test_bad_raster_rejected() {
        assert!(Pattern::new(0, 0, vec![]).is_err());
        assert!(matches!(
            Pattern::new(2, 2, vec![1; 3]),
            Err(FeatureError::Core(Error::BufferLength { .. }))
        ));
    }

    #[test]
    fn test_values_normalized_to_one() {
        let pattern = Pattern::new(1, 3, vec![0, 255, 7]).unwrap();
        assert_eq!(pattern.data(), &[0, 1, 1]);
        assert_eq!(pattern.get(0, 1), Some(1));
        assert_eq!(pattern.get(1, 0), None);
        let ink: Vec<_> = pattern.ink_pixels().collect();
        assert_eq!(ink, vec![(0, 1), (0, 2)]);
    }
}

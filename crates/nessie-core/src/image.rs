//! Decoded grayscale source image
//!
//! `GrayImage` is the hand-off point between an image decoder and the
//! recognition core: a fully materialized, row-major array of 8-bit
//! intensities. Press clips are cut out of it with [`Clip::new`].
//!
//! [`Clip::new`]: crate::Clip::new

use crate::error::{Error, Result};

/// Row-major 8-bit grayscale image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayImage {
    /// Wrap decoded pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is 0 and
    /// [`Error::BufferLength`] if `data` does not hold exactly
    /// `width * height` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an image filled with one intensity.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major index of (row, column) for an image `width` pixels wide.
    #[inline]
    fn offset(width: u32, row: u32, column: u32) -> usize {
        row as usize * width as usize + column as usize
    }

    /// Intensity at (row, column), `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: u32, column: u32) -> Option<u8> {
        if row < self.height && column < self.width {
            Some(self.data[Self::offset(self.width, row, column)])
        } else {
            None
        }
    }

    /// One image row.
    pub fn row(&self, row: u32) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }
        let start = Self::offset(self.width, row, 0);
        Some(&self.data[start..start + self.width as usize])
    }

    /// Raw row-major data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

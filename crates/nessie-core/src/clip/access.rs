//! Pixel access functions
//!
//! Bounds-checked accessors return `Option` / `Result`; the `_unchecked`
//! variants are for inner loops whose bounds are established by the
//! caller and panic on violation like slice indexing.

use super::{Clip, ClipMode};
use crate::error::{Error, Result};

impl Clip {
    #[inline]
    fn offset(&self, row: u32, column: u32) -> usize {
        row as usize * self.width as usize + column as usize
    }

    /// Check whether (row, column) lies inside the clip.
    #[inline]
    pub fn contains(&self, row: i64, column: i64) -> bool {
        row >= 0 && column >= 0 && row < i64::from(self.height) && column < i64::from(self.width)
    }

    /// Get the pixel value at (row, column).
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, row: u32, column: u32) -> Option<u8> {
        if row < self.height && column < self.width {
            Some(self.data[self.offset(row, column)])
        } else {
            None
        }
    }

    /// Get the pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the buffer.
    #[inline]
    pub fn get_unchecked(&self, row: u32, column: u32) -> u8 {
        self.data[self.offset(row, column)]
    }

    /// Set the pixel value at (row, column).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates are out of
    /// bounds.
    pub fn set(&mut self, row: u32, column: u32, value: u8) -> Result<()> {
        if row >= self.height || column >= self.width {
            return Err(Error::IndexOutOfBounds {
                row,
                column,
                height: self.height,
                width: self.width,
            });
        }
        let i = self.offset(row, column);
        self.data[i] = value;
        Ok(())
    }

    /// Set the pixel value without bounds checking.
    #[inline]
    pub fn set_unchecked(&mut self, row: u32, column: u32, value: u8) {
        let i = self.offset(row, column);
        self.data[i] = value;
    }

    /// Whether the pixel is ink in a binary clip.
    ///
    /// Out-of-bounds positions and grayscale clips report `false`.
    #[inline]
    pub fn is_ink(&self, row: i64, column: i64) -> bool {
        self.mode == ClipMode::Binary
            && self.contains(row, column)
            && self.data[self.offset(row as u32, column as u32)] != 0
    }

    /// Raw row-major pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw row-major pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut clip = Clip::from_rows(&[[10u8, 20, 30], [40, 50, 60]]).unwrap();
        clip.set(1, 2, 99).unwrap();
        assert_eq!(clip.get(1, 2), Some(99));
        assert_eq!(clip.get_unchecked(0, 1), 20);
        assert_eq!(clip.get(2, 0), None);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut clip = Clip::from_rows(&[[0u8; 3]; 2]).unwrap();
        let err = clip.set(0, 3, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfBounds {
                row: 0,
                column: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_is_ink_requires_binary() {
        let mut clip = Clip::from_rows(&[[1u8, 0]]).unwrap();
        assert!(!clip.is_ink(0, 0));
        clip.set_mode(ClipMode::Binary);
        assert!(clip.is_ink(0, 0));
        assert!(!clip.is_ink(0, 1));
        assert!(!clip.is_ink(-1, 0));
        assert!(!clip.is_ink(0, 2));
    }
}

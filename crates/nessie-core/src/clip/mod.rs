//! Clip - the press clip pixel buffer
//!
//! A `Clip` is a rectangular cut of a decoded source image. It is the only
//! structure the preprocessing stage reads and writes pixel by pixel.
//!
//! # Pixel layout
//!
//! - One byte per pixel, row-major, no padding
//! - Grayscale mode: 0 (black) ..= 255 (white)
//! - Binary mode: 1 for ink, 0 for background
//!
//! # Ownership model
//!
//! The clip owns its pixels outright. A preprocessor takes the clip by
//! value and mutates it in place; nothing else holds a reference to it
//! while processing runs.

mod access;
mod histogram;

use crate::error::{Error, Result};
use crate::image::GrayImage;

/// Interpretation of the pixel values currently stored in a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipMode {
    /// 8-bit intensities, 0 = black
    #[default]
    Grayscale,
    /// 1 = ink, 0 = background
    Binary,
}

/// Press clip pixel buffer
///
/// # Examples
///
/// ```
/// use nessie_core::{Clip, GrayImage};
///
/// let image = GrayImage::filled(640, 480, 255).unwrap();
/// let clip = Clip::new(&image, 10, 20, 100, 200).unwrap();
/// assert_eq!(clip.height(), 100);
/// assert_eq!(clip.width(), 200);
/// assert_eq!(clip.row(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    /// Row of the top leftmost pixel within the source image
    row: u32,
    /// Column of the top leftmost pixel within the source image
    column: u32,
    width: u32,
    height: u32,
    mode: ClipMode,
    data: Vec<u8>,
}

impl Clip {
    /// Cut a press clip out of a decoded image.
    ///
    /// # Arguments
    ///
    /// * `image` - Source image
    /// * `row`, `column` - Top leftmost pixel of the clip within `image`
    /// * `height`, `width` - Clip size in pixels
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `height` or `width` is 0 and
    /// [`Error::ClipOutOfBounds`] if the rectangle does not lie entirely
    /// within `image`.
    pub fn new(image: &GrayImage, row: u32, column: u32, height: u32, width: u32) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let fits = u64::from(row) + u64::from(height) <= u64::from(image.height())
            && u64::from(column) + u64::from(width) <= u64::from(image.width());
        if !fits {
            return Err(Error::ClipOutOfBounds {
                row,
                column,
                height,
                width,
                image_width: image.width(),
                image_height: image.height(),
            });
        }

        let mut data = Vec::with_capacity(width as usize * height as usize);
        for r in row..row + height {
            // Bounds were checked above
            if let Some(line) = image.row(r) {
                data.extend_from_slice(&line[column as usize..(column + width) as usize]);
            }
        }

        Ok(Self {
            row,
            column,
            width,
            height,
            mode: ClipMode::Grayscale,
            data,
        })
    }

    /// Use a whole image as the press clip.
    pub fn from_image(image: &GrayImage) -> Result<Self> {
        Self::new(image, 0, 0, image.height(), image.width())
    }

    /// Build a grayscale clip from in-memory rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for no rows or empty rows and
    /// [`Error::InvalidParameter`] when rows differ in length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let mut data = Vec::with_capacity(width as usize * height as usize);
        for (i, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width as usize {
                return Err(Error::InvalidParameter(format!(
                    "row {} has {} pixels, expected {}",
                    i,
                    r.len(),
                    width
                )));
            }
            data.extend_from_slice(r);
        }

        Ok(Self {
            row: 0,
            column: 0,
            width,
            height,
            mode: ClipMode::Grayscale,
            data,
        })
    }

    /// Row of the clip origin within the source image.
    #[inline]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column of the clip origin within the source image.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
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

    /// Number of pixels.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Current pixel interpretation.
    #[inline]
    pub fn mode(&self) -> ClipMode {
        self.mode
    }

    /// Change the pixel interpretation.
    ///
    /// Callers that rewrite the buffer (thresholding) are responsible for
    /// keeping the stored values consistent with the mode.
    pub fn set_mode(&mut self, mode: ClipMode) {
        self.mode = mode;
    }

    /// Render the clip as a grayscale image.
    ///
    /// Binary clips are mapped to ink = 0 (black), background = 255
    /// (white) so debug output stays readable.
    pub fn to_gray_image(&self) -> Result<GrayImage> {
        let data = match self.mode {
            ClipMode::Grayscale => self.data.clone(),
            ClipMode::Binary => self
                .data
                .iter()
                .map(|&v| if v != 0 { 0 } else { 255 })
                .collect(),
        };
        GrayImage::new(self.width, self.height, data)
    }
}

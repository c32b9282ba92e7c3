//! Region - a connected set of ink pixels
//!
//! A region is the candidate for one printed character (or a character
//! plus its accent). It stores pixel coordinates in insertion order and
//! keeps its bounding box current as pixels are added.
//!
//! Coordinates are `(row, column)` pairs. They refer to the press clip
//! until [`Region::normalize_coordinates`] re-bases them to a local
//! origin.

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::ops::{Add, Index};

/// Pixel coordinates as `(row, column)`.
pub type PixelCoordinates = (u32, u32);

/// A set of ink pixels.
///
/// # Examples
///
/// ```
/// use nessie_core::Region;
///
/// let mut region = Region::new();
/// region.add_coordinates((4, 7));
/// region.add_coordinates((5, 7));
/// assert_eq!(region.size(), 2);
/// assert_eq!(region.height(), 2);
/// assert_eq!(region.width(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    coordinates: Vec<PixelCoordinates>,
    bounds: Option<Bounds>,
}

impl Region {
    /// Create an empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region from a list of coordinates, keeping their order.
    pub fn from_coordinates<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = PixelCoordinates>,
    {
        let mut region = Self::new();
        for c in coordinates {
            region.add_coordinates(c);
        }
        region
    }

    /// Append one pixel.
    pub fn add_coordinates(&mut self, coordinates: PixelCoordinates) {
        let (row, column) = coordinates;
        match self.bounds.as_mut() {
            Some(b) => b.include(row, column),
            None => self.bounds = Some(Bounds::point(row, column)),
        }
        self.coordinates.push(coordinates);
    }

    /// Number of pixels.
    #[inline]
    pub fn size(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the region has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Pixel at `index`, in insertion order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<PixelCoordinates> {
        self.coordinates.get(index).copied()
    }

    /// All pixels in insertion order.
    #[inline]
    pub fn coordinates(&self) -> &[PixelCoordinates] {
        &self.coordinates
    }

    /// Bounding box, `None` for an empty region.
    #[inline]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Height in pixels (0 when empty).
    pub fn height(&self) -> u32 {
        self.bounds.map_or(0, |b| b.height())
    }

    /// Width in pixels (0 when empty).
    pub fn width(&self) -> u32 {
        self.bounds.map_or(0, |b| b.width())
    }

    /// Top leftmost corner of the bounding box.
    pub fn top_leftmost_pixel_coordinates(&self) -> Option<PixelCoordinates> {
        self.bounds.map(|b| (b.top, b.left))
    }

    /// Mean pixel position as `(row, column)`.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.coordinates.is_empty() {
            return None;
        }
        let n = self.coordinates.len() as f64;
        let (sr, sc) = self
            .coordinates
            .iter()
            .fold((0.0f64, 0.0f64), |(sr, sc), &(r, c)| {
                (sr + f64::from(r), sc + f64::from(c))
            });
        Some((sr / n, sc / n))
    }

    /// Shift every pixel so the top leftmost corner sits at (0, 0).
    ///
    /// Height and width are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRegion`] if the region has no pixels.
    pub fn normalize_coordinates(&mut self) -> Result<()> {
        let b = self.bounds.ok_or(Error::EmptyRegion)?;
        for c in &mut self.coordinates {
            c.0 -= b.top;
            c.1 -= b.left;
        }
        self.bounds = Some(Bounds {
            top: 0,
            left: 0,
            bottom: b.bottom - b.top,
            right: b.right - b.left,
        });
        Ok(())
    }

    /// Replace every pixel, e.g. after re-rasterizing a rotated region.
    pub fn replace_coordinates(&mut self, coordinates: Vec<PixelCoordinates>) {
        *self = Self::from_coordinates(coordinates);
    }

    /// Append all pixels of `other`.
    pub fn merge(&mut self, other: Region) {
        for c in other.coordinates {
            self.add_coordinates(c);
        }
    }

    /// Reading-order key: the band of the bottom row, then the leftmost
    /// column, then the top row. `None` for an empty region.
    ///
    /// `band_of` maps a clip row to the index of the text line holding it.
    pub fn reading_key<F>(&self, band_of: F) -> Option<(usize, u32, u32)>
    where
        F: Fn(u32) -> usize,
    {
        self.bounds.map(|b| (band_of(b.bottom), b.left, b.top))
    }

    /// Reading-order comparison.
    ///
    /// Compares [`Region::reading_key`]s, so regions in an earlier band come
    /// first and regions of one band are ordered left to right. Empty
    /// regions sort last. Being a key comparison, this is a total order
    /// and safe to pass to `sort_by`.
    pub fn reading_cmp<F>(&self, other: &Region, band_of: F) -> Ordering
    where
        F: Fn(u32) -> usize,
    {
        match (self.reading_key(&band_of), other.reading_key(&band_of)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl Index<usize> for Region {
    type Output = PixelCoordinates;

    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl Add for Region {
    type Output = Region;

    /// Union of both pixel lists, `self` first.
    fn add(mut self, rhs: Region) -> Region {
        self.merge(rhs);
        self
    }
}

impl FromIterator<PixelCoordinates> for Region {
    fn from_iter<I: IntoIterator<Item = PixelCoordinates>>(iter: I) -> Self {
        Self::from_coordinates(iter)
    }
}

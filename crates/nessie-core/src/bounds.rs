//! Bounds - inclusive bounding rectangles in (row, column) space

/// Inclusive bounding rectangle of a pixel set.
///
/// Unlike a half-open box, both `bottom` and `right` name the last pixel
/// row and column that belong to the rectangle, so a single pixel has
/// height and width 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// First row
    pub top: u32,
    /// First column
    pub left: u32,
    /// Last row (inclusive)
    pub bottom: u32,
    /// Last column (inclusive)
    pub right: u32,
}

impl Bounds {
    /// Bounds of a single pixel.
    pub const fn point(row: u32, column: u32) -> Self {
        Self {
            top: row,
            left: column,
            bottom: row,
            right: column,
        }
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.height()) * u64::from(self.width())
    }

    /// Grow the bounds to include a pixel.
    #[inline]
    pub fn include(&mut self, row: u32, column: u32) {
        self.top = self.top.min(row);
        self.bottom = self.bottom.max(row);
        self.left = self.left.min(column);
        self.right = self.right.max(column);
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            top: self.top.min(other.top),
            left: self.left.min(other.left),
            bottom: self.bottom.max(other.bottom),
            right: self.right.max(other.right),
        }
    }

    /// Whether the column spans share at least one column.
    #[inline]
    pub fn overlaps_columns(&self, other: &Bounds) -> bool {
        self.left <= other.right && other.left <= self.right
    }

    /// Whether the row spans share at least one row.
    #[inline]
    pub fn overlaps_rows(&self, other: &Bounds) -> bool {
        self.top <= other.bottom && other.top <= self.bottom
    }

    /// Whether every row of `self` lies strictly above every row of `other`.
    #[inline]
    pub fn is_above(&self, other: &Bounds) -> bool {
        self.bottom < other.top
    }

    /// Whether a pixel lies inside the bounds.
    #[inline]
    pub fn contains(&self, row: u32, column: u32) -> bool {
        row >= self.top && row <= self.bottom && column >= self.left && column <= self.right
    }
}

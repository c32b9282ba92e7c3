//! Region extraction
//!
//! Connected ink pixels of a binary clip are grown into [`Region`]s with a
//! breadth-first flood fill. The rows of the clip that hold ink are grouped
//! into [`LineDelimiter`] bands; detached accents are merged into the
//! character below them, and the result is sorted into reading order.

use crate::{PreprocessError, PreprocessResult};
use nessie_core::{Clip, ClipMode, Region};
use std::collections::VecDeque;

/// Pixel connectivity for flood fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Up, down, left, right
    Four,
    /// Also the diagonals
    #[default]
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i64, i64)] {
        const FOUR: [(i64, i64); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
        const EIGHT: [(i64, i64); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// Options for region extraction
#[derive(Debug, Clone)]
pub struct SegmentationOptions {
    /// Flood fill connectivity (default: eight)
    pub connectivity: Connectivity,
    /// Whether detached accents are merged into the character below (default: true)
    pub merge_accents: bool,
    /// Largest accent height relative to the character below (default: 0.6)
    pub max_accent_ratio: f64,
    /// Largest blank gap between accent and character, relative to the
    /// character height (default: 1.0)
    pub max_accent_gap_ratio: f64,
}

impl Default for SegmentationOptions {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            merge_accents: true,
            max_accent_ratio: 0.6,
            max_accent_gap_ratio: 1.0,
        }
    }
}

impl SegmentationOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Enable or disable accent merging
    pub fn with_merge_accents(mut self, merge: bool) -> Self {
        self.merge_accents = merge;
        self
    }

    /// Set the accent height ratio
    pub fn with_max_accent_ratio(mut self, ratio: f64) -> Self {
        self.max_accent_ratio = ratio;
        self
    }

    /// Set the accent gap ratio
    pub fn with_max_accent_gap_ratio(mut self, ratio: f64) -> Self {
        self.max_accent_gap_ratio = ratio;
        self
    }

    /// Validate options
    pub fn validate(&self) -> PreprocessResult<()> {
        if !(self.max_accent_ratio > 0.0 && self.max_accent_ratio.is_finite()) {
            return Err(PreprocessError::InvalidParameters(
                "max_accent_ratio must be positive".to_string(),
            ));
        }
        if !(self.max_accent_gap_ratio >= 0.0 && self.max_accent_gap_ratio.is_finite()) {
            return Err(PreprocessError::InvalidParameters(
                "max_accent_gap_ratio must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A horizontal band of rows holding ink, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDelimiter {
    /// First row of the band
    pub top: u32,
    /// Last row of the band
    pub bottom: u32,
}

impl LineDelimiter {
    /// Whether `row` falls inside the band.
    #[inline]
    pub fn contains(&self, row: u32) -> bool {
        row >= self.top && row <= self.bottom
    }

    /// Number of rows in the band.
    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// Index of the band containing `row`.
///
/// Rows between bands map to the band above them; rows above every band
/// map to 0.
pub fn band_of_row(delimiters: &[LineDelimiter], row: u32) -> usize {
    delimiters
        .partition_point(|d| d.top <= row)
        .saturating_sub(1)
}

fn ensure_binary(clip: &Clip) -> PreprocessResult<()> {
    if clip.mode() != ClipMode::Binary {
        return Err(PreprocessError::InvalidClip(
            "segmentation needs a binary clip".to_string(),
        ));
    }
    Ok(())
}

/// Grow every connected set of ink pixels into a region.
///
/// Regions are returned in the order their first pixel is met by a
/// row-major scan. Pixels within a region keep breadth-first order.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidClip`] if the clip is not binary.
pub fn flood_fill_regions(clip: &Clip, connectivity: Connectivity) -> PreprocessResult<Vec<Region>> {
    ensure_binary(clip)?;

    let w = clip.width() as usize;
    let h = clip.height() as usize;
    let mut visited = vec![false; w * h];
    let mut queue = VecDeque::new();
    let mut regions = Vec::new();

    for row in 0..clip.height() {
        for column in 0..clip.width() {
            let idx = row as usize * w + column as usize;
            if visited[idx] || clip.get_unchecked(row, column) == 0 {
                continue;
            }

            let mut region = Region::new();
            visited[idx] = true;
            queue.push_back((row, column));

            while let Some((r, c)) = queue.pop_front() {
                region.add_coordinates((r, c));
                for &(dr, dc) in connectivity.offsets() {
                    let nr = i64::from(r) + dr;
                    let nc = i64::from(c) + dc;
                    if !clip.is_ink(nr, nc) {
                        continue;
                    }
                    let nidx = nr as usize * w + nc as usize;
                    if !visited[nidx] {
                        visited[nidx] = true;
                        queue.push_back((nr as u32, nc as u32));
                    }
                }
            }

            regions.push(region);
        }
    }

    Ok(regions)
}

/// Maximal runs of rows that contain at least one ink pixel.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidClip`] if the clip is not binary.
pub fn line_delimiters(clip: &Clip) -> PreprocessResult<Vec<LineDelimiter>> {
    ensure_binary(clip)?;

    let w = clip.width() as usize;
    let mut delimiters = Vec::new();
    let mut open: Option<u32> = None;

    for (row, line) in clip.data().chunks_exact(w).enumerate() {
        let row = row as u32;
        let has_ink = line.iter().any(|&v| v != 0);
        match (has_ink, open) {
            (true, None) => open = Some(row),
            (false, Some(top)) => {
                delimiters.push(LineDelimiter {
                    top,
                    bottom: row - 1,
                });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(top) = open {
        delimiters.push(LineDelimiter {
            top,
            bottom: clip.height() - 1,
        });
    }

    Ok(delimiters)
}

/// Merge detached accents into the character below them.
///
/// An upper region merges into a lower one when their column spans
/// intersect, the upper region lies entirely above the lower one, the
/// upper region sits in the same band or the band directly above, its
/// height is at most `max_accent_ratio` times the lower height, and the
/// blank gap between them is at most `max_accent_gap_ratio` times the
/// lower height. Among several candidates the nearest wins, then the
/// leftmost. Merged regions keep the lower region's pixels first.
pub fn merge_accents(
    regions: Vec<Region>,
    delimiters: &[LineDelimiter],
    options: &SegmentationOptions,
) -> Vec<Region> {
    let bounds: Vec<_> = regions.iter().map(Region::bounds).collect();
    let mut target: Vec<Option<usize>> = vec![None; regions.len()];

    for (i, upper) in bounds.iter().enumerate() {
        let Some(a) = upper else { continue };
        let band_a = band_of_row(delimiters, a.bottom);
        let mut best: Option<(u32, u32, usize)> = None;

        for (j, lower) in bounds.iter().enumerate() {
            let Some(b) = lower else { continue };
            if i == j || !a.overlaps_columns(b) || !a.is_above(b) {
                continue;
            }
            let band_b = band_of_row(delimiters, b.bottom);
            if band_a != band_b && band_a + 1 != band_b {
                continue;
            }
            let lower_height = f64::from(b.height());
            let gap = b.top - a.bottom - 1;
            if f64::from(a.height()) > options.max_accent_ratio * lower_height
                || f64::from(gap) > options.max_accent_gap_ratio * lower_height
            {
                continue;
            }
            let key = (gap, b.left, j);
            if best.is_none_or(|k| key < k) {
                best = Some(key);
            }
        }

        target[i] = best.map(|(_, _, j)| j);
    }

    // Follow chains so stacked accents end up in the same base character.
    // Targets always lie strictly lower, so the walk terminates.
    let root = |mut i: usize| {
        while let Some(j) = target[i] {
            i = j;
        }
        i
    };

    let mut slots: Vec<Option<Region>> = regions.into_iter().map(Some).collect();
    let mut accents: Vec<Vec<Region>> = vec![Vec::new(); slots.len()];
    for i in 0..slots.len() {
        let r = root(i);
        if r != i
            && let Some(accent) = slots[i].take()
        {
            tracing::trace!(
                target: "nessie::preprocess",
                "accent region {} merged into region {}",
                i,
                r
            );
            accents[r].push(accent);
        }
    }

    slots
        .into_iter()
        .zip(accents)
        .filter_map(|(base, parts)| {
            base.map(|b| parts.into_iter().fold(b, |acc, part| acc + part))
        })
        .collect()
}

/// Sort regions into reading order.
///
/// The key is the band holding the region's bottom row, then its leftmost
/// column, then its top row. The sort is stable.
pub fn sort_reading_order(regions: &mut [Region], delimiters: &[LineDelimiter]) {
    regions.sort_by(|a, b| a.reading_cmp(b, |row| band_of_row(delimiters, row)));
}

/// Band index for every region, by bottom row.
pub fn region_lines(regions: &[Region], delimiters: &[LineDelimiter]) -> Vec<usize> {
    regions
        .iter()
        .map(|r| r.bounds().map_or(0, |b| band_of_row(delimiters, b.bottom)))
        .collect()
}

/// Mean region height, or `None` without regions.
pub fn average_height(regions: &[Region]) -> Option<f64> {
    if regions.is_empty() {
        return None;
    }
    let total: f64 = regions.iter().map(|r| f64::from(r.height())).sum();
    Some(total / regions.len() as f64)
}

/// Result of [`segment`]
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    /// Regions in reading order
    pub regions: Vec<Region>,
    /// Band index of every region
    pub lines: Vec<usize>,
    /// Bands of the clip
    pub delimiters: Vec<LineDelimiter>,
}

/// Flood fill, merge accents and sort in one call.
///
/// # Errors
///
/// Returns [`PreprocessError::InvalidClip`] if the clip is not binary.
pub fn segment(clip: &Clip, options: &SegmentationOptions) -> PreprocessResult<Segmentation> {
    options.validate()?;
    let delimiters = line_delimiters(clip)?;
    let mut regions = flood_fill_regions(clip, options.connectivity)?;
    let found = regions.len();
    if options.merge_accents {
        regions = merge_accents(regions, &delimiters, options);
    }
    sort_reading_order(&mut regions, &delimiters);
    let lines = region_lines(&regions, &delimiters);

    tracing::debug!(
        target: "nessie::preprocess",
        "segmentation: {} components, {} regions after accent merge, {} lines",
        found,
        regions.len(),
        delimiters.len()
    );

    Ok(Segmentation {
        regions,
        lines,
        delimiters,
    })
}

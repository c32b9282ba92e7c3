//! Synthetic press clips
//!
//! ASCII fixtures use `#` for ink and `.` for background. Grayscale
//! fixtures render ink as 0 and background as 255.

use crate::error::{TestError, TestResult};
use nessie_core::{Clip, ClipMode, GrayImage, Region};

/// Intensity used for ink in grayscale fixtures
pub const INK: u8 = 0;
/// Intensity used for background in grayscale fixtures
pub const PAPER: u8 = 255;

fn parse_ascii(rows: &[&str]) -> TestResult<Vec<Vec<bool>>> {
    let grid: Vec<Vec<bool>> = rows
        .iter()
        .map(|r| r.chars().map(|c| c == '#').collect())
        .collect();
    if let Some(first) = grid.first()
        && grid.iter().any(|r| r.len() != first.len())
    {
        return Err(TestError::Fixture("rows differ in length".to_string()));
    }
    Ok(grid)
}

/// Grayscale clip from ASCII art.
pub fn gray_clip(rows: &[&str]) -> TestResult<Clip> {
    let grid = parse_ascii(rows)?;
    let data: Vec<Vec<u8>> = grid
        .iter()
        .map(|r| r.iter().map(|&ink| if ink { INK } else { PAPER }).collect())
        .collect();
    Ok(Clip::from_rows(&data)?)
}

/// Binary clip (1 = ink) from ASCII art.
pub fn binary_clip(rows: &[&str]) -> TestResult<Clip> {
    let grid = parse_ascii(rows)?;
    let data: Vec<Vec<u8>> = grid
        .iter()
        .map(|r| r.iter().map(|&ink| u8::from(ink)).collect())
        .collect();
    let mut clip = Clip::from_rows(&data)?;
    clip.set_mode(ClipMode::Binary);
    Ok(clip)
}

/// Render a binary clip back to ASCII art.
pub fn to_ascii(clip: &Clip) -> Vec<String> {
    (0..clip.height())
        .map(|r| {
            (0..clip.width())
                .map(|c| if clip.get_unchecked(r, c) != 0 { '#' } else { '.' })
                .collect()
        })
        .collect()
}

/// Region holding every `#` of the fixture, offset by (`top`, `left`).
pub fn region(rows: &[&str], top: u32, left: u32) -> TestResult<Region> {
    let grid = parse_ascii(rows)?;
    let mut region = Region::new();
    for (r, row) in grid.iter().enumerate() {
        for (c, &ink) in row.iter().enumerate() {
            if ink {
                region.add_coordinates((top + r as u32, left + c as u32));
            }
        }
    }
    Ok(region)
}

/// Filled square region.
pub fn square_region(top: u32, left: u32, side: u32) -> Region {
    (top..top + side)
        .flat_map(|r| (left..left + side).map(move |c| (r, c)))
        .collect()
}

/// Grayscale image of `PAPER` with filled `INK` squares `(top, left, side)`.
pub fn image_with_squares(
    height: u32,
    width: u32,
    squares: &[(u32, u32, u32)],
) -> TestResult<GrayImage> {
    let mut data = vec![PAPER; width as usize * height as usize];
    for &(top, left, side) in squares {
        if top + side > height || left + side > width {
            return Err(TestError::Fixture(format!(
                "square at ({}, {}) side {} exceeds {}x{}",
                top, left, side, width, height
            )));
        }
        for r in top..top + side {
            for c in left..left + side {
                data[(r * width + c) as usize] = INK;
            }
        }
    }
    Ok(GrayImage::new(width, height, data)?)
}

//! Clip and region regression test
//!
//! Cuts clips out of a synthetic image, then checks region geometry,
//! normalization and reading order.

use nessie_core::{Clip, ClipMode, Error, GrayImage, Region};
use nessie_test::RegParams;
use nessie_test::synth::{image_with_squares, region, square_region};

#[test]
fn region_reg() {
    let mut rp = RegParams::new("region");

    // --- Clip construction ---
    let image = image_with_squares(30, 40, &[(5, 5, 6)]).expect("image");
    let clip = Clip::new(&image, 4, 4, 10, 12).expect("clip");
    rp.compare_values(10.0, clip.height() as f64, 0.0);
    rp.compare_values(12.0, clip.width() as f64, 0.0);
    rp.compare_values(0.0, clip.get(1, 1).map_or(-1.0, f64::from), 0.0);
    rp.compare_values(255.0, clip.get(0, 0).map_or(-1.0, f64::from), 0.0);
    rp.compare_values(36.0, clip.histogram()[0] as f64, 0.0);

    let zero = Clip::new(&image, 0, 0, 0, 0);
    rp.compare_values(
        1.0,
        if matches!(zero, Err(Error::InvalidDimension { .. })) { 1.0 } else { 0.0 },
        0.0,
    );
    let outside = Clip::new(&image, 25, 35, 10, 10);
    rp.compare_values(
        1.0,
        if matches!(outside, Err(Error::ClipOutOfBounds { .. })) { 1.0 } else { 0.0 },
        0.0,
    );

    // --- Binary rendering for debug output ---
    let mut binary = Clip::from_rows(&[[1u8, 0], [0, 1]]).expect("binary");
    binary.set_mode(ClipMode::Binary);
    let gray: GrayImage = binary.to_gray_image().expect("render");
    rp.compare_strings(gray.data(), &[0, 255, 255, 0]);

    // --- Normalization keeps the shape ---
    let mut glyph = region(&[".#.", "###", ".#."], 17, 23).expect("glyph");
    let (h, w, n) = (glyph.height(), glyph.width(), glyph.size());
    glyph.normalize_coordinates().expect("normalize");
    let min_row = glyph.coordinates().iter().map(|c| c.0).min().unwrap_or(99);
    let min_col = glyph.coordinates().iter().map(|c| c.1).min().unwrap_or(99);
    rp.compare_values(0.0, min_row as f64, 0.0);
    rp.compare_values(0.0, min_col as f64, 0.0);
    rp.compare_values(h as f64, glyph.height() as f64, 0.0);
    rp.compare_values(w as f64, glyph.width() as f64, 0.0);
    rp.compare_values(n as f64, glyph.size() as f64, 0.0);

    // --- Reading order of three regions, one text line per five rows ---
    let a = Region::from_coordinates([(0, 10)]);
    let b = Region::from_coordinates([(0, 0)]);
    let c = Region::from_coordinates([(5, 0)]);
    let mut regions = vec![c.clone(), a.clone(), b.clone()];
    regions.sort_by(|x, y| x.reading_cmp(y, |row| row as usize / 5));
    rp.compare_values(1.0, if regions == vec![b, a, c] { 1.0 } else { 0.0 }, 0.0);

    // --- Union of an accent and a body ---
    let merged = square_region(0, 2, 1) + square_region(2, 1, 3);
    rp.compare_values(10.0, merged.size() as f64, 0.0);
    rp.compare_values(5.0, merged.height() as f64, 0.0);

    assert!(rp.cleanup(), "region regression test failed");
}

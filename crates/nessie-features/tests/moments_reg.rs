//! Moment feature regression test
//!
//! Extracts both moment schemes from a few synthetic glyphs and checks
//! vector lengths, translation invariance, the area entry and the zero
//! order Tchebichef moment.

use nessie_core::Region;
use nessie_features::{FeatureError, FeatureExtractor, FeatureOptions, MomentScheme, Pattern};
use nessie_test::RegParams;
use nessie_test::synth::region;

const GLYPH_L: [&str; 6] = ["#...", "#...", "#...", "#...", "#...", "####"];
const GLYPH_O: [&str; 5] = [".##.", "#..#", "#..#", "#..#", ".##."];

#[test]
fn moments_reg() {
    let mut rp = RegParams::new("moments");

    let glyphs: Vec<Region> = vec![
        region(&GLYPH_L, 2, 3).expect("L"),
        region(&GLYPH_O, 2, 9).expect("O"),
        region(&GLYPH_L, 40, 70).expect("L shifted"),
    ];

    // --- Geometric scheme ---
    let geometric = FeatureOptions::new().with_scheme(MomentScheme::Geometric);
    let mut ex = FeatureExtractor::new(geometric).expect("geometric extractor");
    let v = ex.extract(&glyphs).expect("geometric vectors");
    rp.compare_values(3.0, v.len() as f64, 0.0);
    for fv in &v {
        rp.compare_values(15.0, fv.len() as f64, 0.0);
    }
    rp.compare_values(9.0, v[0][0], 0.0);
    rp.compare_values(10.0, v[1][0], 0.0);
    // Centroid of the L: rows (0+1+2+3+4+5*4)/9, columns (5*0+0+1+2+3)/9
    rp.compare_values(30.0 / 9.0, v[0][1], 1e-12);
    rp.compare_values(6.0 / 9.0, v[0][2], 1e-12);
    rp.compare_values(0.0, v[0].max_abs_diff(&v[2]).unwrap_or(1.0), 1e-12);
    // The O is symmetric, the L is not
    rp.compare_values(0.0, v[1][3], 1e-12);
    rp.compare_values(1.0, if v[0][3].abs() > 1e-3 { 1.0 } else { 0.0 }, 0.0);
    eprintln!("  L geometric: {}", v[0]);

    // --- Tchebichef scheme at several orders ---
    for order in [0u32, 3, 6] {
        let options = FeatureOptions::new().with_scheme(MomentScheme::Tchebichef { order });
        let mut ex = FeatureExtractor::new(options).expect("tchebichef extractor");
        let v = ex.extract(&glyphs).expect("tchebichef vectors");
        let side = (order + 1) as f64;
        rp.compare_values(side * side, v[0].len() as f64, 0.0);
        // T00 = ink / sqrt(H W)
        rp.compare_values(9.0 / (6.0f64 * 4.0).sqrt(), v[0][0], 1e-12);
        rp.compare_values(10.0 / (5.0f64 * 4.0).sqrt(), v[1][0], 1e-12);
        rp.compare_values(0.0, v[0].max_abs_diff(&v[2]).unwrap_or(1.0), 1e-12);
        eprintln!("  order {} O: {}", order, v[1]);
    }

    // --- Vectors of different schemes do not compare ---
    let mut geo = FeatureExtractor::new(FeatureOptions::new().with_scheme(MomentScheme::Geometric))
        .expect("geometric extractor");
    let mut tch = FeatureExtractor::new(FeatureOptions::default()).expect("default extractor");
    let a = geo.extract(&glyphs[..1]).expect("geo");
    let b = tch.extract(&glyphs[..1]).expect("tch");
    rp.compare_values(1.0, if a[0].max_abs_diff(&b[0]).is_none() { 1.0 } else { 0.0 }, 0.0);

    // --- Degenerate input ---
    let blank = Pattern::new(3, 3, vec![0; 9]);
    rp.compare_values(
        1.0,
        if matches!(blank, Err(FeatureError::DegeneratePattern { .. })) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    assert!(rp.cleanup(), "moments regression test failed");
}

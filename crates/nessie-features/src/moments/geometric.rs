//! Geometric central moments
//!
//! For a pattern `p(i, j)` with `i` the row and `j` the column:
//!
//! - raw moments `m(p, q) = sum i^p j^q p(i, j)`
//! - centroid `(i_bar, j_bar) = (m(1, 0), m(0, 1)) / area`
//! - central moments `mu(p, q)` about the centroid
//! - scale-normalized moments `eta(p, q) = mu(p, q) / area^((p + q) / 2 + 1)`
//!
//! The exponent is real-valued. An area of zero is replaced by 1.0 so the
//! ratios stay finite.
//!
//! # Layout
//!
//! | index | value |
//! |---|---|
//! | 0 | area |
//! | 1, 2 | i_bar, j_bar |
//! | 3 | eta11 |
//! | 4, 5 | eta20, eta02 |
//! | 6, 7 | eta21, eta12 |
//! | 8 | eta22 |
//! | 9, 10 | eta30, eta03 |
//! | 11, 12 | eta31, eta13 |
//! | 13, 14 | eta32, eta23 |

use crate::pattern::Pattern;

/// Number of values in a geometric feature vector
pub const GEOMETRIC_VECTOR_LEN: usize = 15;

/// Normalized moment orders `(p, q)` in vector order, after the first
/// three entries.
const ETA_ORDERS: [(i32, i32); 12] = [
    (1, 1),
    (2, 0),
    (0, 2),
    (2, 1),
    (1, 2),
    (2, 2),
    (3, 0),
    (0, 3),
    (3, 1),
    (1, 3),
    (3, 2),
    (2, 3),
];

/// Compute the geometric feature vector of a pattern.
pub fn geometric_moments(pattern: &Pattern) -> Vec<f64> {
    let mut area = 0.0f64;
    let mut m10 = 0.0f64;
    let mut m01 = 0.0f64;
    for (i, j) in pattern.ink_pixels() {
        area += 1.0;
        m10 += f64::from(i);
        m01 += f64::from(j);
    }
    let divisor = if area == 0.0 { 1.0 } else { area };
    let i_bar = m10 / divisor;
    let j_bar = m01 / divisor;

    let mut mu = [0.0f64; ETA_ORDERS.len()];
    for (i, j) in pattern.ink_pixels() {
        let di = f64::from(i) - i_bar;
        let dj = f64::from(j) - j_bar;
        for (slot, &(p, q)) in mu.iter_mut().zip(ETA_ORDERS.iter()) {
            *slot += di.powi(p) * dj.powi(q);
        }
    }

    let mut out = Vec::with_capacity(GEOMETRIC_VECTOR_LEN);
    out.push(area);
    out.push(i_bar);
    out.push(j_bar);
    for (m, &(p, q)) in mu.iter().zip(ETA_ORDERS.iter()) {
        let exponent = f64::from(p + q) / 2.0 + 1.0;
        out.push(m / divisor.powf(exponent));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(h: u32, w: u32) -> Pattern {
        Pattern::new(h, w, vec![1; (h * w) as usize]).unwrap()
    }

    #[test]
    fn test_square_moments() {
        let v = geometric_moments(&block(4, 4));
        assert_eq!(v.len(), GEOMETRIC_VECTOR_LEN);
        assert_eq!(v[0], 16.0);
        assert_eq!(v[1], 1.5);
        assert_eq!(v[2], 1.5);
        // Symmetric square: odd and mixed moments vanish
        assert!(v[3].abs() < 1e-12);
        assert!(v[9].abs() < 1e-12);
        assert!(v[10].abs() < 1e-12);
        // mu20 = 4 * (2.25 + 0.25 + 0.25 + 2.25) = 20, eta20 = 20 / 16^2
        assert!((v[4] - 20.0 / 256.0).abs() < 1e-12);
        assert!((v[4] - v[5]).abs() < 1e-12);
    }

    #[test]
    fn test_scale_normalization() {
        // eta20 of a square tends to 1/12 regardless of size
        let small = geometric_moments(&block(20, 20));
        let large = geometric_moments(&block(40, 40));
        assert!((small[4] - large[4]).abs() < 1e-3);
        assert!((large[4] - 1.0 / 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_elongation_shows_in_eta20() {
        let tall = geometric_moments(&block(8, 2));
        assert!(tall[4] > tall[5]);
        let wide = geometric_moments(&block(2, 8));
        assert!(wide[5] > wide[4]);
    }
}

//! Discrete Tchebichef moments
//!
//! The orthonormal Tchebichef polynomials `t_n(x)` on `x = 0..N` are
//! evaluated with the three-term recurrence
//!
//! ```text
//! t_0(x) = 1 / sqrt(N)
//! t_1(x) = (2x + 1 - N) * sqrt(3 / (N (N^2 - 1)))
//! t_n(x) = (a1 x + a2) t_{n-1}(x) + a3 t_{n-2}(x)
//!
//! a1 = (2 / n) * sqrt((4n^2 - 1) / (N^2 - n^2))
//! a2 = ((1 - N) / n) * sqrt((4n^2 - 1) / (N^2 - n^2))
//! a3 = ((1 - n) / n) * sqrt((2n + 1) / (2n - 3)) * sqrt((N^2 - (n - 1)^2) / (N^2 - n^2))
//! ```
//!
//! which equals the classical polynomial divided by `sqrt(rho(n, N))`
//! without ever forming the factorials. Orders `n >= N` have no
//! polynomial on `N` points and contribute 0.
//!
//! The moment of order `(n, m)` is `sum t_n(i; H) t_m(j; W) p(i, j)`, with
//! `i` the row and `j` the column. Vectors are laid out row-major in
//! `(n, m)`: index `n * (order + 1) + m`.

use crate::pattern::Pattern;
use std::collections::HashMap;

/// Polynomial values `t_n(x)` for `n in 0..=order`, `x in 0..N`
#[derive(Debug, Clone, PartialEq)]
pub struct TchebichefBasis {
    n_points: u32,
    order: u32,
    values: Vec<f64>,
}

impl TchebichefBasis {
    /// Tabulate the basis on `n_points` samples.
    pub fn new(n_points: u32, order: u32) -> Self {
        let np = n_points as usize;
        let rows = order as usize + 1;
        let mut values = vec![0.0f64; rows * np];
        let big_n = f64::from(n_points);

        if np > 0 {
            let t0 = 1.0 / big_n.sqrt();
            values[..np].fill(t0);
        }
        if order >= 1 && n_points > 1 {
            let scale = (3.0 / (big_n * (big_n * big_n - 1.0))).sqrt();
            for x in 0..np {
                values[np + x] = (2.0 * x as f64 + 1.0 - big_n) * scale;
            }
        }
        for n in 2..=order {
            if n >= n_points {
                break;
            }
            let nf = f64::from(n);
            let common = ((4.0 * nf * nf - 1.0) / (big_n * big_n - nf * nf)).sqrt();
            let a1 = 2.0 / nf * common;
            let a2 = (1.0 - big_n) / nf * common;
            let a3 = (1.0 - nf) / nf
                * ((2.0 * nf + 1.0) / (2.0 * nf - 3.0)).sqrt()
                * ((big_n * big_n - (nf - 1.0) * (nf - 1.0)) / (big_n * big_n - nf * nf)).sqrt();

            let n = n as usize;
            for x in 0..np {
                let prev = values[(n - 1) * np + x];
                let prev2 = values[(n - 2) * np + x];
                values[n * np + x] = (a1 * x as f64 + a2) * prev + a3 * prev2;
            }
        }

        Self {
            n_points,
            order,
            values,
        }
    }

    /// Number of sample points `N`
    pub fn n_points(&self) -> u32 {
        self.n_points
    }

    /// Highest order tabulated
    pub fn order(&self) -> u32 {
        self.order
    }

    /// `t_n(x)`, 0.0 outside the tabulated range.
    #[inline]
    pub fn value(&self, n: u32, x: u32) -> f64 {
        if n > self.order || x >= self.n_points {
            return 0.0;
        }
        self.values[n as usize * self.n_points as usize + x as usize]
    }
}

/// Basis tables memoized by sample count for one order.
#[derive(Debug, Clone, Default)]
pub struct BasisCache {
    order: u32,
    tables: HashMap<u32, TchebichefBasis>,
}

impl BasisCache {
    /// Create an empty cache for `order`.
    pub fn new(order: u32) -> Self {
        Self {
            order,
            tables: HashMap::new(),
        }
    }

    /// Order the cached tables are built for
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Number of tables built so far
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table has been built yet
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn ensure(&mut self, n_points: u32) {
        let order = self.order;
        self.tables
            .entry(n_points)
            .or_insert_with(|| TchebichefBasis::new(n_points, order));
    }

    /// Moments of `pattern`, building missing tables on the way.
    pub fn moments(&mut self, pattern: &Pattern) -> Vec<f64> {
        self.ensure(pattern.height());
        self.ensure(pattern.width());
        match (
            self.tables.get(&pattern.height()),
            self.tables.get(&pattern.width()),
        ) {
            (Some(rows), Some(columns)) => project(pattern, rows, columns, self.order),
            // Both tables were inserted above
            _ => vec![0.0; (self.order as usize + 1).pow(2)],
        }
    }
}

/// Compute Tchebichef moments up to `order` without caching.
pub fn tchebichef_moments(pattern: &Pattern, order: u32) -> Vec<f64> {
    let rows = TchebichefBasis::new(pattern.height(), order);
    let columns = TchebichefBasis::new(pattern.width(), order);
    project(pattern, &rows, &columns, order)
}

fn project(
    pattern: &Pattern,
    rows: &TchebichefBasis,
    columns: &TchebichefBasis,
    order: u32,
) -> Vec<f64> {
    let side = order as usize + 1;
    let mut out = vec![0.0f64; side * side];
    for (i, j) in pattern.ink_pixels() {
        for n in 0..=order {
            let tn = rows.value(n, i);
            if tn == 0.0 {
                continue;
            }
            for m in 0..=order {
                out[n as usize * side + m as usize] += tn * columns.value(m, j);
            }
        }
    }
    out
}

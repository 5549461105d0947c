use serde::Serialize;

use crate::rank::upper_triangle;

/// Symmetric matrix of pairwise p-values.
///
/// Cell `(i, j)` holds the p-value comparing group `i` with group `j`. The
/// diagonal is the self-comparison and always holds `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PValueMatrix {
    size: usize,
    values: Vec<f64>,
}

impl PValueMatrix {
    /// Builds a matrix from its upper triangle, given row by row
    /// (`(0, 1), (0, 2), ..., (1, 2), ...`).
    ///
    /// # Panics
    ///
    /// Panics if `upper.len()` is not `size * (size - 1) / 2`.
    #[must_use]
    pub fn from_upper_triangle(size: usize, upper: &[f64]) -> Self {
        assert_eq!(
            upper.len(),
            size * size.saturating_sub(1) / 2,
            "upper triangle length does not match matrix size"
        );

        let mut values = vec![1.0; size * size];
        for ((i, j), &p) in upper_triangle(size).zip(upper) {
            values[i * size + j] = p;
            values[j * size + i] = p;
        }
        Self { size, values }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks(self.size.max(1))
    }

    /// Returns a copy with every cell rounded to `decimals` decimal places.
    #[must_use]
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            size: self.size,
            values: self.values.iter().map(|&v| round_to(v, decimals)).collect(),
        }
    }
}

/// Rounds `value` to `decimals` decimal places, ties to even.
///
/// ```
/// use vagueness_stats::matrix::round_to;
///
/// assert_eq!(round_to(0.123_456, 5), 0.12346);
/// assert_eq!(round_to(12.34, 1), 12.3);
/// assert_eq!(round_to(3.25, 1), 3.2);
/// assert_eq!(round_to(3.75, 1), 3.8);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

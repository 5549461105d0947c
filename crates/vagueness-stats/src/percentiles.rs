use serde::Serialize;

/// First quartile, median and third quartile of a dataset.
///
/// ```
/// use vagueness_stats::percentiles::Quartiles;
///
/// let quartiles = Quartiles::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(quartiles.q1, 2.0);
/// assert_eq!(quartiles.median, 3.0);
/// assert_eq!(quartiles.iqr(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Returns `None` for an empty slice.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }
        Some(Self {
            q1: compute_percentile(sorted_values, 25.0),
            median: compute_percentile(sorted_values, 50.0),
            q3: compute_percentile(sorted_values, 75.0),
        })
    }

    /// Interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest order statistics: the
/// k-th percentile of n values sits at position `(n - 1) * k / 100`. This is
/// the quartile definition box plots are usually drawn with.
///
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use vagueness_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let position = (last as f64 * percentile.clamp(0.0, 100.0)) / 100.0;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(last);
    let fraction = position - lower as f64;
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quartiles_interpolate() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!((compute_percentile(&values, 25.0) - 2.25).abs() < 1e-12);
        assert!((compute_percentile(&values, 75.0) - 4.75).abs() < 1e-12);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(compute_percentile(&[7.0], 25.0), 7.0);
        assert_eq!(compute_percentile(&[7.0], 100.0), 7.0);
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_quartiles() {
        let quartiles = Quartiles::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert!((quartiles.q1 - 2.25).abs() < 1e-12);
        assert!((quartiles.median - 3.5).abs() < 1e-12);
        assert!((quartiles.iqr() - 2.5).abs() < 1e-12);
        assert!(Quartiles::from_sorted(&[]).is_none());
    }
}

//! Shapiro-Wilk test for normality.
//!
//! Implements Royston's approximation (algorithm AS R94): the weights of the
//! W statistic are derived from approximate expected normal order statistics,
//! and the p-value comes from a normalizing transformation of `1 - W`. Valid
//! for 3 ≤ n ≤ 5000; larger samples are accepted but the p-value becomes
//! increasingly conservative.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use serde::Serialize;

use crate::{
    StatsError,
    distribution::{normal_quantile, normal_sf},
};

const TEST_NAME: &str = "Shapiro-Wilk test";

const MIN_OBSERVATIONS: usize = 3;

// Polynomial coefficients, lowest order first.
const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_190, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Result of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapiroWilk {
    /// The W statistic, in `(0, 1]`. Values close to 1 indicate normality.
    pub statistic: f64,
    /// Probability of a W this small under the normality hypothesis.
    pub p_value: f64,
    /// Number of observations tested.
    pub observations: usize,
}

impl ShapiroWilk {
    /// Tests whether `values` were drawn from a normal distribution.
    ///
    /// # Errors
    ///
    /// * [`StatsError::TooFewObservations`] - fewer than 3 values
    /// * [`StatsError::IdenticalValues`] - all values are equal
    ///
    /// # Examples
    ///
    /// ```
    /// use vagueness_stats::normality::ShapiroWilk;
    ///
    /// let result = ShapiroWilk::test(&[1.0, 2.0, 4.0]).unwrap();
    /// assert!((result.statistic - 0.964_285_7).abs() < 1e-6);
    /// ```
    pub fn test(values: &[f64]) -> Result<Self, StatsError> {
        let n = values.len();
        if n < MIN_OBSERVATIONS {
            return Err(StatsError::TooFewObservations {
                test: TEST_NAME,
                required: MIN_OBSERVATIONS,
                actual: n,
            });
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let range = sorted[n - 1] - sorted[0];
        if range <= f64::MIN_POSITIVE {
            return Err(StatsError::IdenticalValues { test: TEST_NAME });
        }

        // Scale by the range to keep the sums well conditioned.
        let scaled = sorted.iter().map(|v| v / range).collect::<Vec<_>>();
        let mean = mean(&scaled);
        let sum_squares = scaled.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        let weighted = weights(n)
            .iter()
            .zip(&scaled)
            .map(|(a, v)| a * v)
            .sum::<f64>();
        let statistic = (weighted * weighted / sum_squares).min(1.0);

        Ok(Self {
            statistic,
            p_value: p_value(statistic, n),
            observations: n,
        })
    }
}

#[expect(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Evaluates `coefficients[0] + coefficients[1] * x + ...`.
fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Antisymmetric weights `a_1 = -a_n, a_2 = -a_{n-1}, ...` of the W statistic.
#[expect(clippy::cast_precision_loss)]
fn weights(n: usize) -> Vec<f64> {
    let mut a = vec![0.0; n];
    if n == 3 {
        a[0] = -FRAC_1_SQRT_2;
        a[2] = FRAC_1_SQRT_2;
        return a;
    }

    let nf = n as f64;
    let m = (1..=n)
        .map(|i| normal_quantile((i as f64 - 0.375) / (nf + 0.25)))
        .collect::<Vec<_>>();
    let sum_m2 = m.iter().map(|v| v * v).sum::<f64>();
    let norm_m = sum_m2.sqrt();
    let u = 1.0 / nf.sqrt();

    let a_n = polynomial(&C1, u) + m[n - 1] / norm_m;
    a[n - 1] = a_n;
    a[0] = -a_n;

    let (first, epsilon) = if n > 5 {
        let a_n1 = polynomial(&C2, u) + m[n - 2] / norm_m;
        a[n - 2] = a_n1;
        a[1] = -a_n1;
        let epsilon = (sum_m2 - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
            / (1.0 - 2.0 * a_n.powi(2) - 2.0 * a_n1.powi(2));
        (2, epsilon)
    } else {
        let epsilon = (sum_m2 - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * a_n.powi(2));
        (1, epsilon)
    };

    let scale = epsilon.sqrt();
    for i in first..n / 2 {
        a[i] = m[i] / scale;
        a[n - 1 - i] = -m[i] / scale;
    }
    a
}

#[expect(clippy::cast_precision_loss)]
fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        // exact for n = 3
        return (6.0 / PI * (w.sqrt().asin() - PI / 3.0)).clamp(0.0, 1.0);
    }

    let nf = n as f64;
    let y = (1.0 - w).ln();
    let (y, mu, sigma) = if n <= 11 {
        let gamma = polynomial(&G, nf);
        if y >= gamma {
            return 1e-99;
        }
        (
            -(gamma - y).ln(),
            polynomial(&C3, nf),
            polynomial(&C4, nf).exp(),
        )
    } else {
        let ln_n = nf.ln();
        (y, polynomial(&C5, ln_n), polynomial(&C6, ln_n).exp())
    };
    normal_sf((y - mu) / sigma)
}

//! Two-sided Mann-Whitney U test.
//!
//! The exact null distribution is used when at least one sample has 8 or fewer
//! observations and there are no ties. Otherwise the normal approximation with
//! tie and continuity corrections applies.

use crate::{
    distribution::normal_sf,
    rank::{rank_average, tie_sum, upper_triangle},
};

const EXACT_LIMIT: usize = 8;

/// Unadjusted p-values of pairwise Mann-Whitney U tests for every pair `i < j`.
pub(super) fn upper_p_values<G>(groups: &[G]) -> Vec<f64>
where
    G: AsRef<[f64]>,
{
    upper_triangle(groups.len())
        .map(|(i, j)| two_sided(groups[i].as_ref(), groups[j].as_ref()))
        .collect()
}

/// Two-sided p-value of the Mann-Whitney U test comparing `x` with `y`.
///
/// Returns `1.0` when either sample is empty.
///
/// # Examples
///
/// ```
/// use vagueness_stats::posthoc::mann_whitney::two_sided;
///
/// // U = 9 is the largest possible value: P(U >= 9) = 1 / 20
/// let p = two_sided(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
/// assert!((p - 0.1).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn two_sided(x: &[f64], y: &[f64]) -> f64 {
    let (n1, n2) = (x.len(), y.len());
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }

    let pooled = x.iter().chain(y).copied().collect::<Vec<_>>();
    let ranks = rank_average(&pooled);
    let ties = tie_sum(&pooled);

    let rank_sum_x = ranks[..n1].iter().sum::<f64>();
    let u1 = rank_sum_x - (n1 * (n1 + 1)) as f64 / 2.0;
    let u2 = (n1 * n2) as f64 - u1;
    let u = u1.max(u2);

    let p = if (n1 > EXACT_LIMIT && n2 > EXACT_LIMIT) || ties > 0.0 {
        asymptotic_sf(u, n1, n2, ties)
    } else {
        exact_sf(u, n1, n2)
    };
    (2.0 * p).clamp(0.0, 1.0)
}

#[expect(clippy::cast_precision_loss)]
fn asymptotic_sf(u: f64, n1: usize, n2: usize, ties: f64) -> f64 {
    let n = (n1 + n2) as f64;
    let product = (n1 * n2) as f64;
    let mean = product / 2.0;
    let variance = product / 12.0 * ((n + 1.0) - ties / (n * (n - 1.0)));
    if variance <= 0.0 {
        return 0.5;
    }
    let z = (u - mean - 0.5) / variance.sqrt();
    normal_sf(z)
}

/// `P(U >= u)` under the exact null distribution.
///
/// The frequencies of `U` are the coefficients of the Gaussian binomial
/// `Π_{i=1..m} (1 - q^(n+i)) / (1 - q^i)`, computed modulo `q^(mn+1)`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn exact_sf(u: f64, n1: usize, n2: usize) -> f64 {
    let (m, n) = (n1.min(n2), n1.max(n2));
    let max_u = m * n;

    let mut counts = vec![0.0_f64; max_u + 1];
    counts[0] = 1.0;
    for i in 1..=m {
        let shift = n + i;
        for k in (shift..=max_u).rev() {
            counts[k] -= counts[k - shift];
        }
        for k in i..=max_u {
            counts[k] += counts[k - i];
        }
    }

    let total = counts.iter().sum::<f64>();
    let threshold = (u.round().max(0.0) as usize).min(max_u);
    let upper = counts[threshold..].iter().sum::<f64>();
    (upper / total).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_extreme() {
        // m = 2, n = 5: P(U >= 10) = 1 / C(7, 2)
        let p = two_sided(&[1.0, 2.0], &[3.0, 4.0, 5.0, 6.0, 7.0]);
        assert!((p - 2.0 / 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_interior() {
        // U ∈ {0..4} with frequencies 1, 1, 2, 1, 1; u = 3
        let p = two_sided(&[1.0, 3.0], &[2.0, 4.0]);
        assert!((p - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_is_symmetric() {
        let x = [0.3, 1.7, 2.2, 5.1];
        let y = [0.9, 3.3, 4.0, 6.5, 7.2];
        assert_eq!(two_sided(&x, &y), two_sided(&y, &x));
    }

    #[test]
    fn test_asymptotic_large_samples() {
        let x = (1..=10).map(f64::from).collect::<Vec<_>>();
        let y = (11..=20).map(f64::from).collect::<Vec<_>>();
        // z = (100 - 50 - 0.5) / sqrt(175) = 3.742
        let p = two_sided(&x, &y);
        assert!(p > 1.7e-4 && p < 2.0e-4, "p={p}");
    }

    #[test]
    fn test_ties_use_normal_approximation() {
        let p = two_sided(&[1.0, 2.0, 2.0], &[2.0, 3.0, 4.0]);
        assert!(p > 0.0 && p <= 1.0);
    }

    #[test]
    fn test_identical_samples() {
        assert_eq!(two_sided(&[5.0, 5.0], &[5.0, 5.0]), 1.0);
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(two_sided(&[], &[1.0]), 1.0);
    }

    #[test]
    fn test_upper_p_values_order() {
        let groups = [vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![1.5, 2.5, 3.5]];
        let p = upper_p_values(&groups);
        assert_eq!(p.len(), 3);
        assert!((p[0] - 0.1).abs() < 1e-12);
        assert!((p[2] - 0.1).abs() < 1e-12);
        assert!(p[1] > 0.1);
    }
}

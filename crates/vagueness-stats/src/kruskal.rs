use serde::Serialize;

use crate::{StatsError, check_groups, distribution::chi_squared_sf, rank::RankedGroups};

const TEST_NAME: &str = "Kruskal-Wallis test";

/// Result of a Kruskal-Wallis H test.
///
/// The H statistic is corrected for ties; the p-value is the upper tail of the
/// χ² distribution with `groups - 1` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KruskalWallis {
    /// Tie-corrected H statistic.
    pub statistic: f64,
    /// Upper tail probability of `statistic`.
    pub p_value: f64,
    /// Number of groups compared.
    pub groups: usize,
    /// Total number of observations.
    pub observations: usize,
}

impl KruskalWallis {
    /// Tests whether the groups originate from the same distribution.
    ///
    /// # Errors
    ///
    /// * [`StatsError::TooFewGroups`] - fewer than two groups
    /// * [`StatsError::EmptyGroup`] - a group has no observations
    /// * [`StatsError::IdenticalValues`] - every observation has the same value
    ///
    /// # Examples
    ///
    /// ```
    /// use vagueness_stats::kruskal::KruskalWallis;
    ///
    /// let result = KruskalWallis::test(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    /// assert!((result.statistic - 3.857_142_857).abs() < 1e-6);
    /// ```
    pub fn test<G>(groups: &[G]) -> Result<Self, StatsError>
    where
        G: AsRef<[f64]>,
    {
        check_groups(TEST_NAME, groups)?;
        let ranked = RankedGroups::new(groups);

        let correction = tie_correction(&ranked);
        if correction <= 0.0 {
            return Err(StatsError::IdenticalValues { test: TEST_NAME });
        }

        let statistic = h_statistic(&ranked) / correction;
        let freedom = ranked.num_groups() - 1;
        #[expect(clippy::cast_precision_loss)]
        let p_value = chi_squared_sf(statistic, freedom as f64)?;

        Ok(Self {
            statistic,
            p_value,
            groups: ranked.num_groups(),
            observations: ranked.total(),
        })
    }
}

/// Uncorrected H statistic: `12 / (n (n + 1)) Σ R_i² / n_i - 3 (n + 1)`.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn h_statistic(ranked: &RankedGroups) -> f64 {
    let n = ranked.total() as f64;
    let sum = (0..ranked.num_groups())
        .map(|i| ranked.rank_sum(i).powi(2) / ranked.group_len(i) as f64)
        .sum::<f64>();
    12.0 / (n * (n + 1.0)) * sum - 3.0 * (n + 1.0)
}

/// Tie correction factor `1 - Σ (t³ - t) / (n³ - n)`, in `[0, 1]`.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn tie_correction(ranked: &RankedGroups) -> f64 {
    let n = ranked.total() as f64;
    (1.0 - ranked.tie_sum() / (n.powi(3) - n)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_separated_groups() {
        let result = KruskalWallis::test(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert!((result.statistic - 3.857_142_857).abs() < 1e-6);
        assert!((result.p_value - 0.049_534_613).abs() < 1e-6);
        assert_eq!(result.groups, 2);
        assert_eq!(result.observations, 6);
    }

    #[test]
    fn test_three_groups() {
        let groups = [
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ];
        let result = KruskalWallis::test(&groups).unwrap();
        assert!((result.statistic - 7.2).abs() < 1e-9);
        assert!((result.p_value - (-3.6_f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_ties_increase_statistic() {
        // ranks: 1.5 1.5 3 | 4 5.5 5.5
        let groups = [vec![1.0, 1.0, 2.0], vec![3.0, 4.0, 4.0]];
        let ranked = RankedGroups::new(&groups);
        let uncorrected = h_statistic(&ranked);
        let result = KruskalWallis::test(&groups).unwrap();
        assert!(result.statistic > uncorrected);
        assert!((tie_correction(&ranked) - (1.0 - 12.0 / 210.0)).abs() < 1e-12);
    }

    #[test]
    fn test_identical_groups_are_not_significant() {
        let result = KruskalWallis::test(&[vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_group_is_rejected() {
        assert_eq!(
            KruskalWallis::test(&[vec![1.0, 2.0, 3.0]]),
            Err(StatsError::TooFewGroups {
                test: TEST_NAME,
                actual: 1
            })
        );
    }

    #[test]
    fn test_empty_group_is_rejected() {
        assert_eq!(
            KruskalWallis::test(&[vec![1.0, 2.0], vec![]]),
            Err(StatsError::EmptyGroup { test: TEST_NAME })
        );
    }

    #[test]
    fn test_all_identical_is_rejected() {
        assert_eq!(
            KruskalWallis::test(&[vec![2.0, 2.0], vec![2.0, 2.0]]),
            Err(StatsError::IdenticalValues { test: TEST_NAME })
        );
    }
}

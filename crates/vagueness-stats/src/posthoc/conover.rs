use crate::{
    StatsError,
    distribution::students_t_sf,
    kruskal::{h_statistic, tie_correction},
    rank::RankedGroups,
};

/// Unadjusted two-sided p-values of Conover's test for every pair `i < j`.
///
/// `t = |R̄_i - R̄_j| / sqrt(S² (1 / n_i + 1 / n_j) (n - 1 - H) / (n - k))`
/// with `H` the tie-corrected Kruskal-Wallis statistic and `S²` the rank
/// variance, compared against Student's t with `n - k` degrees of freedom.
#[expect(clippy::cast_precision_loss)]
pub(super) fn upper_p_values(
    test: &'static str,
    ranked: &RankedGroups,
) -> Result<Vec<f64>, StatsError> {
    let total = ranked.total();
    let groups = ranked.num_groups();
    if total <= groups {
        return Err(StatsError::NoDegreesOfFreedom {
            test,
            observations: total,
            groups,
        });
    }

    let correction = tie_correction(ranked);
    if correction <= 0.0 {
        return Err(StatsError::IdenticalValues { test });
    }

    let n = total as f64;
    let freedom = (total - groups) as f64;
    let h = h_statistic(ranked) / correction;
    let s2 = if ranked.tie_sum() == 0.0 {
        n * (n + 1.0) / 12.0
    } else {
        let sum_squares = ranked.iter_all().map(|r| r * r).sum::<f64>();
        (sum_squares - n * (n + 1.0).powi(2) / 4.0) / (n - 1.0)
    };
    let d = (n - 1.0 - h) / freedom;

    ranked
        .pairs()
        .map(|(i, j)| {
            let diff = (ranked.mean_rank(i) - ranked.mean_rank(j)).abs();
            let b = 1.0 / ranked.group_len(i) as f64 + 1.0 / ranked.group_len(j) as f64;
            let scale = (s2 * b * d).sqrt();
            if scale > 0.0 {
                Ok((2.0 * students_t_sf(diff / scale, freedom)?).min(1.0))
            } else if diff == 0.0 {
                Ok(1.0)
            } else {
                // all variation lies between groups
                Ok(0.0)
            }
        })
        .collect()
}

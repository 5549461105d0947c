use crate::{StatsError, distribution::normal_sf, rank::RankedGroups};

/// Unadjusted two-sided p-values of Dunn's test for every pair `i < j`.
///
/// `z = |R̄_i - R̄_j| / sqrt((n (n + 1) / 12 - T / (12 (n - 1))) (1 / n_i + 1 / n_j))`
/// where `T = Σ (t³ - t)` over tie runs.
#[expect(clippy::cast_precision_loss)]
pub(super) fn upper_p_values(
    test: &'static str,
    ranked: &RankedGroups,
) -> Result<Vec<f64>, StatsError> {
    let n = ranked.total() as f64;
    let ties = ranked.tie_sum() / (12.0 * (n - 1.0));
    let variance = n * (n + 1.0) / 12.0 - ties;
    if variance <= 0.0 {
        return Err(StatsError::IdenticalValues { test });
    }

    let p_values = ranked
        .pairs()
        .map(|(i, j)| {
            let diff = (ranked.mean_rank(i) - ranked.mean_rank(j)).abs();
            let b = 1.0 / ranked.group_len(i) as f64 + 1.0 / ranked.group_len(j) as f64;
            let z = diff / (variance * b).sqrt();
            (2.0 * normal_sf(z)).min(1.0)
        })
        .collect();
    Ok(p_values)
}

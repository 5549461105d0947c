//! Average-rank transform.
//!
//! Every test in this crate except Shapiro-Wilk works on ranks instead of raw
//! values. Tied values share the average of the ranks they would occupy, and
//! the size of every tie run is kept so that the tests can apply their tie
//! corrections.

/// Ranks `values` in ascending order, starting at 1.
///
/// Tied values receive the average of the ranks they span.
///
/// # Examples
///
/// ```
/// use vagueness_stats::rank::rank_average;
///
/// assert_eq!(rank_average(&[10.0, 30.0, 20.0, 20.0]), vec![1.0, 4.0, 2.5, 2.5]);
/// ```
#[must_use]
pub fn rank_average(values: &[f64]) -> Vec<f64> {
    let mut ranks = vec![0.0; values.len()];
    for_each_tie_run(values, |indices, average_rank| {
        for &idx in indices {
            ranks[idx] = average_rank;
        }
    });
    ranks
}

/// Returns `Σ (t³ - t)` over every run of `t` tied values.
///
/// The sum is zero when all values are distinct.
#[must_use]
pub fn tie_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    for_each_tie_run(values, |indices, _| {
        let t = run_len(indices);
        sum += t * t * t - t;
    });
    sum
}

#[expect(clippy::cast_precision_loss)]
fn run_len(indices: &[usize]) -> f64 {
    indices.len() as f64
}

#[expect(clippy::cast_precision_loss)]
fn for_each_tie_run<F>(values: &[f64], mut f: F)
where
    F: FnMut(&[usize], f64),
{
    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]].total_cmp(&values[order[start]]).is_eq() {
            end += 1;
        }
        // ranks start + 1 ..= end
        let average_rank = (start + 1 + end) as f64 / 2.0;
        f(&order[start..end], average_rank);
        start = end;
    }
}

/// Observations of several groups ranked jointly.
///
/// Ranks are computed over the concatenation of all groups, then split back
/// so that per-group rank sums and means can be queried.
#[derive(Debug, Clone)]
pub struct RankedGroups {
    ranks: Vec<Vec<f64>>,
    total: usize,
    tie_sum: f64,
}

impl RankedGroups {
    /// Ranks all observations of `groups` together.
    #[must_use]
    pub fn new<G>(groups: &[G]) -> Self
    where
        G: AsRef<[f64]>,
    {
        let pooled = groups
            .iter()
            .flat_map(|g| g.as_ref().iter().copied())
            .collect::<Vec<_>>();
        let pooled_ranks = rank_average(&pooled);

        let mut offset = 0;
        let ranks = groups
            .iter()
            .map(|g| {
                let len = g.as_ref().len();
                let group_ranks = pooled_ranks[offset..offset + len].to_vec();
                offset += len;
                group_ranks
            })
            .collect();

        Self {
            ranks,
            total: pooled.len(),
            tie_sum: tie_sum(&pooled),
        }
    }

    /// Number of groups.
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.ranks.len()
    }

    /// Total number of observations over all groups.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of observations in group `idx`.
    #[must_use]
    pub fn group_len(&self, idx: usize) -> usize {
        self.ranks[idx].len()
    }

    /// Ranks of the observations in group `idx`, in input order.
    #[must_use]
    pub fn group_ranks(&self, idx: usize) -> &[f64] {
        &self.ranks[idx]
    }

    /// Sum of the ranks in group `idx`.
    #[must_use]
    pub fn rank_sum(&self, idx: usize) -> f64 {
        self.ranks[idx].iter().sum()
    }

    /// Mean rank of group `idx`. `NaN` for an empty group.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_rank(&self, idx: usize) -> f64 {
        self.rank_sum(idx) / self.group_len(idx) as f64
    }

    /// `Σ (t³ - t)` over the tie runs of the pooled observations.
    #[must_use]
    pub fn tie_sum(&self) -> f64 {
        self.tie_sum
    }

    /// Iterates over all ranks of all groups.
    pub fn iter_all(&self) -> impl Iterator<Item = f64> + '_ {
        self.ranks.iter().flatten().copied()
    }

    /// Iterates over the index pairs `(i, j)` with `i < j`, row by row.
    ///
    /// This is the order in which post-hoc tests report the upper triangle of
    /// their p-value matrix.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        upper_triangle(self.num_groups())
    }
}

/// Index pairs `(i, j)` with `i < j < size`, in row-major order.
pub fn upper_triangle(size: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..size).flat_map(move |i| (i + 1..size).map(move |j| (i, j)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_without_ties() {
        assert_eq!(rank_average(&[3.0, 1.0, 2.0]), vec![3.0, 1.0, 2.0]);
        assert_eq!(tie_sum(&[3.0, 1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_rank_all_tied() {
        assert_eq!(rank_average(&[5.0; 4]), vec![2.5; 4]);
        // t = 4 → 64 - 4
        assert_eq!(tie_sum(&[5.0; 4]), 60.0);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_average(&[]).is_empty());
        assert_eq!(tie_sum(&[]), 0.0);
    }

    #[test]
    fn test_ranked_groups_split() {
        let ranked = RankedGroups::new(&[vec![1.0, 2.0], vec![2.0, 4.0, 5.0]]);
        assert_eq!(ranked.num_groups(), 2);
        assert_eq!(ranked.total(), 5);
        assert_eq!(ranked.group_ranks(0), &[1.0, 2.5]);
        assert_eq!(ranked.group_ranks(1), &[2.5, 4.0, 5.0]);
        assert!((ranked.mean_rank(0) - 1.75).abs() < 1e-12);
        assert!((ranked.rank_sum(1) - 11.5).abs() < 1e-12);
        assert_eq!(ranked.tie_sum(), 6.0);
        assert_eq!(ranked.iter_all().count(), 5);
    }

    #[test]
    fn test_upper_triangle_order() {
        let pairs = upper_triangle(3).collect::<Vec<_>>();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(upper_triangle(1).count(), 0);
    }
}

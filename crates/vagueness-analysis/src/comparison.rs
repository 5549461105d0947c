//! Comparison engine
//!
//! For one selection and [`ComparisonQuery`] the engine computes:
//!
//! 1. **Normality**: Shapiro-Wilk on all metric values of the selection
//! 2. **Omnibus**: Kruskal-Wallis across the groups of the grouping column
//! 3. **Post-hoc**: the selected pairwise test with the selected p-value
//!    adjustment, shaped into a [`PosthocTable`] annotated with mean ranks
//!
//! Each statistic is computed independently; one that fails for the selected
//! data is reported as [`Outcome::Error`] without affecting the others.

use serde::Serialize;
use vagueness_data::filter::Selection;
use vagueness_stats::{kruskal::KruskalWallis, normality::ShapiroWilk};

use crate::{mean_rank::MeanRanks, outcome::Outcome, query::ComparisonQuery, table::PosthocTable};

/// Everything the statistics panel shows for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Header naming the post-hoc test and adjustment
    pub header: String,
    pub query: ComparisonQuery,
    /// Number of selected records (`Total N`)
    pub total: usize,
    pub normality: Outcome<ShapiroWilk>,
    pub omnibus: Outcome<KruskalWallis>,
    pub posthoc: Outcome<PosthocTable>,
}

/// Runs all statistics of `query` on `selection`.
#[must_use]
pub fn compare(selection: &Selection<'_>, query: &ComparisonQuery) -> ComparisonReport {
    let ComparisonQuery {
        metric,
        group_by,
        test,
        adjustment,
    } = *query;

    let values = selection.values(metric);
    let groups = selection.groups(metric, group_by);
    let labels = groups.keys().copied().collect::<Vec<_>>();
    let group_values = groups.into_values().collect::<Vec<_>>();
    tracing::debug!(
        %metric,
        %group_by,
        observations = values.len(),
        groups = labels.len(),
        "comparing groups"
    );

    let normality = Outcome::from(ShapiroWilk::test(&values));
    let omnibus = Outcome::from(KruskalWallis::test(&group_values));
    let posthoc = Outcome::from(test.pairwise(&group_values, adjustment)).map(|matrix| {
        let ranks = MeanRanks::new(selection, metric, group_by);
        PosthocTable::new(&labels, &matrix, &ranks, selection.len())
    });

    for (name, error) in [
        ("normality", normality.error()),
        ("omnibus", omnibus.error()),
        ("post-hoc", posthoc.error()),
    ] {
        if let Some(error) = error {
            tracing::debug!(statistic = name, error, "statistic not computed");
        }
    }

    ComparisonReport {
        header: query.header(),
        query: *query,
        total: selection.len(),
        normality,
        omnibus,
        posthoc,
    }
}

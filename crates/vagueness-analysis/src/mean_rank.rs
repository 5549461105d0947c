//! Mean ranks used to annotate post-hoc results.
//!
//! The metric is ranked once over every selected record that has a value
//! (average ranks for ties), and the ranks are averaged per group. A pairwise
//! cell can then be read as "which of the two groups tends to score higher".

use std::collections::BTreeMap;

use vagueness_data::{
    filter::Selection,
    record::{GroupColumn, Metric},
};
use vagueness_stats::{matrix::round_to, rank::rank_average};

use crate::table::LABEL_COLUMN;

/// Mean rank of every group of a selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeanRanks {
    ranks: BTreeMap<String, f64>,
}

impl MeanRanks {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(selection: &Selection<'_>, metric: Metric, column: GroupColumn) -> Self {
        let observations = selection
            .records()
            .iter()
            .filter_map(|r| r.metric(metric).map(|value| (r.group_label(column), value)))
            .collect::<Vec<_>>();
        let values = observations.iter().map(|(_, v)| *v).collect::<Vec<_>>();
        let ranks = rank_average(&values);

        let mut sums = BTreeMap::<&str, (f64, usize)>::new();
        for ((label, _), rank) in observations.iter().zip(ranks) {
            if let Some(label) = *label {
                let entry = sums.entry(label).or_default();
                entry.0 += rank;
                entry.1 += 1;
            }
        }

        let ranks = sums
            .into_iter()
            .map(|(label, (sum, count))| (label.to_owned(), sum / count as f64))
            .collect();
        Self { ranks }
    }

    /// Mean rank of `group`.
    ///
    /// Returns `None` for the label column pseudo-group and for groups
    /// without observations.
    #[must_use]
    pub fn get(&self, group: &str) -> Option<f64> {
        if group == LABEL_COLUMN {
            return None;
        }
        self.ranks.get(group).copied()
    }

    /// Mean rank of `group` as shown in tooltips: one decimal (ties to even),
    /// or `None`.
    #[must_use]
    pub fn display(&self, group: &str) -> String {
        self.get(group)
            .map_or_else(|| "None".to_owned(), |rank| format!("{:.1}", round_to(rank, 1)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.ranks.iter().map(|(label, rank)| (label.as_str(), *rank))
    }
}

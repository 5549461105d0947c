//! Box-plot summaries
//!
//! Quartiles use linear interpolation between order statistics. Whiskers end
//! at the most extreme observations within 1.5 IQR of the quartiles; anything
//! beyond them is an outlier.
//!
//! ```text
//!          outliers   lower            Q1   median   Q3            upper   outliers
//!             o  o    |-----------------[======|======]-------------|        o
//! ```

use serde::Serialize;
use vagueness_data::{
    filter::Selection,
    record::{GroupColumn, Metric},
};
use vagueness_stats::{descriptive::DescriptiveStats, percentiles::Quartiles};

const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Box-plot summary of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxPlotSummary {
    /// Summarizes `values`. Returns `None` if `values` is empty.
    #[must_use]
    pub fn new(label: impl Into<String>, values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::from_sorted(&sorted)?;
        let quartiles = Quartiles::from_sorted(&sorted)?;

        let reach = WHISKER_IQR_FACTOR * quartiles.iqr();
        let (low_fence, high_fence) = (quartiles.q1 - reach, quartiles.q3 + reach);

        let inside = sorted
            .iter()
            .copied()
            .filter(|v| (low_fence..=high_fence).contains(v));
        let lower_whisker = inside.clone().next().unwrap_or(stats.min);
        let upper_whisker = inside.last().unwrap_or(stats.max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            label: label.into(),
            count: stats.count,
            mean: stats.mean,
            q1: quartiles.q1,
            median: quartiles.median,
            q3: quartiles.q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Box-plot summaries of `metric` per group of `column`, in ascending label order.
#[must_use]
pub fn box_plots(
    selection: &Selection<'_>,
    metric: Metric,
    column: GroupColumn,
) -> Vec<BoxPlotSummary> {
    selection
        .groups(metric, column)
        .into_iter()
        .filter_map(|(label, values)| BoxPlotSummary::new(label, &values))
        .collect()
}

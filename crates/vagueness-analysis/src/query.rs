//! Query types
//!
//! A [`DashboardQuery`] is one state of the dashboard controls: the filter
//! selection plus the [`ComparisonQuery`] choosing metric, grouping column,
//! post-hoc test and p-value adjustment. Every field has a default, so a query
//! file only needs the fields that differ:
//!
//! ```json
//! [
//!   {},
//!   { "countries": ["US", "DE"], "test": "conover", "adjustment": "holm" },
//!   { "genres": ["Tools"], "minInstalls": 25000, "groupBy": "amountOfInstallsGrouped" }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use vagueness_data::{
    dataset::Dataset,
    filter::{FilterCriteria, FilterError, InstallRange},
    record::{GroupColumn, Metric},
};
use vagueness_stats::{adjust::PValueAdjustment, posthoc::PosthocTest};

/// What to compare and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonQuery {
    /// Numeric column to compare
    pub metric: Metric,
    /// Categorical column defining the groups
    pub group_by: GroupColumn,
    /// Post-hoc test run after Kruskal-Wallis
    pub test: PosthocTest,
    /// Adjustment of the post-hoc p-values
    pub adjustment: PValueAdjustment,
}

impl ComparisonQuery {
    /// Header line naming the post-hoc test and adjustment.
    ///
    /// ```
    /// use vagueness_analysis::query::ComparisonQuery;
    ///
    /// assert_eq!(
    ///     ComparisonQuery::default().header(),
    ///     "Kruskal Wallis Post-Hoc Dunn-Test using Bonferroni for adjusting p values"
    /// );
    /// ```
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "Kruskal Wallis Post-Hoc {}-Test using {} for adjusting p values",
            self.test.title(),
            self.adjustment.title()
        )
    }
}

/// Filter selection and comparison settings of one dashboard interaction.
///
/// Missing genre or country lists select everything in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardQuery {
    pub genres: Option<Vec<String>>,
    pub countries: Option<Vec<String>>,
    pub min_installs: u64,
    pub max_installs: u64,
    #[serde(flatten)]
    pub comparison: ComparisonQuery,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            genres: None,
            countries: None,
            min_installs: InstallRange::MIN,
            max_installs: InstallRange::MAX,
            comparison: ComparisonQuery::default(),
        }
    }
}

impl DashboardQuery {
    /// Validates the filter selection against `dataset`.
    pub fn criteria(&self, dataset: &Dataset) -> Result<FilterCriteria, FilterError> {
        let genres = match &self.genres {
            Some(genres) => genres.clone(),
            None => dataset.genres().into_iter().map(str::to_owned).collect(),
        };
        let countries = match &self.countries {
            Some(countries) => countries.clone(),
            None => dataset.countries().into_iter().map(str::to_owned).collect(),
        };
        FilterCriteria::new(genres, countries, self.min_installs, self.max_installs)
    }
}

//! Arguments shared by several subcommands

use std::path::PathBuf;

use clap::Args;
use vagueness_analysis::query::{ComparisonQuery, DashboardQuery};
use vagueness_data::{
    dataset::Dataset,
    filter::{FilterCriteria, InstallRange},
    record::{GroupColumn, Metric},
};
use vagueness_stats::{adjust::PValueAdjustment, posthoc::PosthocTest};

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct DatasetArg {
    /// Path to the dataset JSON file (record list or column-oriented frame)
    #[arg(long, default_value = "data/final_dataframe.json")]
    pub dataset: PathBuf,
}

impl DatasetArg {
    pub fn load(&self) -> anyhow::Result<Dataset> {
        util::read_dataset(&self.dataset)
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SelectionArg {
    /// Genres to keep (comma-separated, default: every genre in the dataset)
    #[arg(long, value_delimiter = ',')]
    pub genres: Option<Vec<String>>,

    /// Hosting countries to keep (comma-separated, default: every country in the dataset)
    #[arg(long, value_delimiter = ',')]
    pub countries: Option<Vec<String>>,

    /// Exclusive lower bound on maxInstalls
    #[arg(long, default_value_t = InstallRange::MIN)]
    pub min_installs: u64,

    /// Exclusive upper bound on maxInstalls; the maximum means unbounded
    #[arg(long, default_value_t = InstallRange::MAX)]
    pub max_installs: u64,
}

impl SelectionArg {
    pub fn query(&self, comparison: ComparisonQuery) -> DashboardQuery {
        DashboardQuery {
            genres: self.genres.clone(),
            countries: self.countries.clone(),
            min_installs: self.min_installs,
            max_installs: self.max_installs,
            comparison,
        }
    }

    pub fn criteria(&self, dataset: &Dataset) -> anyhow::Result<FilterCriteria> {
        let criteria = self.query(ComparisonQuery::default()).criteria(dataset)?;
        Ok(criteria)
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ComparisonArg {
    /// Metric to compare
    #[arg(long, default_value_t = Metric::default())]
    pub metric: Metric,

    /// Column whose values form the groups
    #[arg(long, default_value_t = GroupColumn::default())]
    pub group_by: GroupColumn,

    /// Post-hoc test (dunn, conover, mann-whitney)
    #[arg(long, default_value_t = PosthocTest::default())]
    pub test: PosthocTest,

    /// p-value adjustment (bonferroni, sidak, holm, holm-sidak)
    #[arg(long, default_value_t = PValueAdjustment::default())]
    pub adjust: PValueAdjustment,
}

impl ComparisonArg {
    pub fn query(&self) -> ComparisonQuery {
        ComparisonQuery {
            metric: self.metric,
            group_by: self.group_by,
            test: self.test,
            adjustment: self.adjust,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct OutputArg {
    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl OutputArg {
    pub fn open(&self) -> anyhow::Result<Output> {
        Output::from_output_path(self.output.clone())
    }
}

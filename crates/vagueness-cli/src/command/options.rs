use std::io::Write as _;

use clap::Args;
use serde::Serialize;
use vagueness_data::{
    filter::InstallRange,
    record::{GroupColumn, Metric},
};
use vagueness_stats::{adjust::PValueAdjustment, posthoc::PosthocTest};

use super::args::{DatasetArg, OutputArg, OutputFormat};

#[derive(Debug, Clone, Args)]
pub(crate) struct OptionsArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    output: OutputArg,
}

#[derive(Debug, Serialize)]
struct MetricOption {
    id: Metric,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct InstallSlider {
    min: u64,
    max: u64,
    step: u64,
}

/// Choices offered by the dashboard controls
#[derive(Debug, Serialize)]
struct DashboardOptions<'a> {
    records: usize,
    genres: Vec<&'a str>,
    countries: Vec<&'a str>,
    installs: InstallSlider,
    metrics: Vec<MetricOption>,
    group_columns: [GroupColumn; 4],
    tests: [PosthocTest; 3],
    adjustments: [PValueAdjustment; 4],
}

pub(crate) fn run(arg: &OptionsArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let options = DashboardOptions {
        records: dataset.len(),
        genres: dataset.genres(),
        countries: dataset.countries(),
        installs: InstallSlider {
            min: InstallRange::MIN,
            max: InstallRange::MAX,
            step: InstallRange::STEP,
        },
        metrics: Metric::ALL
            .into_iter()
            .map(|id| MetricOption {
                id,
                label: id.label(),
            })
            .collect(),
        group_columns: GroupColumn::ALL,
        tests: PosthocTest::ALL,
        adjustments: PValueAdjustment::ALL,
    };

    let mut output = arg.output.open()?;
    match arg.output.format {
        OutputFormat::Json => output.write_json(&options),
        OutputFormat::Text => output.write_text(|out| {
            writeln!(out, "Dataset: {} records", options.records)?;
            writeln!(out)?;
            writeln!(out, "Genres ({}):", options.genres.len())?;
            for genre in &options.genres {
                writeln!(out, "  {genre}")?;
            }
            writeln!(out, "Countries ({}):", options.countries.len())?;
            for country in &options.countries {
                writeln!(out, "  {country}")?;
            }
            writeln!(
                out,
                "Installs: {}..{} (step {})",
                options.installs.min, options.installs.max, options.installs.step
            )?;
            writeln!(out)?;
            writeln!(out, "Metrics:")?;
            for metric in &options.metrics {
                writeln!(out, "  {:<28} {}", metric.id, metric.label)?;
            }
            writeln!(out, "Group columns:")?;
            for column in &options.group_columns {
                writeln!(out, "  {column}")?;
            }
            writeln!(out, "Post-hoc tests:")?;
            for test in &options.tests {
                writeln!(out, "  {:<28} {}", test, test.title())?;
            }
            writeln!(out, "Adjustments:")?;
            for adjustment in &options.adjustments {
                writeln!(out, "  {:<28} {}", adjustment, adjustment.title())?;
            }
            Ok(())
        }),
    }
}

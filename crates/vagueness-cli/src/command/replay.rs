//! Replays dashboard interactions
//!
//! Every query in the file stands for one change of the dashboard controls.
//! The queries run in order through a single session, so a rejected filter
//! leaves the previous report on display.

use std::{io::Write as _, path::PathBuf, sync::Arc};

use clap::Args;
use serde::Serialize;
use vagueness_analysis::{
    comparison::ComparisonReport, outcome::Outcome, query::DashboardQuery,
    session::DashboardSession,
};

use super::{
    args::{DatasetArg, OutputArg, OutputFormat},
    report,
};
use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct ReplayArg {
    /// Path to a JSON file holding a list of dashboard queries
    pub queries: PathBuf,

    #[clap(flatten)]
    dataset: DatasetArg,

    /// List the mean-rank tooltip of every post-hoc cell
    #[arg(long)]
    tooltips: bool,

    #[clap(flatten)]
    output: OutputArg,
}

#[derive(Debug, Serialize)]
struct ReplayStep {
    query: DashboardQuery,
    /// Report of this query, or why the filter was rejected
    report: Outcome<ComparisonReport>,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let dataset = Arc::new(arg.dataset.load()?);
    let queries = util::read_queries_file(&arg.queries)?;
    tracing::info!(queries = queries.len(), "replaying queries");

    let mut session = DashboardSession::new(dataset);
    let steps = queries
        .into_iter()
        .enumerate()
        .map(|(i, query)| {
            let report = Outcome::from(session.apply(&query).cloned());
            if let Some(error) = report.error() {
                tracing::warn!(query = i, error, "query rejected");
            }
            ReplayStep { query, report }
        })
        .collect::<Vec<_>>();

    let mut output = arg.output.open()?;
    match arg.output.format {
        OutputFormat::Json => output.write_json(&steps),
        OutputFormat::Text => output.write_text(|out| {
            let mut shown = None;
            for (i, step) in steps.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "# Query {}", i + 1)?;
                match &step.report {
                    Outcome::Value(report) => {
                        report::write_report(out, report, arg.tooltips)?;
                        shown = Some(report);
                    }
                    Outcome::Error(error) => match shown {
                        Some(previous) => {
                            writeln!(out, "rejected: {error}, previous report kept")?;
                            writeln!(out)?;
                            report::write_report(out, previous, arg.tooltips)?;
                        }
                        None => writeln!(out, "rejected: {error}, no report yet")?,
                    },
                }
            }
            Ok(())
        }),
    }
}

use std::io::Write as _;

use clap::Args;
use vagueness_analysis::boxplot::box_plots;
use vagueness_data::record::{GroupColumn, Metric};

use super::args::{DatasetArg, OutputArg, OutputFormat, SelectionArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct BoxPlotArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    selection: SelectionArg,

    /// Metric on the y axis
    #[arg(long, default_value_t = Metric::default())]
    metric: Metric,

    /// Column on the x axis
    #[arg(long, default_value_t = GroupColumn::default())]
    x_axis: GroupColumn,

    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &BoxPlotArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let criteria = arg.selection.criteria(&dataset)?;
    let selection = dataset.filter(&criteria);
    let plots = box_plots(&selection, arg.metric, arg.x_axis);

    let mut output = arg.output.open()?;
    match arg.output.format {
        OutputFormat::Json => output.write_json(&plots),
        OutputFormat::Text => output.write_text(|out| {
            writeln!(out, "{} by {}", arg.metric.label(), arg.x_axis)?;
            writeln!(out)?;
            writeln!(
                out,
                "  {:<20} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9}",
                arg.x_axis.as_str(),
                "N",
                "Lower",
                "Q1",
                "Median",
                "Q3",
                "Upper",
                "Mean",
                "Outliers",
            )?;
            writeln!(out, "  {}", "-".repeat(104))?;
            for plot in &plots {
                writeln!(
                    out,
                    "  {:<20} {:>6} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>9}",
                    plot.label,
                    plot.count,
                    plot.lower_whisker,
                    plot.q1,
                    plot.median,
                    plot.q3,
                    plot.upper_whisker,
                    plot.mean,
                    plot.outliers.len(),
                )?;
            }
            Ok(())
        }),
    }
}

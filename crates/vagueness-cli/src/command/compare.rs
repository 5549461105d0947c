use clap::Args;
use vagueness_analysis::comparison::compare;

use super::{
    args::{ComparisonArg, DatasetArg, OutputArg, OutputFormat, SelectionArg},
    report,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    selection: SelectionArg,
    #[clap(flatten)]
    comparison: ComparisonArg,

    /// List the mean-rank tooltip of every post-hoc cell
    #[arg(long)]
    tooltips: bool,

    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let criteria = arg.selection.criteria(&dataset)?;
    let selection = dataset.filter(&criteria);
    let report = compare(&selection, &arg.comparison.query());

    let mut output = arg.output.open()?;
    match arg.output.format {
        OutputFormat::Json => output.write_json(&report),
        OutputFormat::Text => {
            output.write_text(|out| report::write_report(out, &report, arg.tooltips))
        }
    }
}

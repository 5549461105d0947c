use std::io::Write as _;

use clap::Args;

use super::args::{DatasetArg, OutputArg, OutputFormat, SelectionArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct FilterArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    selection: SelectionArg,
    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &FilterArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let criteria = arg.selection.criteria(&dataset)?;
    let selection = dataset.filter(&criteria);
    tracing::info!(
        selected = selection.len(),
        total = dataset.len(),
        "filter applied"
    );

    let mut output = arg.output.open()?;
    match arg.output.format {
        OutputFormat::Json => output.write_json(selection.records()),
        OutputFormat::Text => output.write_text(|out| {
            writeln!(
                out,
                "{} of {} records selected",
                selection.len(),
                dataset.len()
            )?;
            if selection.is_empty() {
                return Ok(());
            }
            writeln!(out)?;
            writeln!(
                out,
                "  {:<32} {:<20} {:<8} {:>12} {:>10}",
                "App", "Genre", "Country", "MaxInstalls", "Vague%"
            )?;
            writeln!(out, "  {}", "-".repeat(86))?;
            for record in selection.records() {
                let vague = record
                    .metrics
                    .vague_total_percentage
                    .map_or("N/A".to_string(), |v| format!("{v:.2}"));
                writeln!(
                    out,
                    "  {:<32} {:<20} {:<8} {:>12} {:>10}",
                    record.app_id.as_deref().unwrap_or("-"),
                    record.genre,
                    record.hosting_location,
                    record.max_installs,
                    vague,
                )?;
            }
            Ok(())
        }),
    }
}

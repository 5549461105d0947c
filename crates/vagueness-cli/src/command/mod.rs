use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use self::{
    box_plot::BoxPlotArg, compare::CompareArg, filter::FilterArg, options::OptionsArg,
    replay::ReplayArg,
};

mod args;
mod box_plot;
mod compare;
mod filter;
mod options;
mod replay;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the genres, countries and selectors of a dataset
    Options(#[clap(flatten)] OptionsArg),
    /// Print the records matching a filter
    Filter(#[clap(flatten)] FilterArg),
    /// Summarize a metric per group as box plots
    BoxPlot(#[clap(flatten)] BoxPlotArg),
    /// Compare a metric across groups with nonparametric tests
    Compare(#[clap(flatten)] CompareArg),
    /// Apply a sequence of dashboard queries within one session
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match &args.mode {
        Mode::Options(arg) => options::run(arg)?,
        Mode::Filter(arg) => filter::run(arg)?,
        Mode::BoxPlot(arg) => box_plot::run(arg)?,
        Mode::Compare(arg) => compare::run(arg)?,
        Mode::Replay(arg) => replay::run(arg)?,
    }
    Ok(())
}

/// Logs go to stderr so that stdout stays parseable. `RUST_LOG` directives
/// are honored on top of the verbosity level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

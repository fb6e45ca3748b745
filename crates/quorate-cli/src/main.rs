#![doc = include_str!("../README.md")]

mod cli;
mod commands;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub(crate) use types::{CaseSpec, OutputFormat, PlotFormat, SweepReport, TableFormat, TableRow};

fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { n, k, p, format } => {
            commands::eval::run_eval_command(n, k, p, format)?;
        }
        Commands::Table {
            cases,
            format,
            out,
            skip_invalid,
        } => {
            commands::table::run_table_command(cases, format, out, skip_invalid)?;
        }
        Commands::Plot {
            cases,
            format,
            out,
            skip_invalid,
        } => {
            commands::plot::run_plot_command(cases, format, out, skip_invalid)?;
        }
        Commands::Sweep {
            n,
            p,
            target,
            format,
        } => {
            commands::sweep::run_sweep_command(n, p, target, format)?;
        }
        Commands::Demo => {
            commands::demo::run_demo_command()?;
        }
    }

    Ok(())
}

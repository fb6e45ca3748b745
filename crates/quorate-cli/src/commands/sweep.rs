// Command handler for: Sweep
//
// Every quorum size for one (n, p), optionally with the largest quorum that
// still meets a target availability.

use miette::IntoDiagnostic;

use quorate_prob::largest_quorum;

use super::helpers::{parse_output_format, tabulate};
use super::table::render_table_text;
use crate::{CaseSpec, OutputFormat, SweepReport};

/// One row per quorum size is kept in memory, so the server count is capped.
pub(crate) const MAX_SWEEP_SERVERS: u64 = 100_000;

pub(crate) fn build_sweep_report(n: u64, p: f64, target: Option<f64>) -> miette::Result<SweepReport> {
    if n == 0 {
        return Err(miette::miette!("Sweep needs at least one server, got n={n}"));
    }
    if n > MAX_SWEEP_SERVERS {
        return Err(miette::miette!(
            "Sweep supports at most {MAX_SWEEP_SERVERS} servers, got n={n}; use `quorate eval` for single quorums"
        ));
    }
    let cases: Vec<CaseSpec> = (1..=n).map(|k| CaseSpec { n, k, p }).collect();
    let rows = tabulate(&cases, false)?;
    let largest = match target {
        Some(target) => largest_quorum(n, p, target).into_diagnostic()?,
        None => None,
    };
    Ok(SweepReport {
        n,
        p,
        rows,
        target,
        largest_quorum: largest,
    })
}

/// Handler for the `sweep` subcommand.
pub(crate) fn run_sweep_command(
    n: u64,
    p: f64,
    target: Option<f64>,
    format: String,
) -> miette::Result<()> {
    let format = parse_output_format(&format);
    let report = build_sweep_report(n, p, target)?;

    match format {
        OutputFormat::Text => {
            print!("{}", render_table_text(&report.rows));
            if let Some(target) = report.target {
                match report.largest_quorum {
                    Some(k) => println!("Largest quorum meeting {target}: k = {k}"),
                    None => println!("No quorum meets {target}"),
                }
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).into_diagnostic()?
            );
        }
    }
    Ok(())
}

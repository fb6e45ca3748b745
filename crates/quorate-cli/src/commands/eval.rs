// Command handler for: Eval

use miette::IntoDiagnostic;

use quorate_prob::{analyze, AvailabilityQuery};

use super::helpers::parse_output_format;
use crate::OutputFormat;

/// Handler for the `eval` subcommand.
pub(crate) fn run_eval_command(n: u64, k: u64, p: f64, format: String) -> miette::Result<()> {
    let format = parse_output_format(&format);
    let query = AvailabilityQuery::new(n, k, p).into_diagnostic()?;
    let report = analyze(&query);
    tracing::debug!(formula = %report.formula, "evaluated query");

    match format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).into_diagnostic()?
            );
        }
    }
    Ok(())
}

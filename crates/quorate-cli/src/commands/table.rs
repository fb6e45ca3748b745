// Command handler for: Table
//
// Evaluates a case list and renders it as an aligned text table, a markdown
// table, or JSON rows.

use std::path::PathBuf;

use miette::IntoDiagnostic;

use super::helpers::{emit_output, load_cases, parse_table_format, tabulate};
use crate::{TableFormat, TableRow};

pub(crate) fn render_table_text(rows: &[TableRow]) -> String {
    let mut out = format!(
        "{:>5} {:>5} {:>8}  {:<10} {:>12}\n",
        "n", "k", "p", "formula", "availability"
    );
    for row in rows {
        out.push_str(&format!(
            "{:>5} {:>5} {:>8.4}  {:<10} {:>12.6}\n",
            row.n,
            row.k,
            row.p,
            row.formula.as_str(),
            row.availability
        ));
    }
    out
}

pub(crate) fn render_table_markdown(rows: &[TableRow]) -> String {
    let mut out = String::from("| n | k | p | formula | availability |\n");
    out.push_str("|---:|---:|---:|:---|---:|\n");
    for row in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {:.6} |\n",
            row.n, row.k, row.p, row.formula, row.availability
        ));
    }
    out
}

/// Handler for the `table` subcommand.
pub(crate) fn run_table_command(
    cases: Option<PathBuf>,
    format: String,
    out: Option<PathBuf>,
    skip_invalid: bool,
) -> miette::Result<()> {
    let format = parse_table_format(&format);
    let cases = load_cases(cases.as_deref())?;
    let rows = tabulate(&cases, skip_invalid)?;

    let rendered = match format {
        TableFormat::Text => render_table_text(&rows),
        TableFormat::Markdown => render_table_markdown(&rows),
        TableFormat::Json => {
            let mut json = serde_json::to_string_pretty(&rows).into_diagnostic()?;
            json.push('\n');
            json
        }
    };
    emit_output(&rendered, out.as_ref())
}

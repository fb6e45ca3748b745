// Shared helper functions used across CLI command handlers.
//
// These parse CLI format strings into typed enum values, load and evaluate
// case lists, and write rendered output.

use std::fs;
use std::path::{Path, PathBuf};

use miette::IntoDiagnostic;
use tracing::{debug, info, warn};

use quorate_prob::AvailabilityQuery;

use crate::{CaseSpec, OutputFormat, PlotFormat, TableFormat, TableRow};

/// Cases tabulated when no `--cases` file is given.
pub(crate) const DEFAULT_CASES: [(u64, u64, f64); 13] = [
    (1, 1, 0.9),
    (3, 1, 0.9),
    (3, 2, 0.9),
    (3, 3, 0.9),
    (5, 1, 0.9),
    (5, 3, 0.9),
    (5, 5, 0.9),
    (10, 5, 0.95),
    (10, 7, 0.95),
    (10, 10, 0.95),
    (20, 10, 0.99),
    (20, 15, 0.99),
    (20, 20, 0.99),
];

pub(crate) fn parse_output_format(raw: &str) -> OutputFormat {
    match raw {
        "text" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        other => {
            eprintln!("Unknown output format: {other}. Use 'text' or 'json'.");
            std::process::exit(1);
        }
    }
}

pub(crate) fn parse_table_format(raw: &str) -> TableFormat {
    match raw {
        "text" => TableFormat::Text,
        "json" => TableFormat::Json,
        "markdown" => TableFormat::Markdown,
        other => {
            eprintln!("Unknown table format: {other}. Use 'text', 'json', or 'markdown'.");
            std::process::exit(1);
        }
    }
}

pub(crate) fn parse_plot_format(raw: &str) -> PlotFormat {
    match raw {
        "ascii" => PlotFormat::Ascii,
        "mermaid" => PlotFormat::Mermaid,
        other => {
            eprintln!("Unknown plot format: {other}. Use 'ascii' or 'mermaid'.");
            std::process::exit(1);
        }
    }
}

pub(crate) fn default_cases() -> Vec<CaseSpec> {
    DEFAULT_CASES
        .iter()
        .map(|&(n, k, p)| CaseSpec { n, k, p })
        .collect()
}

/// Read a cases file, or fall back to [`DEFAULT_CASES`].
pub(crate) fn load_cases(path: Option<&Path>) -> miette::Result<Vec<CaseSpec>> {
    let Some(path) = path else {
        return Ok(default_cases());
    };
    let raw = fs::read_to_string(path)
        .map_err(|e| miette::miette!("Cannot read cases file {}: {e}", path.display()))?;
    let cases: Vec<CaseSpec> = serde_json::from_str(&raw)
        .map_err(|e| miette::miette!("Malformed cases file {}: {e}", path.display()))?;
    debug!(count = cases.len(), file = %path.display(), "loaded cases");
    Ok(cases)
}

/// Evaluate every case in order.
///
/// An invalid case aborts with its position and the validation message,
/// unless `skip_invalid` is set, in which case it is logged and dropped.
pub(crate) fn tabulate(cases: &[CaseSpec], skip_invalid: bool) -> miette::Result<Vec<TableRow>> {
    let mut rows = Vec::with_capacity(cases.len());
    for (idx, case) in cases.iter().enumerate() {
        let query = match AvailabilityQuery::new(case.n, case.k, case.p) {
            Ok(query) => query,
            Err(e) if skip_invalid => {
                warn!(case = idx + 1, "skipping invalid case: {e}");
                continue;
            }
            Err(e) => return Err(miette::miette!("Case #{}: {e}", idx + 1)),
        };
        let availability = query.evaluate();
        debug!(
            n = case.n,
            k = case.k,
            p = case.p,
            availability,
            "evaluated case"
        );
        rows.push(TableRow {
            n: case.n,
            k: case.k,
            p: case.p,
            formula: query.formula(),
            availability,
        });
    }
    Ok(rows)
}

/// Print `content` to stdout, or write it to `out` when given.
pub(crate) fn emit_output(content: &str, out: Option<&PathBuf>) -> miette::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).into_diagnostic()?;
            }
            fs::write(path, content).into_diagnostic()?;
            info!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

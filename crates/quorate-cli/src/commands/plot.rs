// Command handler for: Plot
//
// Groups tabulated rows by server count and charts availability against the
// quorum size, either as a character chart or as Mermaid xychart blocks.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::helpers::{emit_output, load_cases, parse_plot_format, tabulate};
use crate::{PlotFormat, TableRow};

const CHART_TITLE: &str = "Service availability by quorum size";
const X_LABEL: &str = "k (minimum servers required)";
const CHART_HEIGHT: usize = 21;
const CHART_WIDTH: usize = 61;
const MARKERS: [char; 8] = ['o', '*', '+', 'x', '@', '%', '&', '='];
const OVERLAP_MARKER: char = '#';

/// Rows keyed by `n` (ascending), each series sorted by `k`.
pub(crate) fn group_by_servers(rows: &[TableRow]) -> BTreeMap<u64, Vec<(u64, f64)>> {
    let mut series: BTreeMap<u64, Vec<(u64, f64)>> = BTreeMap::new();
    for row in rows {
        series
            .entry(row.n)
            .or_default()
            .push((row.k, row.availability));
    }
    for points in series.values_mut() {
        points.sort_by_key(|(k, _)| *k);
    }
    series
}

fn chart_column(k: u64, max_k: u64) -> usize {
    if max_k <= 1 {
        return 0;
    }
    let frac = (k.saturating_sub(1)) as f64 / (max_k - 1) as f64;
    ((frac * (CHART_WIDTH - 1) as f64).round() as usize).min(CHART_WIDTH - 1)
}

fn chart_row(availability: f64) -> usize {
    let depth = 1.0 - availability.clamp(0.0, 1.0);
    ((depth * (CHART_HEIGHT - 1) as f64).round() as usize).min(CHART_HEIGHT - 1)
}

pub(crate) fn render_ascii_chart(rows: &[TableRow]) -> String {
    let series = group_by_servers(rows);
    let mut out = format!("{CHART_TITLE}\n");
    if series.is_empty() {
        out.push_str("(no rows)\n");
        return out;
    }

    let max_k = series
        .values()
        .flat_map(|points| points.iter().map(|(k, _)| *k))
        .max()
        .unwrap_or(1);

    let mut grid = vec![vec![' '; CHART_WIDTH]; CHART_HEIGHT];
    for (idx, points) in series.values().enumerate() {
        let marker = MARKERS[idx % MARKERS.len()];
        for &(k, availability) in points {
            let cell = &mut grid[chart_row(availability)][chart_column(k, max_k)];
            *cell = if *cell == ' ' || *cell == marker {
                marker
            } else {
                OVERLAP_MARKER
            };
        }
    }

    for (row, cells) in grid.iter().enumerate() {
        let level = 1.0 - row as f64 / (CHART_HEIGHT - 1) as f64;
        let line: String = cells.iter().collect();
        out.push_str(&format!("{level:>5.2} |{}\n", line.trim_end()));
    }
    out.push_str(&format!("      +{}\n", "-".repeat(CHART_WIDTH)));
    let right = max_k.to_string();
    if max_k > 1 {
        let gap = CHART_WIDTH.saturating_sub(1 + right.len());
        out.push_str(&format!("       1{}{right}\n", " ".repeat(gap)));
    } else {
        out.push_str("       1\n");
    }
    out.push_str(&format!("       {X_LABEL}\n"));

    let legend: Vec<String> = series
        .keys()
        .enumerate()
        .map(|(idx, n)| format!("{} n={n}", MARKERS[idx % MARKERS.len()]))
        .collect();
    out.push_str(&format!("Legend: {}", legend.join(", ")));
    if series.len() > 1 {
        out.push_str(&format!(" ({OVERLAP_MARKER} = overlap)"));
    }
    out.push('\n');
    out
}

/// One fenced `xychart-beta` block per server count.
pub(crate) fn render_mermaid_chart(rows: &[TableRow]) -> String {
    let series = group_by_servers(rows);
    let mut out = format!("# {CHART_TITLE}\n");
    for (n, points) in &series {
        let ks: Vec<String> = points.iter().map(|(k, _)| k.to_string()).collect();
        let values: Vec<String> = points.iter().map(|(_, a)| format!("{a:.6}")).collect();
        out.push_str("\n```mermaid\n");
        out.push_str("xychart-beta\n");
        out.push_str(&format!("    title \"n = {n}\"\n"));
        out.push_str(&format!("    x-axis \"{X_LABEL}\" [{}]\n", ks.join(", ")));
        out.push_str("    y-axis \"Availability\" 0 --> 1\n");
        out.push_str(&format!("    line [{}]\n", values.join(", ")));
        out.push_str("```\n");
    }
    out
}

/// Handler for the `plot` subcommand.
pub(crate) fn run_plot_command(
    cases: Option<PathBuf>,
    format: String,
    out: Option<PathBuf>,
    skip_invalid: bool,
) -> miette::Result<()> {
    let format = parse_plot_format(&format);
    let cases = load_cases(cases.as_deref())?;
    let rows = tabulate(&cases, skip_invalid)?;

    let rendered = match format {
        PlotFormat::Ascii => render_ascii_chart(&rows),
        PlotFormat::Mermaid => render_mermaid_chart(&rows),
    };
    emit_output(&rendered, out.as_ref())
}

//! Shared types used across CLI commands and tests.

use serde::{Deserialize, Serialize};

use quorate_prob::Formula;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TableFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlotFormat {
    Ascii,
    Mermaid,
}

/// One entry of a cases file. Validation happens when the case is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CaseSpec {
    pub(crate) n: u64,
    pub(crate) k: u64,
    pub(crate) p: f64,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct TableRow {
    pub(crate) n: u64,
    pub(crate) k: u64,
    pub(crate) p: f64,
    pub(crate) formula: Formula,
    pub(crate) availability: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SweepReport {
    pub(crate) n: u64,
    pub(crate) p: f64,
    pub(crate) rows: Vec<TableRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) target: Option<f64>,
    pub(crate) largest_quorum: Option<u64>,
}

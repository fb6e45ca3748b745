//! CLI argument definitions: top-level `Cli` struct and `Commands` enum.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub(crate) const CLI_LONG_ABOUT: &str =
    "Availability of a service replicated across n independent servers, \
    reachable when at least k of them are up.\n\n\
    Typical path:\n  \
    1. quorate eval --n 5 --k 3 --p 0.9\n  \
    2. quorate table --cases my_cases.json\n  \
    3. quorate plot --cases my_cases.json --format mermaid\n\n\
    Use `quorate demo` for the worked example.";

#[derive(Parser)]
#[command(name = "quorate")]
#[command(about = "Quorum availability of replicated services")]
#[command(long_about = CLI_LONG_ABOUT)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Evaluate availability for a single (n, k, p) triple
    #[command(display_order = 10)]
    Eval {
        /// Total number of servers
        #[arg(long)]
        n: u64,

        /// Minimum number of servers that must be up
        #[arg(long)]
        k: u64,

        /// Probability that a single server is up
        #[arg(long, allow_negative_numbers = true)]
        p: f64,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Tabulate availability for a list of (n, k, p) cases
    #[command(display_order = 20)]
    Table {
        /// JSON file with an array of {"n", "k", "p"} objects (built-in list if omitted)
        #[arg(long)]
        cases: Option<PathBuf>,

        /// Output format: text | json | markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the table to this path instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Log and drop invalid cases instead of aborting
        #[arg(long, default_value_t = false)]
        skip_invalid: bool,
    },

    /// Chart availability against k, one series per n
    #[command(display_order = 30)]
    Plot {
        /// JSON file with an array of {"n", "k", "p"} objects (built-in list if omitted)
        #[arg(long)]
        cases: Option<PathBuf>,

        /// Output format: ascii | mermaid
        #[arg(long, default_value = "ascii")]
        format: String,

        /// Write the chart to this path instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Log and drop invalid cases instead of aborting
        #[arg(long, default_value_t = false)]
        skip_invalid: bool,
    },

    /// Evaluate every quorum size k in [1, n] for one (n, p)
    #[command(display_order = 40)]
    Sweep {
        /// Total number of servers
        #[arg(long)]
        n: u64,

        /// Probability that a single server is up
        #[arg(long, allow_negative_numbers = true)]
        p: f64,

        /// Report the largest k whose availability meets this target
        #[arg(long)]
        target: Option<f64>,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run the worked example: 5 servers, quorum of 3, p = 0.9
    #[command(display_order = 50)]
    Demo,
}

// Command handler for: Demo
//
// Five servers, any three of which must be up, each up 90% of the time.

use miette::IntoDiagnostic;

use quorate_prob::AvailabilityQuery;

const DEMO_SERVERS: u64 = 5;
const DEMO_QUORUM: u64 = 3;
const DEMO_AVAILABILITY: f64 = 0.9;

pub(crate) fn demo_query() -> miette::Result<AvailabilityQuery> {
    AvailabilityQuery::new(DEMO_SERVERS, DEMO_QUORUM, DEMO_AVAILABILITY).into_diagnostic()
}

/// Handler for the `demo` subcommand.
pub(crate) fn run_demo_command() -> miette::Result<()> {
    let query = demo_query()?;
    println!(
        "Servers: {DEMO_SERVERS}, quorum: {DEMO_QUORUM}, per-server availability: {DEMO_AVAILABILITY}"
    );
    println!("Service availability: {:.4}", query.evaluate());
    Ok(())
}

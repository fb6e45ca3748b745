use serde::Serialize;

use crate::availability::{AvailabilityQuery, Formula};
use crate::binomial::pmf;

/// Result of evaluating one query, with the figures an operator usually asks
/// for next.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    /// The query that was evaluated.
    pub query: AvailabilityQuery,
    /// Closed form that produced `availability`.
    pub formula: Formula,
    /// Probability that at least `k` servers are up.
    pub availability: f64,
    /// `1 - availability`.
    pub unavailability: f64,
    /// Probability that exactly `k` servers are up, so the next failure
    /// takes the service down.
    pub at_threshold: f64,
    /// Expected number of servers up, `n * p`.
    pub expected_available: f64,
    /// Availability expressed as a count of nines, `-log10(1 - availability)`.
    /// `None` when the service is never down.
    pub nines: Option<f64>,
}

impl std::fmt::Display for AvailabilityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Quorum {} of {} (p = {}):",
            self.query.k(),
            self.query.n(),
            self.query.p()
        )?;
        writeln!(f, "  Formula: {}", self.formula)?;
        writeln!(f, "  Availability: {:.4}", self.availability)?;
        writeln!(f, "  Unavailability: {:.3e}", self.unavailability)?;
        writeln!(f, "  At threshold (no spare): {:.4}", self.at_threshold)?;
        match self.nines {
            Some(nines) => writeln!(f, "  Nines: {nines:.2}")?,
            None => writeln!(f, "  Nines: unbounded")?,
        }
        write!(
            f,
            "  Expected servers up: {:.2} of {}",
            self.expected_available,
            self.query.n()
        )
    }
}

/// Evaluate a query and collect the derived figures.
pub fn analyze(query: &AvailabilityQuery) -> AvailabilityReport {
    let availability = query.evaluate();
    let unavailability = 1.0 - availability;
    let nines = if unavailability > 0.0 {
        Some(-unavailability.log10())
    } else {
        None
    };

    AvailabilityReport {
        query: *query,
        formula: query.formula(),
        availability,
        unavailability,
        at_threshold: pmf(query.n(), query.k(), query.p()),
        expected_available: query.n() as f64 * query.p(),
        nines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_basic() {
        let query = AvailabilityQuery::new(5, 3, 0.9).unwrap();
        let report = analyze(&query);
        assert_eq!(report.formula, Formula::General);
        assert!((report.availability - 0.99144).abs() < 1e-9);
        assert!((report.unavailability - 0.00856).abs() < 1e-9);
        // C(5,3) 0.9^3 0.1^2
        assert!((report.at_threshold - 0.0729).abs() < 1e-12);
        assert!((report.expected_available - 4.5).abs() < 1e-12);
        let nines = report.nines.unwrap();
        assert!((nines - 2.0675).abs() < 1e-3, "nines = {nines}");
    }

    #[test]
    fn test_analyze_display() {
        let query = AvailabilityQuery::new(5, 3, 0.9).unwrap();
        let display = format!("{}", analyze(&query));
        assert!(display.contains("Quorum 3 of 5"));
        assert!(display.contains("Availability: 0.9914"));
        assert!(display.contains("Formula: general"));
    }

    #[test]
    fn test_analyze_always_up() {
        let query = AvailabilityQuery::new(4, 2, 1.0).unwrap();
        let report = analyze(&query);
        assert_eq!(report.availability, 1.0);
        assert_eq!(report.nines, None);
        assert_eq!(report.at_threshold, 0.0);
        assert!(format!("{report}").contains("Nines: unbounded"));
    }

    #[test]
    fn test_analyze_serializes_query_fields() {
        let query = AvailabilityQuery::new(10, 10, 0.95).unwrap();
        let value = serde_json::to_value(analyze(&query)).unwrap();
        assert_eq!(value["query"]["n"], 10);
        assert_eq!(value["query"]["k"], 10);
        assert_eq!(value["formula"], "unanimity");
        // every server up is the only way to meet a unanimous quorum
        let at_threshold = value["at_threshold"].as_f64().unwrap();
        assert!((at_threshold - value["availability"].as_f64().unwrap()).abs() < 1e-12);
    }
}

use num::rational::BigRational;
use num::traits::{One, Zero};
use serde::Serialize;
use thiserror::Error;

use crate::binomial::{self, ln_pmf};

/// Relative size below which further tail terms no longer move the sum.
const NEGLIGIBLE_TERM: f64 = 1e-18;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AvailabilityError {
    #[error("Invalid parameters: servers n={n}, quorum k={k}, availability p={p} ({reason})")]
    InvalidParameters {
        n: u64,
        k: u64,
        p: f64,
        reason: &'static str,
    },
    #[error("Target availability must be in (0, 1], got {0}")]
    InvalidTarget(f64),
}

/// Closed form used to answer a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    /// `k = 1`: at least one server up, `1 - (1-p)^n`.
    Query,
    /// `k = n`: every server up, `p^n`.
    Unanimity,
    /// `1 < k < n`: binomial right tail.
    General,
}

impl Formula {
    pub fn as_str(self) -> &'static str {
        match self {
            Formula::Query => "query",
            Formula::Unanimity => "unanimity",
            Formula::General => "general",
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated `(n, k, p)` triple.
///
/// `n` servers fail independently, each up with probability `p`; the service
/// is reachable when at least `k` of them are up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvailabilityQuery {
    n: u64,
    k: u64,
    p: f64,
}

impl AvailabilityQuery {
    /// Construct a validated query.
    ///
    /// # Parameters
    /// - `n`: Total server count, at least 1.
    /// - `k`: Minimum servers required, in `[1, n]`.
    /// - `p`: Per-server availability, in `[0, 1]`.
    ///
    /// # Returns
    /// The query or [`AvailabilityError::InvalidParameters`].
    pub fn new(n: u64, k: u64, p: f64) -> Result<Self, AvailabilityError> {
        let reason = if n < 1 {
            Some("server count must be at least 1")
        } else if k < 1 {
            Some("quorum must be at least 1")
        } else if k > n {
            Some("quorum exceeds server count")
        } else if !(0.0..=1.0).contains(&p) {
            Some("per-server availability must lie in [0, 1]")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(AvailabilityError::InvalidParameters { n, k, p, reason }),
            // -0.0 + 0.0 is +0.0
            None => Ok(Self { n, k, p: p + 0.0 }),
        }
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn k(&self) -> u64 {
        self.k
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// Which closed form answers this query. `n = k = 1` resolves to
    /// [`Formula::Query`].
    pub fn formula(&self) -> Formula {
        if self.k == 1 {
            Formula::Query
        } else if self.k == self.n {
            Formula::Unanimity
        } else {
            Formula::General
        }
    }

    /// Probability that at least `k` of the `n` servers are up.
    pub fn evaluate(&self) -> f64 {
        match self.formula() {
            Formula::Query => query_availability(self.n, self.p),
            Formula::Unanimity => unanimity_availability(self.n, self.p),
            Formula::General => binomial_tail(self.n, self.k, self.p),
        }
    }
}

/// Validate `(n, k, p)` and return `P(X >= k)` for `X ~ Binomial(n, p)`.
pub fn evaluate(n: u64, k: u64, p: f64) -> Result<f64, AvailabilityError> {
    Ok(AvailabilityQuery::new(n, k, p)?.evaluate())
}

fn query_availability(n: u64, p: f64) -> f64 {
    if n == 1 {
        return p;
    }
    if p == 0.0 {
        return 0.0;
    }
    // 1 - (1-p)^n without cancellation for small p
    -((n as f64) * (-p).ln_1p()).exp_m1()
}

fn unanimity_availability(n: u64, p: f64) -> f64 {
    p.powf(n as f64)
}

/// Binomial right tail `sum_{i=k}^{n} C(n,i) p^i (1-p)^(n-i)`.
///
/// Defined for every `k` (`k = 0` gives 1, `k > n` gives 0). The largest term
/// in `[k, n]` is computed in log space from the exact coefficient; the rest
/// are accumulated relative to it, walking outward until they vanish.
///
/// # Parameters
/// - `n`: Total server count.
/// - `k`: Lower end of the tail.
/// - `p`: Per-server availability, assumed to lie in `[0, 1]`.
pub fn binomial_tail(n: u64, k: u64, p: f64) -> f64 {
    if k == 0 {
        return 1.0;
    }
    if k > n {
        return 0.0;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let odds = p / (1.0 - p);
    let mode = (((n + 1) as f64) * p).floor() as u64;
    let peak = mode.clamp(k, n);
    let ln_peak = ln_pmf(n, peak, p);

    let mut relative_sum = 1.0;

    // term(i+1) / term(i) = (n-i)/(i+1) * p/(1-p)
    let mut relative = 1.0;
    for i in peak..n {
        relative *= ((n - i) as f64 / (i + 1) as f64) * odds;
        if relative < NEGLIGIBLE_TERM * relative_sum {
            break;
        }
        relative_sum += relative;
    }

    // term(i-1) / term(i) = i/(n-i+1) * (1-p)/p
    let mut relative = 1.0;
    let mut i = peak;
    while i > k {
        relative *= (i as f64 / (n - i + 1) as f64) / odds;
        if relative < NEGLIGIBLE_TERM * relative_sum {
            break;
        }
        relative_sum += relative;
        i -= 1;
    }

    (ln_peak.exp() * relative_sum).clamp(0.0, 1.0)
}

/// Exact rational value of the binomial right tail.
///
/// Same sum as [`binomial_tail`] with no rounding anywhere; intended for
/// audits and cross-checks on small `n`.
pub fn exact_tail(n: u64, k: u64, p: &BigRational) -> BigRational {
    let q = BigRational::one() - p;
    let mut total = BigRational::zero();
    for i in k..=n {
        let coeff = BigRational::from_integer(binomial::binomial(n, i));
        total += coeff * rational_pow(p, i) * rational_pow(&q, n - i);
    }
    total
}

fn rational_pow(base: &BigRational, mut exp: u64) -> BigRational {
    let mut result = BigRational::one();
    let mut acc = base.clone();
    while exp > 0 {
        if exp & 1 == 1 {
            result *= &acc;
        }
        exp >>= 1;
        if exp > 0 {
            acc = &acc * &acc;
        }
    }
    result
}

/// Largest quorum `k` whose availability still meets `target`.
///
/// Availability is non-increasing in `k`, so the answer is found by bisection.
///
/// # Returns
/// `Some(k)` with `1 <= k <= n`, or `None` when even `k = 1` misses the target.
pub fn largest_quorum(n: u64, p: f64, target: f64) -> Result<Option<u64>, AvailabilityError> {
    if !(target > 0.0 && target <= 1.0) {
        return Err(AvailabilityError::InvalidTarget(target));
    }
    let base = AvailabilityQuery::new(n, 1, p)?;
    if base.evaluate() < target {
        return Ok(None);
    }

    let (mut lo, mut hi) = (1u64, n);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        let query = AvailabilityQuery { k: mid, ..base };
        if query.evaluate() >= target {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(Some(lo))
}

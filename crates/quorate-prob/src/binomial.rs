use num::bigint::BigInt;
use num::traits::{One, ToPrimitive, Zero};

/// Largest `min(k, n-k)` for which `ln_binomial` still builds the exact
/// coefficient. Past it the cost grows with the square of the coefficient's
/// bit length, and log-gamma is accurate to well under `1e-9` relative.
pub const EXACT_COEFFICIENT_LIMIT: u64 = 1024;

/// Exact binomial coefficient C(n, k) using BigInt.
///
/// # Parameters
/// - `n`: Number of servers.
/// - `k`: Number of servers chosen.
///
/// # Returns
/// Exact integer value of `C(n, k)`, or zero when `k > n`.
pub fn binomial(n: u64, k: u64) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    // Use the smaller of k and n-k for efficiency
    let k = std::cmp::min(k, n - k);
    if k == 0 {
        return BigInt::one();
    }
    let mut result = BigInt::one();
    for i in 0..k {
        result *= BigInt::from(n - i);
        result /= BigInt::from(i + 1);
    }
    result
}

/// Natural logarithm of `C(n, k)`.
///
/// Small coefficients are built exactly and coefficients that overflow `f64`
/// are shifted down to their leading 64 bits first. Once the shorter side
/// exceeds [`EXACT_COEFFICIENT_LIMIT`] the value comes from log-gamma, so the
/// cost stays constant in `n`.
pub fn ln_binomial(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    if k.min(n - k) > EXACT_COEFFICIENT_LIMIT {
        return statrs::function::factorial::ln_binomial(n, k);
    }
    ln_bigint(&binomial(n, k))
}

fn ln_bigint(value: &BigInt) -> f64 {
    let bits = value.bits();
    if bits <= 1000 {
        return value.to_f64().map_or(f64::NAN, f64::ln);
    }
    let shift = bits - 64;
    let head = value >> (shift as usize);
    head.to_f64().map_or(f64::NAN, f64::ln) + (shift as f64) * std::f64::consts::LN_2
}

/// Probability that exactly `i` of `n` servers are up when each is up with
/// probability `p`.
///
/// Evaluated in log space so that coefficients beyond `f64` range do not
/// poison the product. `p` is assumed to lie in `[0, 1]`.
pub fn pmf(n: u64, i: u64, p: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    if p == 0.0 {
        return if i == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if i == n { 1.0 } else { 0.0 };
    }
    ln_pmf(n, i, p).exp()
}

/// `ln pmf(n, i, p)` for `0 < p < 1` and `i <= n`.
pub(crate) fn ln_pmf(n: u64, i: u64, p: f64) -> f64 {
    ln_binomial(n, i) + (i as f64) * p.ln() + ((n - i) as f64) * (-p).ln_1p()
}

//! Exact-sum division of amounts.
//!
//! Every equal division in the distribution rounds all entries but the last
//! to the nearest cent and hands the last entry whatever is left, so the
//! parts always sum to the input exactly. Integer-only, `u128` intermediates.

/// `numerator / denominator` rounded half away from zero.
fn div_round(numerator: u128, denominator: u128) -> u128 {
    (numerator * 2 + denominator) / (denominator * 2)
}

/// Divide `amount` into `n` parts that sum to `amount` exactly.
///
/// Entries `0..n-1` receive `round(amount / n)`, clamped to what is still
/// unassigned; entry `n-1` receives the remainder. Returns an empty vector
/// when `n == 0`.
///
/// # Examples
///
/// ```
/// use heir_core::split::split_evenly;
/// assert_eq!(split_evenly(100_000_000, 3), vec![33_333_333, 33_333_333, 33_333_334]);
/// assert_eq!(split_evenly(10, 4), vec![3, 3, 3, 1]);
/// assert!(split_evenly(10, 0).is_empty());
/// ```
pub fn split_evenly(amount: u64, n: usize) -> Vec<u64> {
    if n == 0 {
        return Vec::new();
    }
    let per_part = div_round(amount as u128, n as u128) as u64;
    let mut parts = Vec::with_capacity(n);
    let mut assigned: u64 = 0;
    for _ in 0..n - 1 {
        let part = per_part.min(amount - assigned);
        assigned += part;
        parts.push(part);
    }
    parts.push(amount - assigned);
    parts
}

/// `amount * numerator / denominator`, rounded to the nearest cent and
/// capped at `amount`. A zero denominator yields zero.
///
/// # Examples
///
/// ```
/// use heir_core::split::fraction_of;
/// assert_eq!(fraction_of(100_000_000, 1, 4), 25_000_000);
/// assert_eq!(fraction_of(1, 1, 2), 1);
/// ```
pub fn fraction_of(amount: u64, numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let scaled = div_round(
        amount as u128 * numerator as u128,
        denominator as u128,
    );
    scaled.min(amount as u128) as u64
}

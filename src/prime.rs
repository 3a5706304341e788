//! Prime sizing for bucket stores.
//!
//! Both maps keep a prime number of buckets so that `hash % capacity` spreads keys evenly and
//! the quadratic probe sequence visits at least half of the table before it repeats.

/// Returns `true` if `n` is prime.
///
/// 2 and 3 are recognized directly, 0, 1 and every other even number are rejected, and the
/// rest is decided by trial division with odd factors while `factor² <= n`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }

    if n < 2 || n.is_multiple_of(2) {
        return false;
    }

    let mut factor: usize = 3;
    while factor.checked_mul(factor).is_some_and(|square| square <= n) {
        if n.is_multiple_of(factor) {
            return false;
        }
        factor += 2;
    }

    true
}

/// Returns the first prime found at or after `n`, skipping even candidates.
///
/// An even `n` is bumped to the next odd number before the search, so `next_prime(2)` is 3.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n.is_multiple_of(2) { n.saturating_add(1) } else { n };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

/// Returns `n` when it is already prime, otherwise [`next_prime`] of it.
///
/// This is the normalization `resize_table` uses; unlike `next_prime` it keeps 2 as is.
#[must_use]
pub fn prime_at_least(n: usize) -> usize {
    if is_prime(n) { n } else { next_prime(n) }
}

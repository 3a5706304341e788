//! Hash functions for string keys.
//!
//! The maps take the hash function as a plain value, anything callable as `Fn(&str) -> u64`.
//! The output is not bounded; the maps reduce it with `% capacity` themselves.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Function pointer type used as the default hash function parameter of both maps.
pub type HashFn = fn(&str) -> u64;

/// Sums the code points of `key`.
///
/// Anagrams collide, which makes this a handy function for exercising collision handling.
#[must_use]
pub fn additive_hash(key: &str) -> u64 {
    key.chars().fold(0u64, |hash, ch| hash.wrapping_add(u64::from(ch)))
}

/// Sums the code points of `key`, each weighted by its one-based position.
#[must_use]
pub fn positional_hash(key: &str) -> u64 {
    key.chars()
        .zip(1u64..)
        .fold(0u64, |hash, (ch, position)| hash.wrapping_add(position.wrapping_mul(u64::from(ch))))
}

/// Hashes `key` with the standard library's `SipHash` implementation.
#[must_use]
pub fn sip_hash(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Reduces a hash to a bucket index for a table with `capacity` buckets.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    // The remainder is below `capacity`, so narrowing back to usize is lossless.
    hash.checked_rem(capacity as u64).map_or(0, |index| index as usize)
}

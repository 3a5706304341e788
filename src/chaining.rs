use std::{fmt, mem};

use log::debug;

use crate::{
    DEFAULT_CAPACITY,
    chain::{self, Chain},
    error::MapError,
    hash::{HashFn, additive_hash, bucket_index},
    prime::{next_prime, prime_at_least},
};

/// A string-keyed hash map resolving collisions with separate chaining.
///
/// Each bucket holds a singly linked chain of the entries hashing to it. The map never resizes
/// on its own: growing or shrinking the bucket array is left to the caller through
/// [`resize_table`](ChainingMap::resize_table), and any load factor is accepted.
#[derive(Clone)]
pub struct ChainingMap<V, F = HashFn> {
    /// One chain per bucket
    buckets: Vec<Chain<V>>,
    /// Number of entries across all chains
    size: usize,
    /// Caller supplied hash function
    hash_fn: F,
}

impl<V> ChainingMap<V> {
    /// Creates a map with at least `capacity` buckets that hashes keys with [`additive_hash`].
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, MapError> {
        Self::with_hasher(capacity, additive_hash)
    }
}

/// 11 buckets hashed with [`additive_hash`].
impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::build(DEFAULT_CAPACITY, additive_hash)
    }
}

impl<V, F> ChainingMap<V, F>
where
    F: Fn(&str) -> u64,
{
    /// Creates a map with the first prime number of buckets at or after `capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroCapacity`] if `capacity` is 0.
    pub fn with_hasher(capacity: usize, hash_fn: F) -> Result<Self, MapError> {
        if capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        Ok(Self::build(capacity, hash_fn))
    }

    /// Builds an empty table; `capacity` is normalized with [`next_prime`]
    fn build(capacity: usize, hash_fn: F) -> Self {
        Self { buckets: empty_chains(next_prime(capacity)), size: 0, hash_fn }
    }

    /// Bucket `key` hashes to in a table of `capacity` buckets
    fn index_for(&self, key: &str, capacity: usize) -> usize {
        bucket_index((self.hash_fn)(key), capacity)
    }

    /// The chain `key` belongs to
    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.index_for(key, self.buckets.len()))
    }

    /// The chain `key` belongs to, mutably
    fn chain_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = self.index_for(key, self.buckets.len());
        self.buckets.get_mut(index)
    }

    /// Insert a key-value pair, replacing the value in place if the key is already present.
    ///
    /// Returns the previous value stored under `key`.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let chain = self.chain_mut(&key)?;

        if let Some(slot) = chain.find_mut(&key) {
            return Some(mem::replace(slot, value));
        }

        chain.insert(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        if self.size == 0 {
            return None;
        }
        self.chain(key)?.find(key)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if self.size == 0 {
            return None;
        }
        self.chain_mut(key)?.find_mut(key)
    }

    /// Returns true if `key` is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Unlinks the entry holding `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        if self.size == 0 {
            return None;
        }

        let value = self.chain_mut(key)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Rehashes every entry into the first prime number of buckets at or after `new_capacity`.
    ///
    /// Does nothing if `new_capacity` is 0. Any capacity is accepted otherwise, including one
    /// smaller than the number of entries.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let new_capacity = prime_at_least(new_capacity);
        let old_capacity = self.capacity();
        let mut new_buckets = empty_chains(new_capacity);

        for (key, value) in mem::take(&mut self.buckets).into_iter().flatten() {
            let index = self.index_for(&key, new_capacity);
            let Some(chain) = new_buckets.get_mut(index) else {
                continue;
            };
            match chain.find_mut(&key) {
                Some(slot) => *slot = value,
                None => chain.insert(key, value),
            }
        }

        self.buckets = new_buckets;
        debug!(
            "chaining table resized from {old_capacity} to {new_capacity} buckets, {} entries moved",
            self.size
        );
    }
}

impl<V, F> ChainingMap<V, F> {
    /// Returns the number of entries
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets, always a prime number
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the hash map
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns the number of buckets with an empty chain
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns the length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(|chain| chain.iter().count()).max().unwrap_or(0)
    }

    /// Drops every entry, keeping the capacity
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            if !chain.is_empty() {
                *chain = Chain::new();
            }
        }
        self.size = 0;
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None }
    }
}

impl<V: Clone, F> ChainingMap<V, F> {
    /// Returns every key-value pair, bucket by bucket.
    ///
    /// The order depends on the hash function, the capacity and the insertion history.
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)> {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

/// Allocates `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    let mut chains = Vec::with_capacity(capacity);
    chains.resize_with(capacity, Chain::new);
    chains
}

impl<K, V, F> Extend<(K, V)> for ChainingMap<V, F>
where
    K: Into<String>,
    F: Fn(&str) -> u64,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V: fmt::Debug, F> fmt::Debug for ChainingMap<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainingMap")
            .field("size", &self.size)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

/// One line per bucket: `index: (key: value) -> (key: value)`.
impl<V: fmt::Display, F> fmt::Display for ChainingMap<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of a [`ChainingMap`]
pub struct Iter<'a, V> {
    /// Buckets not visited yet
    buckets: std::slice::Iter<'a, Chain<V>>,
    /// Chain being walked
    chain: Option<chain::Iter<'a, V>>,
}

impl<V> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("buckets_left", &self.buckets.len()).finish_non_exhaustive()
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(pair);
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

impl<'a, V, F> IntoIterator for &'a ChainingMap<V, F> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

use std::{fmt, iter::FusedIterator, mem, slice};

use log::{debug, trace};

use crate::{
    DEFAULT_CAPACITY,
    error::MapError,
    hash::{HashFn, additive_hash, bucket_index},
    prime::{next_prime, prime_at_least},
};

/// Load factor the open addressing map never reaches once a `put` returns.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// A key-value pair stored in a slot
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// Flag indicating whether this entry has been deleted (tombstone)
    tombstone: bool,
}

/// Outcome of walking the probe sequence of a key
enum Search {
    /// A slot holding the key, live or tombstoned
    Found(usize),
    /// The first empty slot of the sequence; the key is not in the table
    Vacant(usize),
    /// The walk met neither the key nor an empty slot
    Exhausted {
        /// First tombstoned slot seen during the walk
        first_tombstone: Option<usize>,
    },
}

/// Quadratic probe sequence `(base + i²) mod capacity` for `i` in `0..capacity`.
///
/// The next address is derived from the current one with `(i + 1)² - i² = 2i + 1`, which keeps
/// every intermediate value below `3 * capacity`.
#[derive(Debug, Clone)]
struct QuadraticProbe {
    /// Slot examined next
    address: usize,
    /// Probe number of `address`
    offset: usize,
    /// Number of slots in the table
    capacity: usize,
}

impl QuadraticProbe {
    /// Starts a probe sequence at `base`
    const fn new(base: usize, capacity: usize) -> Self {
        Self { address: base, offset: 0, capacity }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.offset >= self.capacity {
            return None;
        }

        let current = self.address;
        let step = (2 * self.offset + 1) % self.capacity;
        self.address = (self.address + step) % self.capacity;
        self.offset += 1;
        Some(current)
    }
}

/// A string-keyed hash map resolving collisions with quadratic probing.
///
/// All entries live in one flat slot array whose length is always prime. Removal marks an entry
/// as a tombstone instead of emptying its slot, so probe sequences running through the slot stay
/// intact; tombstones are dropped only when the table is rebuilt by [`resize_table`].
///
/// The table doubles before any `put` of a new key that would bring the load factor to
/// [`MAX_LOAD_FACTOR`]. Overwriting a live key never resizes.
///
/// [`resize_table`]: OpenAddressingMap::resize_table
#[derive(Clone)]
pub struct OpenAddressingMap<V, F = HashFn> {
    /// The slots storing the entries, `None` for a slot that was never used
    buckets: Vec<Option<Entry<V>>>,
    /// Number of live (non-tombstoned) entries
    size: usize,
    /// Caller supplied hash function
    hash_fn: F,
}

impl<V> OpenAddressingMap<V> {
    /// Creates a map with at least `capacity` buckets that hashes keys with [`additive_hash`].
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, MapError> {
        Self::with_hasher(capacity, additive_hash)
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::build(DEFAULT_CAPACITY, additive_hash)
    }
}

impl<V, F> OpenAddressingMap<V, F>
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
        Self { buckets: empty_slots(next_prime(capacity)), size: 0, hash_fn }
    }

    /// Bucket a probe sequence for `key` starts from
    fn home_index(&self, key: &str) -> usize {
        bucket_index((self.hash_fn)(key), self.buckets.len())
    }

    /// Walks the probe sequence of `key` until it meets the key or an empty slot
    fn search(&self, key: &str) -> Search {
        let mut first_tombstone = None;

        for index in QuadraticProbe::new(self.home_index(key), self.buckets.len()) {
            match self.buckets.get(index) {
                Some(Some(entry)) if entry.key == key => return Search::Found(index),
                Some(Some(entry)) => {
                    if entry.tombstone && first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(None) => return Search::Vacant(index),
                None => break,
            }
        }

        Search::Exhausted { first_tombstone }
    }

    /// Index of the live entry holding `key`
    fn find_live(&self, key: &str) -> Option<usize> {
        if self.size == 0 {
            return None;
        }

        let Search::Found(index) = self.search(key) else {
            return None;
        };
        match self.buckets.get(index) {
            Some(Some(entry)) if !entry.tombstone => Some(index),
            _ => None,
        }
    }

    /// Insert a key-value pair, replacing the value of a live entry with the same key.
    ///
    /// Returns the value previously stored under `key`, if it was live.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if self.load_after_insert() >= MAX_LOAD_FACTOR && !self.contains_key(&key) {
            self.resize_table(self.capacity().saturating_mul(2));
        }

        self.insert_entry(key, value)
    }

    /// Places an entry on its probe sequence without checking the load factor
    fn insert_entry(&mut self, key: String, value: V) -> Option<V> {
        let index = match self.search(&key) {
            Search::Found(index) | Search::Vacant(index) => index,
            Search::Exhausted { first_tombstone: Some(index) } => {
                // Every reachable slot was visited without meeting the key, so it is absent.
                trace!("probe sequence for {key:?} exhausted, reusing tombstone at {index}");
                index
            }
            Search::Exhausted { first_tombstone: None } => {
                // Every probe sequence covers (capacity + 1) / 2 slots, so this needs a table
                // filled past the load factor limit.
                self.resize_table(self.capacity().saturating_mul(2));
                return self.insert_entry(key, value);
            }
        };

        let slot = self.buckets.get_mut(index)?;
        match slot.replace(Entry { key, value, tombstone: false }) {
            Some(previous) if !previous.tombstone => Some(previous.value),
            _ => {
                self.size = self.size.saturating_add(1);
                None
            }
        }
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find_live(key)?;
        self.buckets.get(index)?.as_ref().map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_live(key)?;
        self.buckets.get_mut(index)?.as_mut().map(|entry| &mut entry.value)
    }

    /// Returns true if a live entry holds `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_live(key).is_some()
    }

    /// Marks the entry holding `key` as a tombstone.
    ///
    /// Returns `false` and leaves the map untouched if `key` is absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(index) = self.find_live(key) else {
            return false;
        };
        let Some(Some(entry)) = self.buckets.get_mut(index) else {
            return false;
        };

        entry.tombstone = true;
        self.size = self.size.saturating_sub(1);
        true
    }

    /// Rebuilds the table with the first prime number of buckets at or after `new_capacity`.
    ///
    /// Does nothing if `new_capacity` is smaller than the number of live entries. Tombstones are
    /// discarded and every live entry is inserted again through [`put`](Self::put), so the table
    /// may end up larger than requested when `new_capacity` is too small for the load factor.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            return;
        }

        let new_capacity = prime_at_least(new_capacity);
        let old_capacity = self.capacity();
        let old_buckets = mem::replace(&mut self.buckets, empty_slots(new_capacity));
        let live = mem::take(&mut self.size);

        for entry in old_buckets.into_iter().flatten().filter(|entry| !entry.tombstone) {
            self.put(entry.key, entry.value);
        }

        debug!(
            "open addressing table resized from {old_capacity} to {} buckets, {live} entries moved",
            self.capacity()
        );
    }

    /// Returns an iterator over the live key-value pairs in bucket order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.buckets.iter() }
    }
}

impl<V, F> OpenAddressingMap<V, F> {
    /// Returns the number of live entries
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
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

    /// Load factor the table would have after inserting one more entry
    #[allow(clippy::cast_precision_loss)]
    fn load_after_insert(&self) -> f64 {
        self.size.saturating_add(1) as f64 / self.capacity() as f64
    }

    /// Returns the number of slots that never held an entry since the last rebuild.
    ///
    /// Tombstoned slots are not empty.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|slot| slot.is_none()).count()
    }

    /// Returns the number of tombstoned slots
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.buckets.iter().flatten().filter(|entry| entry.tombstone).count()
    }

    /// Empties every slot, tombstones included, keeping the capacity.
    ///
    /// Does nothing on a map without live entries, so tombstones left by removing every key stay
    /// in place until the next rebuild.
    pub fn clear(&mut self) {
        if self.size == 0 {
            return;
        }

        for slot in &mut self.buckets {
            *slot = None;
        }
        self.size = 0;
    }
}

impl<V: Clone, F> OpenAddressingMap<V, F> {
    /// Returns every live key-value pair, in bucket order.
    ///
    /// The order depends on the hash function and the capacity and is not stable across resizes.
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)> {
        self.buckets
            .iter()
            .flatten()
            .filter(|entry| !entry.tombstone)
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Option<Entry<V>>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

impl<K, V, F> Extend<(K, V)> for OpenAddressingMap<V, F>
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

impl<V: fmt::Debug, F> fmt::Debug for OpenAddressingMap<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("size", &self.size)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

/// One line per bucket: `index: key => value`, with `(tombstone)` appended to deleted
/// entries and `-` for empty slots.
impl<V: fmt::Display, F> fmt::Display for OpenAddressingMap<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            match slot {
                None => writeln!(f, "{index}: -")?,
                Some(entry) if entry.tombstone => {
                    writeln!(f, "{index}: {} => {} (tombstone)", entry.key, entry.value)?;
                }
                Some(entry) => writeln!(f, "{index}: {} => {}", entry.key, entry.value)?,
            }
        }
        Ok(())
    }
}

/// Iterator over the live key-value pairs of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots
    slots: slice::Iter<'a, Option<Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .flatten()
            .find(|entry| !entry.tombstone)
            .map(|entry| (entry.key.as_str(), &entry.value))
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<'a, V, F> IntoIterator for &'a OpenAddressingMap<V, F>
where
    F: Fn(&str) -> u64,
{
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Utility functions and traits shared by [`OpenAddressingMap`] and [`ChainingMap`]

use crate::{ChainingMap, OpenAddressingMap};

/// Operations both hash map engines provide, for code that drives either one.
///
/// The engines differ in how they delete and resize: the open addressing map leaves tombstones
/// and grows on its own, the chaining map unlinks nodes and only resizes when asked to.
pub trait HashTable<V> {
    /// Inserts or overwrites `key`, returning the previous value
    fn put(&mut self, key: &str, value: V) -> Option<V>;

    /// Returns the value stored under `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if `key` is present
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning true if it was present
    fn remove(&mut self, key: &str) -> bool;

    /// Removes every entry
    fn clear(&mut self);

    /// Rebuilds the table around a new bucket count
    fn resize_table(&mut self, new_capacity: usize);

    /// Number of entries
    fn size(&self) -> usize;

    /// Number of buckets
    fn capacity(&self) -> usize;

    /// Number of buckets holding nothing
    fn empty_buckets(&self) -> usize;

    /// Ratio of entries to buckets
    #[allow(clippy::cast_precision_loss)]
    fn table_load(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }

    /// Snapshot of the occupancy figures of the table
    fn stats(&self) -> TableStats {
        TableStats {
            size: self.size(),
            capacity: self.capacity(),
            empty_buckets: self.empty_buckets(),
            load: self.table_load(),
        }
    }
}

/// Occupancy figures of a table at one point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStats {
    /// Number of entries
    pub size: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Number of buckets holding nothing
    pub empty_buckets: usize,
    /// Ratio of entries to buckets
    pub load: f64,
}

impl TableStats {
    /// Share of buckets holding nothing, between 0 and 1
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn empty_ratio(&self) -> f64 {
        self.empty_buckets as f64 / self.capacity as f64
    }
}

impl<V, F> HashTable<V> for OpenAddressingMap<V, F>
where
    F: Fn(&str) -> u64,
{
    fn put(&mut self, key: &str, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize_table(&mut self, new_capacity: usize) {
        Self::resize_table(self, new_capacity);
    }

    fn size(&self) -> usize {
        Self::size(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }
}

impl<V, F> HashTable<V> for ChainingMap<V, F>
where
    F: Fn(&str) -> u64,
{
    fn put(&mut self, key: &str, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        Self::remove(self, key).is_some()
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize_table(&mut self, new_capacity: usize) {
        Self::resize_table(self, new_capacity);
    }

    fn size(&self) -> usize {
        Self::size(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }
}

/// Puts every pair of `iter` into `table`, later pairs overwriting earlier ones
pub fn fill<T, V, I, K>(table: &mut T, iter: I)
where
    T: HashTable<V> + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    for (key, value) in iter {
        table.put(key.as_ref(), value);
    }
}

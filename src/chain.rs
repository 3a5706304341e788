//! Singly linked bucket used by [`ChainingMap`](crate::ChainingMap).

use std::{fmt, iter::FusedIterator};

/// A node in a chain
struct Node<V> {
    /// The key stored in this node
    key: String,
    /// The value associated with the key
    value: V,
    /// The next node of the chain
    next: Option<Box<Node<V>>>,
}

/// A singly linked list of key-value pairs that share one bucket index.
///
/// Keys are unique within a chain as long as callers look a key up before inserting it.
pub(crate) struct Chain<V> {
    /// First node of the chain, `None` for an empty bucket
    head: Option<Box<Node<V>>>,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self { head: None }
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain
    pub(crate) const fn new() -> Self {
        Self { head: None }
    }

    /// Returns true if the chain holds no nodes
    pub(crate) const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pushes a new node at the front of the chain without checking for an existing key
    pub(crate) fn insert(&mut self, key: String, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { key, value, next }));
    }

    /// Returns the value stored under `key`
    pub(crate) fn find(&self, key: &str) -> Option<&V> {
        self.iter().find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Returns a mutable reference to the value stored under `key`
    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the node holding `key` and returns its value
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let node = link.take()?;
        let Node { value, next, .. } = *node;
        *link = next;
        Some(value)
    }

    /// Iterates over the chain from front to back
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

impl<V> Drop for Chain<V> {
    // Unlink iteratively so dropping a long chain does not recurse once per node.
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({key}: {value})")?;
        }
        Ok(())
    }
}

impl<V: Clone> Clone for Chain<V> {
    fn clone(&self) -> Self {
        // Rebuilding by push-front reverses the order, so collect first and push in reverse.
        let pairs: Vec<(&str, &V)> = self.iter().collect();
        let mut chain = Self::new();
        for (key, value) in pairs.into_iter().rev() {
            chain.insert(key.to_owned(), value.clone());
        }
        chain
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

/// Borrowing iterator over the nodes of a chain
pub(crate) struct Iter<'a, V> {
    /// The node yielded next
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some((node.key.as_str(), &node.value))
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

/// Owning iterator that unlinks nodes from the front of a chain
pub(crate) struct IntoIter<V> {
    /// The chain being drained
    chain: Chain<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.chain.head.take()?;
        let Node { key, value, next } = *node;
        self.chain.head = next;
        Some((key, value))
    }
}

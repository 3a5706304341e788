//! # Chainprobe
//!
//! String-keyed hash maps built from scratch on top of a plain `Vec`.
//!
//! This crate provides two hash map implementations that share the same shape but resolve
//! collisions differently:
//!
//! - `OpenAddressingMap`: one flat slot array, quadratic probing, tombstones on removal, and a
//!   rebuild at double size before any insert that would bring the load factor to 0.5
//! - `ChainingMap`: one singly linked chain per bucket, removal by unlinking, and resizing only
//!   when the caller asks for it
//!
//! Both keep a prime number of buckets and take the hash function as a plain value, anything
//! callable as `Fn(&str) -> u64`. [`find_mode`] shows the chaining map used as a frequency
//! counter.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainprobe::OpenAddressingMap;
//!
//! // Create a new hash map with at least 101 buckets
//! let mut map = OpenAddressingMap::new(101)?;
//!
//! // Insert values
//! map.put("key1", 10);
//! map.put("key2", 20);
//!
//! // Update values
//! map.put("key1", 30);
//! assert_eq!(map.size(), 2);
//! assert_eq!(map.get("key1"), Some(&30));
//!
//! // Remove values, leaving a tombstone behind
//! map.remove("key1");
//! assert_eq!(map.get("key1"), None);
//! assert_eq!(map.empty_buckets(), 99);
//! # Ok::<(), chainprobe::MapError>(())
//! ```
//!
//! ## Custom Hash Functions
//!
//! ```rust
//! use chainprobe::{ChainingMap, positional_hash};
//!
//! let mut map = ChainingMap::with_hasher(11, positional_hash)?;
//! map.extend((1..=20).map(|i| (i.to_string(), i)));
//!
//! // The chaining map never grows by itself
//! assert_eq!(map.capacity(), 11);
//! assert!(map.table_load() > 1.0);
//!
//! map.resize_table(40);
//! assert_eq!(map.capacity(), 41);
//! assert_eq!(map.get("17"), Some(&17));
//!
//! // Closures work too
//! let mut by_length = ChainingMap::with_hasher(5, |key: &str| key.len() as u64)?;
//! by_length.put("abc", true);
//! assert!(by_length.contains_key("abc"));
//! # Ok::<(), chainprobe::MapError>(())
//! ```

/// Singly linked chains backing the separate chaining map
mod chain;
/// Separate chaining hash map
mod chaining;
/// Error type of the fallible constructors
mod error;
/// Hash functions for string keys
mod hash;
/// Mode finding built on the chaining map
mod mode;
/// Open addressing hash map with quadratic probing
mod open_addressing;
/// Prime number helpers for sizing bucket arrays
mod prime;
/// Traits and helpers shared by both maps
mod utils;

pub use chaining::ChainingMap;
pub use error::MapError;
pub use hash::{HashFn, additive_hash, positional_hash, sip_hash};
pub use mode::find_mode;
pub use open_addressing::{MAX_LOAD_FACTOR, OpenAddressingMap};
pub use prime::{is_prime, next_prime, prime_at_least};
pub use utils::{HashTable, TableStats, fill};

/// Number of buckets requested by the `Default` implementations of both maps
pub const DEFAULT_CAPACITY: usize = 11;

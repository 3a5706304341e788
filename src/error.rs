//! Error type for the few fallible entry points of the crate.

use thiserror::Error;

/// Errors returned by map constructors and by [`find_mode`](crate::find_mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// A map was requested with zero buckets.
    #[error("a hash map needs a capacity of at least 1")]
    ZeroCapacity,
    /// The mode of an empty sequence was requested.
    #[error("cannot find the mode of an empty sequence")]
    EmptyInput,
}

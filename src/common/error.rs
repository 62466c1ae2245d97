//! Error types for the B-tree index.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors reported by the index.
///
/// Duplicate inserts are deliberately absent: they are a defined no-op,
/// reported through the `bool` returned by [`BTree::insert`](crate::BTree::insert).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tree was configured with fewer than one key per node.
    #[error("Invalid configuration: max_keys must be >= 1 (got {max_keys})")]
    InvalidConfiguration { max_keys: usize },

    /// The key passed to a delete is not present in the tree.
    ///
    /// Holds the `Debug` rendering of the key so the error stays
    /// independent of the tree's key type.
    #[error("Key {0} not found")]
    KeyNotFound(String),

    /// A structural check failed.
    ///
    /// Only produced by [`BTree::validate`](crate::BTree::validate). Seeing
    /// this indicates a bug in the split or rebalance code.
    #[error("B-tree invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Build a [`Error::KeyNotFound`] from any debuggable key.
    pub fn key_not_found<K: std::fmt::Debug>(key: &K) -> Self {
        Error::KeyNotFound(format!("{:?}", key))
    }
}

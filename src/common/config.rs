//! Configuration for the B-tree index.

use tracing::warn;

use crate::common::{Error, Result};

/// Default maximum number of entries per node.
///
/// Two entries per node gives a 2-3 tree shaped index, which is what the
/// interactive shell uses when no `--max-keys` is passed.
pub const DEFAULT_MAX_KEYS: usize = 2;

/// Smallest accepted `max_keys`.
///
/// With one entry per node the tree degenerates into a balanced binary tree.
pub const MIN_MAX_KEYS: usize = 1;

/// Per-tree node sizing.
///
/// `max_keys` is fixed for the lifetime of a tree; every node can hold at
/// most `max_keys` entries and `max_keys + 1` children.
///
/// # Example
/// ```
/// use btree_index::BTreeConfig;
///
/// let config = BTreeConfig::new(4);
/// assert_eq!(config.branching_factor(), 5);
/// assert_eq!(config.min_keys(), 2);
///
/// // Out-of-range values are clamped, not rejected.
/// assert_eq!(BTreeConfig::new(0).max_keys(), 1);
/// assert!(BTreeConfig::validated(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BTreeConfig {
    max_keys: usize,
}

impl BTreeConfig {
    /// Create a config, clamping `max_keys` up to [`MIN_MAX_KEYS`].
    pub fn new(max_keys: usize) -> Self {
        if max_keys < MIN_MAX_KEYS {
            warn!(
                requested = max_keys,
                clamped_to = MIN_MAX_KEYS,
                "btree.config.clamped"
            );
        }
        Self {
            max_keys: max_keys.max(MIN_MAX_KEYS),
        }
    }

    /// Create a config, rejecting out-of-range values.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` if `max_keys` is below [`MIN_MAX_KEYS`]
    pub fn validated(max_keys: usize) -> Result<Self> {
        if max_keys < MIN_MAX_KEYS {
            return Err(Error::InvalidConfiguration { max_keys });
        }
        Ok(Self { max_keys })
    }

    /// Maximum entries per node.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.max_keys
    }

    /// Maximum children per node (`max_keys + 1`).
    #[inline]
    pub fn branching_factor(&self) -> usize {
        self.max_keys + 1
    }

    /// Occupancy below which a non-root node is rebalanced.
    ///
    /// Integer division: exactly half for even `max_keys`, floor for odd.
    /// This is also the size of the left half produced by a split, so freshly
    /// split nodes are never deficient.
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.max_keys / 2
    }
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            max_keys: DEFAULT_MAX_KEYS,
        }
    }
}

//! Structural statistics for a B-tree.

use std::fmt;

/// Counters for the structural events a tree has gone through.
///
/// Every counter tracks a change of shape, not a lookup: searches and
/// duplicate inserts leave the statistics untouched. Tests use these to check
/// *which* rebalancing move a delete performed, since different moves can
/// leave the same key set behind.
///
/// # Example
/// ```
/// use btree_index::BTree;
///
/// let mut tree = BTree::new(2);
/// for key in [10, 20, 5] {
///     tree.insert(key, "");
/// }
///
/// let stats = tree.stats();
/// assert_eq!(stats.splits, 1);
/// assert_eq!(stats.root_splits, 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BTreeStats {
    /// Number of node splits, including splits of the root.
    pub splits: u64,

    /// Number of times the tree grew a new root level.
    pub root_splits: u64,

    /// Number of entries rotated in from a left sibling.
    pub borrows_left: u64,

    /// Number of entries rotated in from a right sibling.
    pub borrows_right: u64,

    /// Number of sibling merges.
    pub merges: u64,

    /// Number of times an empty root was released.
    pub root_collapses: u64,
}

impl BTreeStats {
    /// Total borrow rotations in either direction.
    pub fn borrows(&self) -> u64 {
        self.borrows_left + self.borrows_right
    }
}

impl fmt::Display for BTreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {} (root: {}), borrows: {} (left: {}, right: {}), merges: {}, collapses: {} }}",
            self.splits,
            self.root_splits,
            self.borrows(),
            self.borrows_left,
            self.borrows_right,
            self.merges,
            self.root_collapses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default_is_zero() {
        let stats = BTreeStats::default();
        assert_eq!(stats.splits, 0);
        assert_eq!(stats.merges, 0);
        assert_eq!(stats.borrows(), 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = BTreeStats {
            splits: 4,
            root_splits: 2,
            borrows_left: 1,
            borrows_right: 2,
            merges: 3,
            root_collapses: 1,
        };

        let display = format!("{}", stats);
        assert!(display.contains("splits: 4 (root: 2)"));
        assert!(display.contains("borrows: 3 (left: 1, right: 2)"));
        assert!(display.contains("merges: 3"));
        assert!(display.contains("collapses: 1"));
    }
}

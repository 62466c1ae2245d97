//! The [`BTree`] handle: configuration, root ownership and the public API.

use std::fmt;

use tracing::debug;

use super::node::{Insertion, Node, Split};
use super::stats::BTreeStats;
use crate::common::{BTreeConfig, Error, Result};

/// An in-memory ordered key-value index.
///
/// # Structure
/// ```text
///                      ┌───────────────┐
///            root ───▶ │   [10]        │            max_keys = 2
///                      └───┬───────┬───┘
///                ┌─────────┘       └─────────┐
///          ┌─────▼─────┐               ┌─────▼─────┐
///          │   [6]     │               │   [20]    │
///          └─┬───────┬─┘               └─┬───────┬─┘
///        ┌───▼─┐  ┌──▼──┐           ┌────▼────┐ ┌▼───┐
///        │ [5] │  │ [7] │           │ [12,17] │ │[30]│   ◀─ leaves, equal depth
///        └─────┘  └─────┘           └─────────┘ └────┘
/// ```
///
/// Every node holds at most `max_keys` entries; every non-root node holds at
/// least `max_keys / 2`. Inserting a present key is a no-op: the first value
/// written for a key wins.
///
/// # Thread Safety
/// The tree does no internal locking. It is `Send`/`Sync` whenever `K` and `V`
/// are, so wrap it in a lock if several threads need to mutate it.
///
/// # Example
/// ```
/// use btree_index::BTree;
///
/// let mut tree = BTree::new(2);
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key, format!("v{}", key));
/// }
///
/// assert_eq!(tree.search(&6).map(String::as_str), Some("v6"));
/// assert_eq!(tree.height(), 3);
///
/// assert_eq!(tree.delete(&20).unwrap(), "v20");
/// assert!(tree.search(&20).is_none());
/// assert!(tree.delete(&20).is_err());
/// ```
pub struct BTree<K, V> {
    /// Node sizing, fixed at construction.
    config: BTreeConfig,

    /// Root node, `None` while the tree is empty.
    pub(crate) root: Option<Box<Node<K, V>>>,

    /// Number of entries stored.
    len: usize,

    /// Structural event counters.
    stats: BTreeStats,
}

impl<K, V> BTree<K, V> {
    /// Create an empty tree holding at most `max_keys` entries per node.
    ///
    /// A `max_keys` of 0 is clamped to 1. Use
    /// [`BTreeConfig::validated`] with [`BTree::with_config`] to reject it
    /// instead.
    pub fn new(max_keys: usize) -> Self {
        Self::with_config(BTreeConfig::new(max_keys))
    }

    /// Create an empty tree from an explicit configuration.
    pub fn with_config(config: BTreeConfig) -> Self {
        debug!(max_keys = config.max_keys(), "btree.create");
        Self {
            config,
            root: None,
            len: 0,
            stats: BTreeStats::default(),
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The configuration this tree was built with.
    #[inline]
    pub fn config(&self) -> BTreeConfig {
        self.config
    }

    /// Maximum entries per node.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.config.max_keys()
    }

    /// Occupancy below which a non-root node gets rebalanced.
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.config.min_keys()
    }

    /// Number of entries in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries (the root is absent).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            height += 1;
            node = current.children.first();
        }
        height
    }

    /// Snapshot of the structural counters.
    pub fn stats(&self) -> BTreeStats {
        self.stats
    }

    /// Zero the structural counters.
    pub fn reset_stats(&mut self) {
        self.stats = BTreeStats::default();
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            collect_keys(root, &mut keys);
        }
        keys
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Release every node, leaving an empty tree with the same configuration.
    ///
    /// Dropping the tree does the same; statistics are kept.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            debug!(entries = self.len, "btree.clear");
            drop(root);
        }
        self.len = 0;
    }

    /// Release an empty root, repeatedly if its only child is empty as well.
    fn collapse_root(&mut self) {
        while let Some(mut root) = self.root.take() {
            if !root.entries.is_empty() {
                self.root = Some(root);
                return;
            }
            self.stats.root_collapses += 1;
            self.root = root.children.pop().map(Box::new);
            debug!(height = self.height(), "btree.delete.root_collapse");
        }
    }
}

impl<K: Ord, V> BTree<K, V> {
    /// Look up the value stored for `key`.
    pub fn search(&self, key: &K) -> Option<&V> {
        self.root.as_deref()?.search(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Insert `key` with `value`.
    ///
    /// Returns `false`, leaving the tree untouched, if the key is already
    /// present. When the root splits a new root is created above the two
    /// halves and the tree grows by one level.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let max_keys = self.config.max_keys();

        let Some(mut root) = self.root.take() else {
            self.root = Some(Box::new(Node::with_entry(max_keys, key, value)));
            self.len = 1;
            return true;
        };

        let (root, inserted, grew) = match root.insert(key, value, max_keys, &mut self.stats) {
            Insertion::Duplicate => (root, false, false),
            Insertion::Absorbed => (root, true, false),
            Insertion::Split(Split { median, right }) => {
                self.stats.root_splits += 1;
                let grown = Box::new(Node::new_root(max_keys, median, *root, right));
                (grown, true, true)
            }
        };
        self.root = Some(root);

        if grew {
            debug!(height = self.height(), "btree.insert.root_split");
        }
        if inserted {
            self.len += 1;
        }
        inserted
    }
}

impl<K: Ord + fmt::Debug, V> BTree<K, V> {
    /// Remove `key` and return its value.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if the key is not present (the tree is unchanged)
    pub fn delete(&mut self, key: &K) -> Result<V> {
        let min_keys = self.config.min_keys();
        let removed = match self.root.as_mut() {
            Some(root) => root.remove(key, min_keys, &mut self.stats),
            None => None,
        };

        let Some(value) = removed else {
            return Err(Error::key_not_found(key));
        };

        self.len -= 1;
        self.collapse_root();
        Ok(value)
    }
}

impl<K, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::with_config(BTreeConfig::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("max_keys", &self.config.max_keys())
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

fn collect_keys<'a, K, V>(node: &'a Node<K, V>, out: &mut Vec<&'a K>) {
    for (idx, (key, _)) in node.entries.iter().enumerate() {
        if let Some(child) = node.children.get(idx) {
            collect_keys(child, out);
        }
        out.push(key);
    }
    if let Some(last) = node.children.get(node.entries.len()) {
        collect_keys(last, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(max_keys: usize, keys: &[i32]) -> BTree<i32, String> {
        let mut tree = BTree::new(max_keys);
        for &key in keys {
            tree.insert(key, key.to_string());
        }
        tree
    }

    #[test]
    fn test_empty_tree() {
        let tree: BTree<i32, String> = BTree::new(3);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.search(&1).is_none());
        assert!(tree.keys().is_empty());
    }

    #[test]
    fn test_new_clamps_max_keys() {
        let tree: BTree<i32, ()> = BTree::new(0);
        assert_eq!(tree.max_keys(), 1);
        assert_eq!(tree.min_keys(), 0);
    }

    #[test]
    fn test_default_uses_two_keys_per_node() {
        let tree: BTree<i32, ()> = BTree::default();
        assert_eq!(tree.max_keys(), 2);
    }

    #[test]
    fn test_root_split_grows_height() {
        let tree = tree_with(2, &[10, 20, 5]);

        assert_eq!(tree.height(), 2);
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.entries[0].0, 10);
        assert_eq!(root.children.len(), 2);
        assert_eq!(tree.stats().root_splits, 1);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut tree = tree_with(2, &[1, 2, 3]);
        let before = tree.stats();

        assert!(!tree.insert(2, "other".to_string()));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.search(&2).map(String::as_str), Some("2"));
        assert_eq!(tree.stats(), before);
    }

    #[test]
    fn test_keys_in_order() {
        let tree = tree_with(3, &[50, 10, 40, 20, 30, 60, 70, 5]);
        let keys: Vec<i32> = tree.keys().into_iter().copied().collect();
        assert_eq!(keys, vec![5, 10, 20, 30, 40, 50, 60, 70]);
    }

    #[test]
    fn test_delete_missing_key() {
        let mut tree = tree_with(2, &[1, 2, 3]);
        assert_eq!(tree.delete(&9), Err(Error::key_not_found(&9)));
        assert_eq!(tree.len(), 3);

        let mut empty: BTree<i32, String> = BTree::new(2);
        assert!(empty.delete(&1).is_err());
    }

    #[test]
    fn test_delete_only_key_empties_tree() {
        let mut tree = tree_with(4, &[7]);

        assert_eq!(tree.delete(&7).unwrap(), "7");
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.stats().root_collapses, 1);

        assert!(tree.insert(8, "8".to_string()));
        assert_eq!(tree.search(&8).map(String::as_str), Some("8"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut tree = tree_with(2, &[1, 2, 3, 4, 5, 6]);
        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.search(&3).is_none());
        assert_eq!(tree.max_keys(), 2);
    }
}

//! Node representation plus the search and insert/split paths.
//!
//! A [`Node`] is either a leaf (no children) or an internal node with exactly
//! `entries.len() + 1` children. Child `i` covers the keys strictly between
//! `entries[i - 1]` and `entries[i]`.
//!
//! # Split layout
//! A node that overflows holds `max_keys + 1` entries. With
//! `mid = max_keys / 2`:
//! ```text
//!   entries:  [ 0 .. mid ) [ mid ] ( mid .. max_keys ]
//!               stay left   up      move to new right sibling
//!   children: [ 0 ..= mid ]         ( mid ..= max_keys + 1 )
//! ```

use tracing::trace;

use super::stats::BTreeStats;

/// A single B-tree node.
///
/// Entries and children are plain vectors sized for one entry of transient
/// overflow, so a split never reallocates.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    /// Sorted, unique `(key, value)` pairs.
    pub(crate) entries: Vec<(K, V)>,

    /// Owned children; empty for a leaf.
    pub(crate) children: Vec<Node<K, V>>,
}

/// The result of splitting a node: the promoted entry and the new right
/// sibling. The node that was split keeps the left half in place.
pub(crate) struct Split<K, V> {
    pub(crate) median: (K, V),
    pub(crate) right: Node<K, V>,
}

/// What an insert did to the subtree it descended into.
pub(crate) enum Insertion<K, V> {
    /// Key already present; nothing changed.
    Duplicate,
    /// Entry placed without pushing anything up.
    Absorbed,
    /// The subtree root split; the caller must absorb the promotion.
    Split(Split<K, V>),
}

impl<K, V> Node<K, V> {
    /// Create a node from already partitioned entries and children.
    pub(crate) fn from_parts(
        max_keys: usize,
        mut entries: Vec<(K, V)>,
        mut children: Vec<Node<K, V>>,
    ) -> Self {
        entries.reserve_exact((max_keys + 1).saturating_sub(entries.len()));
        if !children.is_empty() {
            children.reserve_exact((max_keys + 2).saturating_sub(children.len()));
        }
        Self { entries, children }
    }

    /// Create a leaf holding a single entry.
    pub(crate) fn with_entry(max_keys: usize, key: K, value: V) -> Self {
        Self::from_parts(max_keys, vec![(key, value)], Vec::new())
    }

    /// Create a root one level above `left` and `right`.
    pub(crate) fn new_root(
        max_keys: usize,
        median: (K, V),
        left: Node<K, V>,
        right: Node<K, V>,
    ) -> Self {
        Self::from_parts(max_keys, vec![median], vec![left, right])
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Split an overflowing node in place.
    ///
    /// `self` keeps the `max_keys / 2` smallest entries (and the children
    /// around them); everything right of the median moves to the returned
    /// sibling.
    fn split(&mut self, max_keys: usize, stats: &mut BTreeStats) -> Split<K, V> {
        debug_assert_eq!(self.entries.len(), max_keys + 1);
        let mid = max_keys / 2;

        let right_entries = self.entries.split_off(mid + 1);
        let median = self.entries.remove(mid);
        let right_children = if self.is_leaf() {
            Vec::new()
        } else {
            self.children.split_off(mid + 1)
        };

        stats.splits += 1;
        trace!(
            left = self.entries.len(),
            right = right_entries.len(),
            leaf = right_children.is_empty(),
            "btree.insert.split"
        );

        Split {
            median,
            right: Node::from_parts(max_keys, right_entries, right_children),
        }
    }
}

impl<K: Ord, V> Node<K, V> {
    /// Locate `key` within this node.
    ///
    /// `Ok(i)` when `entries[i]` holds the key, `Err(i)` with the index of the
    /// first larger entry otherwise (which is also the child covering the gap).
    #[inline]
    pub(crate) fn position(&self, key: &K) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.cmp(key))
    }

    /// Look up `key` in the subtree rooted at this node.
    pub(crate) fn search(&self, key: &K) -> Option<&V> {
        let mut node = self;
        loop {
            match node.position(key) {
                Ok(idx) => return Some(&node.entries[idx].1),
                Err(_) if node.is_leaf() => return None,
                Err(idx) => node = &node.children[idx],
            }
        }
    }

    /// Insert into the subtree rooted at this node.
    ///
    /// The entry lands in a leaf. Any split below is absorbed here: the
    /// promoted entry takes the child's slot and the new sibling is grafted
    /// right after the child that split. If that overflows this node in turn,
    /// it splits too and the promotion is handed to the caller.
    pub(crate) fn insert(
        &mut self,
        key: K,
        value: V,
        max_keys: usize,
        stats: &mut BTreeStats,
    ) -> Insertion<K, V> {
        let idx = match self.position(&key) {
            Ok(_) => return Insertion::Duplicate,
            Err(idx) => idx,
        };

        if self.is_leaf() {
            self.entries.insert(idx, (key, value));
        } else {
            match self.children[idx].insert(key, value, max_keys, stats) {
                Insertion::Split(Split { median, right }) => {
                    self.entries.insert(idx, median);
                    self.children.insert(idx + 1, right);
                }
                other => return other,
            }
        }

        if self.entries.len() > max_keys {
            Insertion::Split(self.split(max_keys, stats))
        } else {
            Insertion::Absorbed
        }
    }
}

//! Delete path: entry removal, predecessor extraction and rebalancing.
//!
//! Removal always takes an entry out of a leaf. When the key lives in an
//! internal node, its slot is refilled with the in-order predecessor pulled
//! from the rightmost leaf of the child on its left.
//!
//! Rebalancing runs on the way back up the recursion: after each level
//! returns, its parent inspects the child it descended into and repairs it
//! if it fell below `min_keys`. The repair is tried in a fixed order:
//!
//! 1. borrow from the right sibling (if it holds more than `min_keys`)
//! 2. borrow from the left sibling (if it holds more than `min_keys`)
//! 3. merge with a sibling, pulling the separator down
//!
//! A merge removes an entry from the parent, so the parent may in turn be
//! deficient; its own parent catches that one level up.

use std::mem;

use tracing::trace;

use super::node::Node;
use super::stats::BTreeStats;

impl<K: Ord, V> Node<K, V> {
    /// Remove `key` from the subtree rooted at this node.
    ///
    /// Returns the removed value, or `None` if the key is absent. Every child
    /// on the path is rebalanced; this node itself is left for the caller to
    /// check (the root is allowed to underflow until the tree collapses it).
    pub(crate) fn remove(&mut self, key: &K, min_keys: usize, stats: &mut BTreeStats) -> Option<V> {
        match self.position(key) {
            Ok(idx) if self.is_leaf() => Some(self.entries.remove(idx).1),
            Ok(idx) => {
                let value = match self.children[idx].pop_last(min_keys, stats) {
                    Some(predecessor) => mem::replace(&mut self.entries[idx], predecessor).1,
                    None => {
                        // Left subtree holds no entries at all (only possible
                        // when min_keys is 0): drop it together with the key.
                        self.children.remove(idx);
                        self.entries.remove(idx).1
                    }
                };
                self.rebalance_child(idx, min_keys, stats);
                Some(value)
            }
            Err(_) if self.is_leaf() => None,
            Err(idx) => {
                let value = self.children[idx].remove(key, min_keys, stats)?;
                self.rebalance_child(idx, min_keys, stats);
                Some(value)
            }
        }
    }

    /// Remove and return the largest entry of this subtree.
    ///
    /// Walks the rightmost path down to a leaf, rebalancing on the way back.
    pub(crate) fn pop_last(&mut self, min_keys: usize, stats: &mut BTreeStats) -> Option<(K, V)> {
        if self.is_leaf() {
            return self.entries.pop();
        }

        let last = self.children.len() - 1;
        match self.children[last].pop_last(min_keys, stats) {
            Some(entry) => {
                self.rebalance_child(last, min_keys, stats);
                Some(entry)
            }
            None => {
                // Rightmost subtree is empty, so our own last entry is the
                // maximum. It leaves together with that subtree.
                let entry = self.entries.pop()?;
                self.children.pop();
                Some(entry)
            }
        }
    }
}

impl<K, V> Node<K, V> {
    /// Repair child `idx` if it holds fewer than `min_keys` entries.
    pub(crate) fn rebalance_child(&mut self, idx: usize, min_keys: usize, stats: &mut BTreeStats) {
        if idx >= self.children.len() || self.children[idx].len() >= min_keys {
            return;
        }

        let has_right = idx + 1 < self.children.len();
        let has_left = idx > 0;

        if has_right && self.children[idx + 1].len() > min_keys {
            self.borrow_from_right(idx);
            stats.borrows_right += 1;
        } else if has_left && self.children[idx - 1].len() > min_keys {
            self.borrow_from_left(idx);
            stats.borrows_left += 1;
        } else if has_left || has_right {
            let left = if has_left { idx - 1 } else { idx };
            self.merge_children(left);
            stats.merges += 1;
        }
    }

    /// Rotate one entry from `children[idx + 1]` through the separator into
    /// `children[idx]`.
    fn borrow_from_right(&mut self, idx: usize) {
        let (head, tail) = self.children.split_at_mut(idx + 1);
        let child = &mut head[idx];
        let right = &mut tail[0];

        let first = right.entries.remove(0);
        let separator = mem::replace(&mut self.entries[idx], first);
        child.entries.push(separator);

        if !right.is_leaf() {
            child.children.push(right.children.remove(0));
        }

        trace!(
            idx,
            child = child.len(),
            sibling = right.len(),
            "btree.delete.borrow_right"
        );
    }

    /// Rotate one entry from `children[idx - 1]` through the separator into
    /// `children[idx]`.
    fn borrow_from_left(&mut self, idx: usize) {
        let (head, tail) = self.children.split_at_mut(idx);
        let left = &mut head[idx - 1];
        let child = &mut tail[0];

        let last = left.entries.remove(left.len() - 1);
        let separator = mem::replace(&mut self.entries[idx - 1], last);
        child.entries.insert(0, separator);

        if let Some(grandchild) = left.children.pop() {
            child.children.insert(0, grandchild);
        }

        trace!(
            idx,
            child = child.len(),
            sibling = left.len(),
            "btree.delete.borrow_left"
        );
    }

    /// Merge `children[left + 1]` into `children[left]`.
    ///
    /// The separator between them moves down to the end of the left node,
    /// followed by every entry and child of the right node. The right node is
    /// released and both its slot and the separator leave this node.
    fn merge_children(&mut self, left: usize) {
        let right = self.children.remove(left + 1);
        let separator = self.entries.remove(left);
        let Node {
            entries: mut right_entries,
            children: mut right_children,
        } = right;

        let target = &mut self.children[left];
        target.entries.push(separator);
        target.entries.append(&mut right_entries);
        target.children.append(&mut right_children);

        trace!(
            idx = left,
            merged = target.len(),
            parent = self.entries.len(),
            "btree.delete.merge"
        );
    }
}

//! Structural invariant checks.

use std::fmt;

use super::node::Node;
use super::tree::BTree;
use crate::common::{Error, Result};

/// Walk state shared across the recursive check.
struct Checker {
    max_keys: usize,
    min_keys: usize,
    leaf_depth: Option<usize>,
    entries: usize,
}

impl<K: Ord + fmt::Debug, V> BTree<K, V> {
    /// Check every structural invariant of the tree.
    ///
    /// Verifies that keys are strictly ascending within each node and fall
    /// inside the range their parent assigns, that node occupancy is within
    /// bounds (root: `1..=max_keys`, others: `min_keys..=max_keys`), that
    /// internal nodes have one more child than entries, that every leaf sits
    /// at the same depth, and that the cached length matches.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first problem found
    pub fn validate(&self) -> Result<()> {
        let Some(root) = self.root.as_deref() else {
            return match self.len() {
                0 => Ok(()),
                len => Err(violation(format!("empty tree reports len {}", len))),
            };
        };

        if root.entries.is_empty() {
            return Err(violation("root holds no entries".to_string()));
        }

        let mut checker = Checker {
            max_keys: self.max_keys(),
            min_keys: self.min_keys(),
            leaf_depth: None,
            entries: 0,
        };
        checker.check(root, 0, None, None)?;

        if checker.entries != self.len() {
            return Err(violation(format!(
                "counted {} entries but len is {}",
                checker.entries,
                self.len()
            )));
        }
        Ok(())
    }
}

impl Checker {
    fn check<K: Ord + fmt::Debug, V>(
        &mut self,
        node: &Node<K, V>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<()> {
        let len = node.entries.len();
        if len > self.max_keys {
            return Err(violation(format!(
                "node at depth {} holds {} entries (max {})",
                depth, len, self.max_keys
            )));
        }
        if depth > 0 && len < self.min_keys {
            return Err(violation(format!(
                "node at depth {} holds {} entries (min {})",
                depth, len, self.min_keys
            )));
        }

        for pair in node.entries.windows(2) {
            if pair[0].0 >= pair[1].0 {
                return Err(violation(format!(
                    "keys {:?} and {:?} out of order at depth {}",
                    pair[0].0, pair[1].0, depth
                )));
            }
        }
        if let (Some(low), Some((first, _))) = (lower, node.entries.first()) {
            if first <= low {
                return Err(violation(format!(
                    "key {:?} not above separator {:?}",
                    first, low
                )));
            }
        }
        if let (Some(high), Some((last, _))) = (upper, node.entries.last()) {
            if last >= high {
                return Err(violation(format!(
                    "key {:?} not below separator {:?}",
                    last, high
                )));
            }
        }
        self.entries += len;

        if node.is_leaf() {
            return match self.leaf_depth {
                None => {
                    self.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(violation(format!(
                    "leaf at depth {} but earlier leaves at depth {}",
                    depth, expected
                ))),
            };
        }

        if node.children.len() != len + 1 {
            return Err(violation(format!(
                "internal node at depth {} has {} entries and {} children",
                depth,
                len,
                node.children.len()
            )));
        }

        for (idx, child) in node.children.iter().enumerate() {
            let low = if idx == 0 {
                lower
            } else {
                Some(&node.entries[idx - 1].0)
            };
            let high = node.entries.get(idx).map(|(k, _)| k).or(upper);
            self.check(child, depth + 1, low, high)?;
        }
        Ok(())
    }
}

fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}

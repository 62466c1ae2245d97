//! Read-only level-order views of a tree, for debugging and tests.

use std::fmt;

use super::node::Node;
use super::tree::BTree;

/// A copy of one node's keys, as seen by [`BTree::dump`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot<K> {
    /// Keys held by the node, ascending.
    pub keys: Vec<K>,

    /// Whether the node has no children.
    pub is_leaf: bool,
}

impl<K, V> BTree<K, V> {
    /// Nodes grouped by depth, left to right within each level.
    fn levels(&self) -> Vec<Vec<&Node<K, V>>> {
        let mut levels = Vec::new();
        let mut current: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();

        while !current.is_empty() {
            let next = current
                .iter()
                .flat_map(|node| node.children.iter())
                .collect();
            levels.push(current);
            current = next;
        }
        levels
    }

    /// Snapshot every node, one inner `Vec` per depth starting at the root.
    ///
    /// # Example
    /// ```
    /// use btree_index::BTree;
    ///
    /// let mut tree = BTree::new(2);
    /// for key in [10, 20, 5] {
    ///     tree.insert(key, ());
    /// }
    ///
    /// let levels = tree.dump();
    /// assert_eq!(levels.len(), 2);
    /// assert_eq!(levels[0][0].keys, vec![10]);
    /// assert_eq!(levels[1][0].keys, vec![5]);
    /// assert_eq!(levels[1][1].keys, vec![20]);
    /// ```
    pub fn dump(&self) -> Vec<Vec<NodeSnapshot<K>>>
    where
        K: Clone,
    {
        self.levels()
            .into_iter()
            .map(|level| {
                level
                    .into_iter()
                    .map(|node| NodeSnapshot {
                        keys: node.entries.iter().map(|(k, _)| k.clone()).collect(),
                        is_leaf: node.is_leaf(),
                    })
                    .collect()
            })
            .collect()
    }
}

/// One line per depth, each node as `{ [key,value] ... }`.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for BTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in self.levels() {
            for node in level {
                write!(f, "{{ ")?;
                for (key, value) in &node.entries {
                    write!(f, "[{},{}] ", key, value)?;
                }
                write!(f, "}} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_empty_tree() {
        let tree: BTree<i32, String> = BTree::new(2);
        assert!(tree.dump().is_empty());
        assert_eq!(format!("{}", tree), "");
    }

    #[test]
    fn test_dump_three_levels() {
        let mut tree = BTree::new(2);
        for key in [10, 20, 5, 6, 12, 30, 7, 17] {
            tree.insert(key, ());
        }

        let levels = tree.dump();
        let keys: Vec<Vec<Vec<i32>>> = levels
            .iter()
            .map(|level| level.iter().map(|n| n.keys.clone()).collect())
            .collect();

        assert_eq!(
            keys,
            vec![
                vec![vec![10]],
                vec![vec![6], vec![20]],
                vec![vec![5], vec![7], vec![12, 17], vec![30]],
            ]
        );
        assert!(!levels[1][0].is_leaf);
        assert!(levels[2].iter().all(|n| n.is_leaf));
    }

    #[test]
    fn test_display_format() {
        let mut tree = BTree::new(2);
        tree.insert(10, "a");
        tree.insert(20, "b");
        tree.insert(5, "c");

        assert_eq!(format!("{}", tree), "{ [10,a] } \n{ [5,c] } { [20,b] } \n");
    }
}

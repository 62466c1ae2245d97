//! B-tree index implementation.
//!
//! An in-memory, single-threaded B-tree mapping ordered keys to owned values.
//!
//! # Components
//! - [`BTree`] - The tree handle: search, insert, delete, teardown
//! - [`BTreeStats`] - Counters for splits, borrows, merges and root changes
//! - [`NodeSnapshot`] - Per-node view returned by [`BTree::dump`]
//!
//! # Algorithms
//! - Insert descends to a leaf and splits full nodes on the way back up
//!   (see `node`)
//! - Delete removes from a leaf, refilling internal slots with the in-order
//!   predecessor, then borrows or merges on the way back up (see `rebalance`)

mod dump;
mod node;
mod rebalance;
mod stats;
mod tree;
mod validate;

pub use dump::NodeSnapshot;
pub use stats::BTreeStats;
pub use tree::BTree;

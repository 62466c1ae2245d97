//! Index structures.
//!
//! - [`btree`] - In-memory B-tree

pub mod btree;

pub use btree::{BTree, BTreeStats, NodeSnapshot};

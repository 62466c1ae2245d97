//! btree-index - An in-memory ordered key-value index built on a B-tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          btree-index                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Driver (bin/btree_shell.rs)                   │   │
//! │  │       stdin keys → insert → dump → teardown              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   BTree: search | insert (split) | delete (rebalance)    │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  Node: sorted entries + owned children (Box)     │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │        dump / Display / validate / BTreeStats            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Common (common/)                            │   │
//! │  │            BTreeConfig + Error/Result                    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (config, Error)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use btree_index::BTree;
//!
//! // At most 2 entries (3 children) per node
//! let mut tree = BTree::new(2);
//!
//! tree.insert(10, "ten");
//! tree.insert(20, "twenty");
//! tree.insert(10, "ignored"); // duplicate: first writer wins
//!
//! assert_eq!(tree.search(&10), Some(&"ten"));
//! assert_eq!(tree.delete(&20), Ok("twenty"));
//! assert!(tree.delete(&20).is_err());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MAX_KEYS, MIN_MAX_KEYS};
pub use common::{BTreeConfig, Error, Result};

pub use index::{BTree, BTreeStats, NodeSnapshot};

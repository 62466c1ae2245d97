//! Common types and utilities shared across the index.
//!
//! This module contains:
//! - Configuration constants and [`BTreeConfig`]
//! - Error types

pub mod config;
pub mod error;

pub use config::BTreeConfig;
pub use error::{Error, Result};

//! Core types for hashmemo.
//!
//! This crate provides the data model shared by the inventory engine and
//! any presentation layer: entries, digest outcomes, the inventory table
//! that owns them, and configuration.

mod algorithm;
mod config;
mod entry;
mod error;
mod table;

pub use algorithm::DigestAlgorithm;
pub use config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MEMO_PLACEHOLDER, InventoryConfig, InventoryConfigBuilder,
};
pub use entry::{ContentDigest, DigestOutcome, Entry, EntryId, EntryKind};
pub use error::{DigestError, InventoryError, TableError};
pub use table::{InventoryStats, InventoryTable, SortKey, SortOrder};

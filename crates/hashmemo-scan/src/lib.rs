//! Directory inventory and digest engine for hashmemo.
//!
//! This crate lists the immediate children of one directory and computes a
//! content digest for each of them, producing an [`InventoryTable`].
//!
//! # Overview
//!
//! - **Listing** via jwalk, restricted to depth 1
//! - **Streaming digests** with SHA-256, SHA3-256 or BLAKE3 behind the
//!   [`ContentHasher`] trait
//! - **Progress updates** via broadcast channels
//! - **Per-entry failures** recorded on the entry instead of aborting
//!
//! # Example
//!
//! ```rust,no_run
//! use hashmemo_scan::{DirectoryInventory, InventoryConfig};
//!
//! let config = InventoryConfig::new(".");
//! let mut table = DirectoryInventory::new().build(&config).unwrap();
//!
//! if let Some(id) = table.find("Cargo.toml") {
//!     table.set_memo(id, "workspace manifest").unwrap();
//! }
//!
//! for entry in table.iter() {
//!     println!("{}  {}", entry.digest.display_text(), entry.name);
//! }
//! ```
//!
//! # Single files
//!
//! ```rust,no_run
//! use std::path::Path;
//! use hashmemo_scan::{DigestAlgorithm, DigestComputer};
//!
//! let computer = DigestComputer::new(DigestAlgorithm::Sha3_256);
//! println!("{}", computer.digest_hex(Path::new("README.md")));
//! ```

mod digest;
mod hasher;
mod inventory;
mod progress;

pub use digest::{DigestComputer, Digested};
pub use hasher::{ContentHasher, new_hasher, stream_into};
pub use inventory::{DirectoryInventory, ListedEntry, Listing};
pub use progress::InventoryProgress;

// Re-export core types for convenience
pub use hashmemo_core::{
    ContentDigest, DigestAlgorithm, DigestError, DigestOutcome, Entry, EntryId, EntryKind,
    InventoryConfig, InventoryError, InventoryStats, InventoryTable, SortKey, SortOrder,
    TableError,
};

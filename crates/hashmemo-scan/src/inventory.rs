//! Directory inventory: list immediate children, then digest each one.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use hashmemo_core::{
    DigestOutcome, Entry, EntryId, EntryKind, InventoryConfig, InventoryError, InventoryStats,
    InventoryTable,
};

use crate::digest::DigestComputer;
use crate::progress::InventoryProgress;

/// One child of the root as seen by the listing, before digesting.
#[derive(Debug, Clone)]
pub struct ListedEntry {
    /// Base name for display and lookup. Bytes that are not UTF-8 are
    /// escaped as `\xNN`.
    pub name: CompactString,
    /// Root joined with the raw file name.
    pub path: PathBuf,
    /// Type from the directory listing.
    pub kind: EntryKind,
    /// Byte length for files, 0 otherwise.
    pub size: u64,
}

/// Result of the listing phase.
#[derive(Debug)]
pub struct Listing {
    /// Canonical root that was listed.
    pub root_path: PathBuf,
    /// Children in listing order.
    pub entries: Vec<ListedEntry>,
    started: Instant,
}

impl Listing {
    /// Number of listed children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the root had no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds inventory tables for a single directory.
///
/// A pass lists the root's immediate children and then digests them one at
/// a time on the calling thread.
pub struct DirectoryInventory {
    progress_tx: broadcast::Sender<InventoryProgress>,
}

impl DirectoryInventory {
    /// Create a new inventory builder.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to per-entry progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<InventoryProgress> {
        self.progress_tx.subscribe()
    }

    /// Run a full pass: list, then digest every entry.
    pub fn build(&self, config: &InventoryConfig) -> Result<InventoryTable, InventoryError> {
        let listing = self.list(config)?;
        Ok(self.digest_listing(config, listing))
    }

    /// Rebuild from scratch with the previous table's config, keeping memos
    /// for entries whose names still exist.
    pub fn refresh(&self, previous: &InventoryTable) -> Result<InventoryTable, InventoryError> {
        let mut table = self.build(&previous.config)?;
        let adopted = table.adopt_memos(previous);
        debug!(adopted, "carried memos into refreshed inventory");
        Ok(table)
    }

    /// List the immediate children of the configured root.
    ///
    /// Any failure to read the root aborts the whole listing; there is no
    /// partial result.
    pub fn list(&self, config: &InventoryConfig) -> Result<Listing, InventoryError> {
        let started = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| InventoryError::io(&config.root, e))?;

        if !root_path.is_dir() {
            return Err(InventoryError::NotADirectory { path: root_path });
        }

        // Surface permission errors with their real kind before walking.
        std::fs::read_dir(&root_path).map_err(|e| InventoryError::io(&root_path, e))?;

        let walker = WalkDir::new(&root_path)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .sort(config.sort_by_name)
            .min_depth(1)
            .max_depth(1);

        let mut entries = Vec::new();
        for entry_result in walker {
            let entry = entry_result.map_err(|err| walk_error(&root_path, &err))?;

            let name = display_name(entry.file_name());
            if config.should_skip_hidden(&name) {
                continue;
            }

            let kind = EntryKind::from_file_type(&entry.file_type());
            let size = match kind {
                EntryKind::File => entry.metadata().map(|m| m.len()).unwrap_or(0),
                _ => 0,
            };

            entries.push(ListedEntry {
                path: root_path.join(entry.file_name()),
                name,
                kind,
                size,
            });
        }

        debug!(root = %root_path.display(), count = entries.len(), "listed directory");

        Ok(Listing {
            root_path,
            entries,
            started,
        })
    }

    /// Digest every listed entry in order and assemble the table.
    ///
    /// Digest failures never abort the pass; they are recorded on the entry.
    pub fn digest_listing(&self, config: &InventoryConfig, listing: Listing) -> InventoryTable {
        let computer = DigestComputer::from_config(config);
        let mut stats = InventoryStats::new();
        let mut progress = InventoryProgress::new(listing.entries.len() as u64);
        let mut entries = Vec::with_capacity(listing.entries.len());

        for (index, listed) in listing.entries.into_iter().enumerate() {
            stats.record_kind(listed.kind);

            let outcome = match computer.try_digest(&listed.path) {
                Ok(digested) => {
                    debug!(
                        entry = %listed.name,
                        digest = %digested.digest,
                        bytes = digested.bytes_read,
                        "digested entry"
                    );
                    stats.record_digest(digested.bytes_read);
                    progress.bytes_digested += digested.bytes_read;
                    DigestOutcome::Computed(digested.digest)
                }
                Err(err) => {
                    warn!(entry = %listed.name, error = %err, "digest failed");
                    stats.record_failure();
                    progress.failures += 1;
                    DigestOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            };

            progress.entries_digested += 1;
            progress.current_entry = listed.path;
            progress.elapsed = listing.started.elapsed();
            let _ = self.progress_tx.send(progress.clone());

            entries.push(Entry::new(
                EntryId::new(index),
                listed.name,
                listed.kind,
                listed.size,
                outcome,
            ));
        }

        let duration = listing.started.elapsed();
        info!(
            root = %listing.root_path.display(),
            entries = entries.len(),
            failures = stats.digest_failures,
            algorithm = %config.algorithm,
            elapsed_ms = duration.as_millis() as u64,
            "inventory complete"
        );

        InventoryTable::new(entries, listing.root_path, config.clone(), stats, duration)
    }
}

impl Default for DirectoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

/// Name shown for an entry. Distinct raw names always map to distinct
/// display names.
fn display_name(name: &OsStr) -> CompactString {
    match name.to_str() {
        Some(name) => CompactString::from(name),
        None => CompactString::from(name.as_encoded_bytes().escape_ascii().to_string()),
    }
}

fn walk_error(root_path: &Path, err: &jwalk::Error) -> InventoryError {
    let path = err
        .path()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| root_path.to_path_buf());
    InventoryError::Io {
        path,
        source: std::io::Error::other(err.to_string()),
    }
}

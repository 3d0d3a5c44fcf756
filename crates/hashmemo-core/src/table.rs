//! Inventory table: the single owner of every entry in a pass.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::config::InventoryConfig;
use crate::entry::{Entry, EntryId, EntryKind};
use crate::error::TableError;

/// Summary statistics for an inventory pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Number of regular files.
    pub files: u64,
    /// Number of directories.
    pub directories: u64,
    /// Number of symbolic links.
    pub symlinks: u64,
    /// Number of other entries.
    pub other: u64,
    /// Entries whose digest was computed.
    pub digests_computed: u64,
    /// Entries whose digest failed.
    pub digest_failures: u64,
    /// Total bytes streamed through the hasher.
    pub bytes_digested: u64,
}

impl InventoryStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listed entry.
    pub fn record_kind(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::File => self.files += 1,
            EntryKind::Directory => self.directories += 1,
            EntryKind::Symlink => self.symlinks += 1,
            EntryKind::Other => self.other += 1,
        }
    }

    /// Record a successful digest.
    pub fn record_digest(&mut self, bytes: u64) {
        self.digests_computed += 1;
        self.bytes_digested += bytes;
    }

    /// Record a failed digest.
    pub fn record_failure(&mut self) {
        self.digest_failures += 1;
    }

    /// Total listed entries.
    pub fn total_entries(&self) -> u64 {
        self.files + self.directories + self.symlinks + self.other
    }
}

/// Column a presentation layer can sort by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortKey {
    #[default]
    Name,
    Digest,
    Memo,
    Kind,
    Size,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Point-in-time snapshot of one directory's entries.
///
/// Entries live in one vector and are addressed by [`EntryId`]. Views sort
/// ids, never the entries themselves, so a memo edit is visible to every
/// holder of the id without any copying.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TableRecord")]
pub struct InventoryTable {
    /// Entries in enumeration order; `entries[i].id == EntryId(i)`.
    entries: Vec<Entry>,

    /// Root directory that was listed.
    pub root_path: PathBuf,

    /// When the pass was performed.
    pub captured_at: SystemTime,

    /// How long listing and digesting took.
    pub duration: Duration,

    /// Configuration used for the pass.
    pub config: InventoryConfig,

    /// Summary statistics.
    pub stats: InventoryStats,
}

/// Serialized form of [`InventoryTable`]; ids are renumbered on load.
#[derive(Deserialize)]
struct TableRecord {
    entries: Vec<Entry>,
    root_path: PathBuf,
    captured_at: SystemTime,
    duration: Duration,
    config: InventoryConfig,
    stats: InventoryStats,
}

impl From<TableRecord> for InventoryTable {
    fn from(record: TableRecord) -> Self {
        let mut table = Self::new(
            record.entries,
            record.root_path,
            record.config,
            record.stats,
            record.duration,
        );
        table.captured_at = record.captured_at;
        table
    }
}

impl InventoryTable {
    /// Create a table from entries in enumeration order.
    ///
    /// Ids are reassigned to match positions.
    pub fn new(
        mut entries: Vec<Entry>,
        root_path: PathBuf,
        config: InventoryConfig,
        stats: InventoryStats,
        duration: Duration,
    ) -> Self {
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.id = EntryId::new(index);
        }
        Self {
            entries,
            root_path,
            captured_at: SystemTime::now(),
            duration,
            config,
            stats,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the directory was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by id.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.index())
    }

    /// Iterate entries in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// All ids in enumeration order.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        (0..self.entries.len()).map(EntryId::new)
    }

    /// Find an entry id by name.
    pub fn find(&self, name: &str) -> Option<EntryId> {
        self.entries
            .iter()
            .position(|e| e.name.as_str() == name)
            .map(EntryId::new)
    }

    /// Find an entry id by name, or fail with [`TableError::UnknownName`].
    pub fn require(&self, name: &str) -> Result<EntryId, TableError> {
        self.find(name).ok_or_else(|| TableError::UnknownName {
            name: name.to_string(),
        })
    }

    /// Replace the memo of one entry in place.
    pub fn set_memo(&mut self, id: EntryId, memo: impl Into<String>) -> Result<(), TableError> {
        let entry = self.get_mut(id)?;
        entry.memo = Some(memo.into());
        Ok(())
    }

    /// Reset an entry's memo to "not yet annotated".
    pub fn clear_memo(&mut self, id: EntryId) -> Result<(), TableError> {
        let entry = self.get_mut(id)?;
        entry.memo = None;
        Ok(())
    }

    /// Memo text for display, falling back to the configured placeholder.
    pub fn memo_text(&self, id: EntryId) -> Option<&str> {
        self.get(id)
            .map(|e| e.memo_or(self.config.memo_placeholder.as_str()))
    }

    /// Digest cell text, as copied to a clipboard.
    pub fn digest_text(&self, id: EntryId) -> Option<String> {
        self.get(id).map(|e| e.digest.display_text())
    }

    /// Ids ordered for display. Ties fall back to name, then enumeration order.
    pub fn sorted_ids(&self, key: SortKey, order: SortOrder) -> Vec<EntryId> {
        let mut ids: Vec<EntryId> = self.ids().collect();
        ids.sort_by(|a, b| {
            let (a, b) = (&self.entries[a.index()], &self.entries[b.index()]);
            let primary = self.compare_by(key, a, b);
            let primary = match order {
                SortOrder::Ascending => primary,
                SortOrder::Descending => primary.reverse(),
            };
            primary.then_with(|| a.name.cmp(&b.name))
        });
        ids
    }

    /// Carry memos over from an earlier snapshot, matching entries by name.
    ///
    /// Returns how many memos were adopted.
    pub fn adopt_memos(&mut self, previous: &InventoryTable) -> usize {
        let mut adopted = 0;
        for entry in &mut self.entries {
            let carried = previous
                .entries
                .iter()
                .find(|old| old.name == entry.name)
                .and_then(|old| old.memo.clone());
            if let Some(memo) = carried {
                entry.memo = Some(memo);
                adopted += 1;
            }
        }
        adopted
    }

    fn get_mut(&mut self, id: EntryId) -> Result<&mut Entry, TableError> {
        self.entries
            .get_mut(id.index())
            .ok_or(TableError::NoSuchEntry { id })
    }

    fn compare_by(&self, key: SortKey, a: &Entry, b: &Entry) -> Ordering {
        match key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Digest => a.digest.display_text().cmp(&b.digest.display_text()),
            SortKey::Memo => {
                let placeholder = self.config.memo_placeholder.as_str();
                a.memo_or(placeholder).cmp(b.memo_or(placeholder))
            }
            SortKey::Kind => a.kind.cmp(&b.kind),
            SortKey::Size => a.size.cmp(&b.size),
        }
    }
}

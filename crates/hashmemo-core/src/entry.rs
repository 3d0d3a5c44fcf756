//! Inventory entry types.

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::algorithm::DigestAlgorithm;
use crate::error::DigestError;

/// Position of an entry within its inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub usize);

impl EntryId {
    /// Create a new EntryId from an index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finalized digest of an entry's full content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// Algorithm that produced the bytes.
    pub algorithm: DigestAlgorithm,
    /// Raw digest bytes, serialized as lowercase hex.
    #[serde(with = "hex")]
    pub bytes: Vec<u8>,
}

impl ContentDigest {
    /// Create a new digest from raw bytes.
    pub fn new(algorithm: DigestAlgorithm, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm,
            bytes: bytes.into(),
        }
    }

    /// Get the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Result of digesting one entry.
///
/// A failure keeps the error text so a table cell always has something to
/// show, but stays distinguishable from a real digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DigestOutcome {
    /// Content was read to the end and hashed.
    Computed(ContentDigest),
    /// Opening or reading the entry failed.
    Failed {
        /// Human-readable error description.
        reason: String,
    },
}

impl DigestOutcome {
    /// Check if the digest was computed.
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// The digest, if one was computed.
    pub fn digest(&self) -> Option<&ContentDigest> {
        match self {
            Self::Computed(digest) => Some(digest),
            Self::Failed { .. } => None,
        }
    }

    /// Text for a table cell: the hex digest or the failure reason.
    pub fn display_text(&self) -> String {
        match self {
            Self::Computed(digest) => digest.to_hex(),
            Self::Failed { reason } => reason.clone(),
        }
    }
}

impl From<Result<ContentDigest, DigestError>> for DigestOutcome {
    fn from(result: Result<ContentDigest, DigestError>) -> Self {
        match result {
            Ok(digest) => Self::Computed(digest),
            Err(err) => Self::Failed {
                reason: err.to_string(),
            },
        }
    }
}

/// Type of a listed entry, captured at enumeration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Other file types (sockets, devices, etc.).
    Other,
}

impl EntryKind {
    /// Classify a file type from a directory listing.
    pub fn from_file_type(file_type: &std::fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// One immediate child of the inventory root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Position within the owning table.
    pub id: EntryId,

    /// Base name as returned by the directory listing.
    pub name: CompactString,

    /// Entry type.
    pub kind: EntryKind,

    /// Size in bytes at enumeration time (0 if unknown).
    pub size: u64,

    /// Digest of the full content, computed once.
    pub digest: DigestOutcome,

    /// User annotation; `None` until one is set.
    pub memo: Option<String>,
}

impl Entry {
    /// Create an entry with no memo.
    pub fn new(
        id: EntryId,
        name: impl Into<CompactString>,
        kind: EntryKind,
        size: u64,
        digest: DigestOutcome,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            size,
            digest,
            memo: None,
        }
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Memo text, or the placeholder when none was set.
    pub fn memo_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.memo.as_deref().unwrap_or(placeholder)
    }
}

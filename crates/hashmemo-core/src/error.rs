//! Error types for inventory passes.

use std::path::PathBuf;

use thiserror::Error;

use crate::entry::EntryId;

/// Fatal errors: the inventory pass produces nothing.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Permission denied for the root.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Root path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl InventoryError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Per-entry digest failure. Recorded on the entry, never propagated.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The file could not be opened.
    #[error("open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading failed part way through the stream.
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DigestError {
    /// The underlying I/O error.
    pub fn io_error(&self) -> &std::io::Error {
        match self {
            Self::Open { source, .. } | Self::Read { source, .. } => source,
        }
    }
}

/// Errors from editing the inventory table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// No entry lives at this id.
    #[error("No entry at index {id}")]
    NoSuchEntry { id: EntryId },

    /// No entry has this name.
    #[error("No entry named {name:?}")]
    UnknownName { name: String },
}

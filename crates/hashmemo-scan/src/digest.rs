//! Streaming content digests for single files.

use std::fs::File;
use std::path::Path;

use hashmemo_core::{
    ContentDigest, DEFAULT_CHUNK_SIZE, DigestAlgorithm, DigestError, DigestOutcome, InventoryConfig,
};

use crate::hasher::{ContentHasher, new_hasher, stream_into};

/// A computed digest and how many bytes went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digested {
    /// The finalized digest.
    pub digest: ContentDigest,
    /// Bytes read from the file.
    pub bytes_read: u64,
}

/// Computes content digests with one configured algorithm.
///
/// Every call opens the file, streams it, and closes it again before
/// returning. Nothing is cached.
#[derive(Debug, Clone)]
pub struct DigestComputer {
    algorithm: DigestAlgorithm,
    chunk_size: usize,
}

impl DigestComputer {
    /// Create a computer for the given algorithm.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a computer matching an inventory config.
    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(config.algorithm).with_chunk_size(config.chunk_size)
    }

    /// Set the streaming buffer size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Algorithm in use.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Digest a file, folding any failure into the outcome.
    pub fn digest(&self, path: &Path) -> DigestOutcome {
        DigestOutcome::from(self.try_digest(path).map(|d| d.digest))
    }

    /// Lowercase hex digest of a file, or the error text if it could not be read.
    pub fn digest_hex(&self, path: &Path) -> String {
        self.digest(path).display_text()
    }

    /// Digest a file, reporting failures as errors.
    pub fn try_digest(&self, path: &Path) -> Result<Digested, DigestError> {
        self.try_digest_with(path, new_hasher(self.algorithm))
    }

    /// Digest a file through a caller-supplied hasher.
    pub fn try_digest_with(
        &self,
        path: &Path,
        mut hasher: Box<dyn ContentHasher>,
    ) -> Result<Digested, DigestError> {
        let mut file = File::open(path).map_err(|source| DigestError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let bytes_read =
            stream_into(&mut file, hasher.as_mut(), self.chunk_size).map_err(|source| {
                DigestError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        let algorithm = hasher.algorithm();
        Ok(Digested {
            digest: ContentDigest::new(algorithm, hasher.finalize()),
            bytes_read,
        })
    }
}

impl Default for DigestComputer {
    fn default() -> Self {
        Self::new(DigestAlgorithm::default())
    }
}

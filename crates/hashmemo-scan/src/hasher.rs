//! Incremental hash capability and its implementations.

use std::io::{self, Read};

use hashmemo_core::DigestAlgorithm;
use sha2::Digest;

/// An incremental hash accumulator.
///
/// Everything downstream of the hasher depends only on this trait, so any
/// algorithm with an `update`/`finalize` shape can be plugged in.
pub trait ContentHasher: Send {
    /// Algorithm this hasher implements.
    fn algorithm(&self) -> DigestAlgorithm;

    /// Feed more bytes.
    fn update(&mut self, bytes: &[u8]);

    /// Consume the hasher and return the fixed-length digest.
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

impl ContentHasher for sha2::Sha256 {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Sha256
    }

    fn update(&mut self, bytes: &[u8]) {
        Digest::update(self, bytes);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(*self).to_vec()
    }
}

impl ContentHasher for sha3::Sha3_256 {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Sha3_256
    }

    fn update(&mut self, bytes: &[u8]) {
        Digest::update(self, bytes);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(*self).to_vec()
    }
}

impl ContentHasher for blake3::Hasher {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Blake3
    }

    fn update(&mut self, bytes: &[u8]) {
        blake3::Hasher::update(self, bytes);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        blake3::Hasher::finalize(&self).as_bytes().to_vec()
    }
}

/// Create a fresh hasher for an algorithm.
pub fn new_hasher(algorithm: DigestAlgorithm) -> Box<dyn ContentHasher> {
    match algorithm {
        DigestAlgorithm::Sha256 => Box::new(sha2::Sha256::new()),
        DigestAlgorithm::Sha3_256 => Box::new(sha3::Sha3_256::new()),
        DigestAlgorithm::Blake3 => Box::new(blake3::Hasher::new()),
    }
}

/// Stream a reader through a hasher in `chunk_size` pieces.
///
/// Returns the number of bytes consumed. Memory use is bounded by the chunk
/// size regardless of input length.
pub fn stream_into<R: Read>(
    reader: &mut R,
    hasher: &mut dyn ContentHasher,
    chunk_size: usize,
) -> io::Result<u64> {
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total: u64 = 0;
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => {
                hasher.update(&buf[..n]);
                total += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

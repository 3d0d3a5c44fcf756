//! Supported content digest algorithms.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Cryptographic hash used to fingerprint entry contents.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DigestAlgorithm {
    /// SHA-256 (SHA-2 family).
    #[default]
    Sha256,
    /// SHA3-256 (Keccak sponge).
    #[strum(serialize = "sha3-256")]
    #[serde(rename = "sha3-256")]
    Sha3_256,
    /// BLAKE3 with the default 256-bit output.
    Blake3,
}

impl DigestAlgorithm {
    /// Length of the finalized digest in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha256 | Self::Sha3_256 | Self::Blake3 => 32,
        }
    }

    /// Length of the lowercase hex rendering.
    pub fn hex_len(self) -> usize {
        self.digest_len() * 2
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(DigestAlgorithm::from_str("sha256").unwrap(), DigestAlgorithm::Sha256);
        assert_eq!(DigestAlgorithm::from_str("SHA3-256").unwrap(), DigestAlgorithm::Sha3_256);
        assert_eq!(DigestAlgorithm::from_str("blake3").unwrap(), DigestAlgorithm::Blake3);
        assert!(DigestAlgorithm::from_str("md5").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for algorithm in DigestAlgorithm::iter() {
            let name = algorithm.to_string();
            assert_eq!(DigestAlgorithm::from_str(&name).unwrap(), algorithm);
        }
    }

    #[test]
    fn test_hex_len() {
        assert_eq!(DigestAlgorithm::Sha256.hex_len(), 64);
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha256);
    }
}

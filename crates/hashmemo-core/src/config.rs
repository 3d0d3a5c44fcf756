//! Inventory configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::algorithm::DigestAlgorithm;

/// Default streaming buffer size for digesting.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Placeholder rendered for entries that have no memo yet.
pub const DEFAULT_MEMO_PLACEHOLDER: &str = "none";

/// Configuration for one inventory pass.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct InventoryConfig {
    /// Directory whose immediate children are listed.
    pub root: PathBuf,

    /// Hash used for every entry.
    #[builder(default)]
    #[serde(default)]
    pub algorithm: DigestAlgorithm,

    /// Read buffer size used while streaming file contents.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Include hidden entries (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Order the listing by name instead of platform order.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub sort_by_name: bool,

    /// Text shown in place of a memo that was never set.
    #[builder(default = "DEFAULT_MEMO_PLACEHOLDER.to_string()")]
    #[serde(default = "default_memo_placeholder")]
    pub memo_placeholder: String,
}

fn default_true() -> bool {
    true
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_memo_placeholder() -> String {
    DEFAULT_MEMO_PLACEHOLDER.to_string()
}

impl InventoryConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        if self.chunk_size == Some(0) {
            return Err("Chunk size must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl InventoryConfig {
    /// Create a new inventory config builder.
    pub fn builder() -> InventoryConfigBuilder {
        InventoryConfigBuilder::default()
    }

    /// Create a config with defaults for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            algorithm: DigestAlgorithm::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            include_hidden: true,
            sort_by_name: true,
            memo_placeholder: default_memo_placeholder(),
        }
    }

    /// Same config with a different algorithm.
    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Check if hidden entries should be skipped.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = InventoryConfig::builder()
            .root("/home/user")
            .algorithm(DigestAlgorithm::Sha3_256)
            .chunk_size(4096usize)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.algorithm, DigestAlgorithm::Sha3_256);
        assert_eq!(config.chunk_size, 4096);
        assert!(config.include_hidden);
        assert_eq!(config.memo_placeholder, "none");
    }

    #[test]
    fn test_builder_rejects_missing_or_empty_root() {
        assert!(InventoryConfig::builder().build().is_err());
        assert!(InventoryConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_builder_rejects_zero_chunk() {
        let result = InventoryConfig::builder()
            .root("/tmp")
            .chunk_size(0usize)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_root_is_working_directory() {
        let config = InventoryConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.algorithm, DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_should_skip_hidden() {
        let mut config = InventoryConfig::new("/test");
        assert!(!config.should_skip_hidden(".git"));

        config.include_hidden = false;
        assert!(config.should_skip_hidden(".git"));
        assert!(!config.should_skip_hidden("src"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: InventoryConfig = serde_json::from_str(r#"{"root":"/data"}"#).unwrap();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(config.sort_by_name);
        assert_eq!(config.memo_placeholder, DEFAULT_MEMO_PLACEHOLDER);
    }
}

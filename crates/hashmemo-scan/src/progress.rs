//! Inventory progress reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Progress information during an inventory pass.
#[derive(Debug, Clone)]
pub struct InventoryProgress {
    /// Entries found by the listing.
    pub entries_total: u64,
    /// Entries digested so far (successfully or not).
    pub entries_digested: u64,
    /// Total bytes streamed through the hasher so far.
    pub bytes_digested: u64,
    /// Entry most recently digested.
    pub current_entry: PathBuf,
    /// Number of digest failures so far.
    pub failures: u64,
    /// Time elapsed since the pass started.
    pub elapsed: Duration,
}

impl InventoryProgress {
    /// Create initial progress state for a listing of `entries_total`.
    pub fn new(entries_total: u64) -> Self {
        Self {
            entries_total,
            entries_digested: 0,
            bytes_digested: 0,
            current_entry: PathBuf::new(),
            failures: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Fraction of entries digested, from 0.0 to 1.0.
    pub fn fraction(&self) -> f64 {
        if self.entries_total == 0 {
            1.0
        } else {
            self.entries_digested as f64 / self.entries_total as f64
        }
    }

    /// Calculate digest throughput in bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.bytes_digested as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Check if every listed entry has been digested.
    pub fn is_complete(&self) -> bool {
        self.entries_digested >= self.entries_total
    }
}

impl Default for InventoryProgress {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        let mut progress = InventoryProgress::new(4);
        assert_eq!(progress.fraction(), 0.0);
        progress.entries_digested = 2;
        assert_eq!(progress.fraction(), 0.5);
        assert!(!progress.is_complete());
        progress.entries_digested = 4;
        assert!(progress.is_complete());
    }

    #[test]
    fn test_empty_listing_is_complete() {
        let progress = InventoryProgress::default();
        assert_eq!(progress.fraction(), 1.0);
        assert!(progress.is_complete());
        assert_eq!(progress.bytes_per_second(), 0.0);
    }
}

use hashmemo_core::{
    ContentDigest, DigestAlgorithm, DigestOutcome, Entry, EntryId, EntryKind, InventoryConfig,
    InventoryStats, InventoryTable, SortKey, SortOrder, TableError,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

fn digest_of(byte: u8) -> DigestOutcome {
    DigestOutcome::Computed(ContentDigest::new(DigestAlgorithm::Sha256, [byte; 32]))
}

fn table_of(entries: Vec<Entry>) -> InventoryTable {
    InventoryTable::new(
        entries,
        PathBuf::from("/inventory"),
        InventoryConfig::new("/inventory"),
        InventoryStats::new(),
        Duration::from_millis(3),
    )
}

#[test]
fn test_entry_id_operations() {
    let id1 = EntryId::new(42);
    let id2 = EntryId::new(42);

    assert_eq!(id1, id2);
    assert_eq!(id1.index(), 42);
    assert_eq!(id1.to_string(), "42");
}

#[test]
fn test_content_digest_creation_and_hex() {
    let digest = ContentDigest::new(DigestAlgorithm::Sha3_256, [0xcd; 32]);

    let hex = digest.to_hex();
    assert_eq!(hex.len(), DigestAlgorithm::Sha3_256.hex_len());
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(digest.to_string(), hex);

    // Same bytes under a different algorithm are a different digest
    let other = ContentDigest::new(DigestAlgorithm::Blake3, [0xcd; 32]);
    assert_ne!(digest, other);
}

#[test]
fn test_outcome_display_text_parity() {
    let ok = digest_of(0x01);
    assert!(ok.is_computed());
    assert_eq!(ok.display_text(), "01".repeat(32));

    let failed = DigestOutcome::Failed {
        reason: "open gone: No such file or directory (os error 2)".to_string(),
    };
    assert!(!failed.is_computed());
    assert_eq!(
        failed.display_text(),
        "open gone: No such file or directory (os error 2)"
    );
}

#[test]
fn test_entry_kind_classification() {
    assert!(EntryKind::Directory.is_dir());
    assert!(!EntryKind::File.is_dir());
    assert!(!EntryKind::Other.is_dir());
}

#[test]
fn test_memo_edit_visible_through_every_lookup() {
    let mut table = table_of(vec![
        Entry::new(EntryId::new(0), "a.txt", EntryKind::File, 5, digest_of(0xaa)),
        Entry::new(EntryId::new(1), "b.txt", EntryKind::File, 5, digest_of(0xaa)),
        Entry::new(EntryId::new(2), "sub", EntryKind::Directory, 0, digest_of(0xbb)),
    ]);

    // A view holds ids, not copies
    let view = table.sorted_ids(SortKey::Name, SortOrder::Descending);
    let b = table.find("b.txt").unwrap();

    table.set_memo(b, "second copy").unwrap();

    let from_view = view
        .iter()
        .map(|id| table.get(*id).unwrap())
        .find(|e| e.name.as_str() == "b.txt")
        .unwrap();
    assert_eq!(from_view.memo.as_deref(), Some("second copy"));
    assert_eq!(table.memo_text(b), Some("second copy"));

    // Other entries are untouched
    for name in ["a.txt", "sub"] {
        let id = table.find(name).unwrap();
        assert_eq!(table.memo_text(id), Some("none"));
    }
    assert_eq!(table.get(b).unwrap().digest, digest_of(0xaa));
    assert_eq!(table.get(b).unwrap().kind, EntryKind::File);
}

#[test]
fn test_memo_accepts_any_text() {
    let mut table = table_of(vec![Entry::new(
        EntryId::new(0),
        "a",
        EntryKind::File,
        0,
        digest_of(0),
    )]);
    let id = EntryId::new(0);

    table.set_memo(id, "").unwrap();
    assert_eq!(table.memo_text(id), Some(""));

    table.set_memo(id, "없음 / multi\nline").unwrap();
    assert_eq!(table.memo_text(id), Some("없음 / multi\nline"));
}

#[test]
fn test_require_unknown_name() {
    let table = table_of(Vec::new());
    assert!(table.is_empty());
    assert_eq!(
        table.require("missing"),
        Err(TableError::UnknownName {
            name: "missing".to_string()
        })
    );
}

#[test]
fn test_sort_key_parsing() {
    assert_eq!(SortKey::from_str("digest").unwrap(), SortKey::Digest);
    assert_eq!(SortKey::from_str("Size").unwrap(), SortKey::Size);
    assert_eq!(SortKey::Memo.to_string(), "memo");
    assert!(SortKey::from_str("owner").is_err());
}

#[test]
fn test_inventory_config_builder() {
    let config = InventoryConfig::builder()
        .root("/test/path")
        .algorithm(DigestAlgorithm::Blake3)
        .include_hidden(false)
        .sort_by_name(false)
        .memo_placeholder("없음")
        .build()
        .unwrap();

    assert_eq!(config.root.to_str().unwrap(), "/test/path");
    assert_eq!(config.algorithm, DigestAlgorithm::Blake3);
    assert!(!config.include_hidden);
    assert!(!config.sort_by_name);
    assert_eq!(config.memo_placeholder, "없음");
}

#[test]
fn test_placeholder_flows_into_memo_text() {
    let config = InventoryConfig::builder()
        .root("/x")
        .memo_placeholder("-")
        .build()
        .unwrap();
    let table = InventoryTable::new(
        vec![Entry::new(EntryId::new(0), "f", EntryKind::File, 1, digest_of(1))],
        PathBuf::from("/x"),
        config,
        InventoryStats::new(),
        Duration::ZERO,
    );
    assert_eq!(table.memo_text(EntryId::new(0)), Some("-"));
}

#[test]
fn test_table_serializes_to_json() {
    let table = table_of(vec![Entry::new(
        EntryId::new(0),
        "a.txt",
        EntryKind::File,
        5,
        DigestOutcome::Failed {
            reason: "denied".to_string(),
        },
    )]);

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["entries"][0]["name"], "a.txt");
    assert_eq!(json["entries"][0]["kind"], "file");
    assert_eq!(json["entries"][0]["digest"]["status"], "failed");
    assert_eq!(json["entries"][0]["digest"]["reason"], "denied");
    assert!(json["entries"][0]["memo"].is_null());
}

#[test]
fn test_loaded_table_renumbers_ids() {
    let mut table = table_of(vec![
        Entry::new(EntryId::new(0), "b.txt", EntryKind::File, 2, digest_of(0x02)),
        Entry::new(EntryId::new(1), "a.txt", EntryKind::File, 1, digest_of(0x01)),
    ]);
    table.set_memo(EntryId::new(1), "kept").unwrap();

    let mut json = serde_json::to_value(&table).unwrap();
    json["entries"][0]["id"] = serde_json::json!(7);
    let loaded: InventoryTable = serde_json::from_value(json).unwrap();

    assert_eq!(loaded.captured_at, table.captured_at);
    assert_eq!(loaded.ids().collect::<Vec<_>>(), vec![EntryId::new(0), EntryId::new(1)]);
    for (index, entry) in loaded.iter().enumerate() {
        assert_eq!(entry.id, EntryId::new(index));
    }
    assert_eq!(loaded.find("b.txt"), Some(EntryId::new(0)));

    let ordered = loaded.sorted_ids(SortKey::Name, SortOrder::Ascending);
    assert_eq!(ordered, vec![EntryId::new(1), EntryId::new(0)]);
    assert_eq!(loaded.memo_text(ordered[0]), Some("kept"));
}

use super::*;
use std::time::{Duration, SystemTime};

fn sample_entry() -> CacheEntry {
    CacheEntry::for_text(
        "hersteller,code\nAcme,E01\n",
        "fehlerliste.csv",
        Some("7".to_string()),
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
    )
}

#[test]
fn encoded_entry_starts_with_version_byte() {
    let bytes = sample_entry().encode().unwrap();
    assert_eq!(bytes[0], v1::CacheEntry::VERSION);
    assert_eq!(CacheEntry::decode(&bytes).unwrap(), sample_entry());
}

#[test]
fn decode_rejects_unknown_version() {
    let mut bytes = sample_entry().encode().unwrap();
    bytes[0] = 99;
    assert!(matches!(
        CacheEntry::decode(&bytes),
        Err(EntryCodecError::UnsupportedVersion(99))
    ));
}

#[test]
fn decode_rejects_empty_input() {
    assert!(matches!(CacheEntry::decode(&[]), Err(EntryCodecError::Empty)));
}

#[test]
fn matches_detects_changed_text() {
    let entry = sample_entry();
    assert!(entry.matches("hersteller,code\nAcme,E01\n"));
    assert!(!entry.matches("hersteller,code\nAcme,E02\n"));
}

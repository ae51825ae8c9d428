use super::*;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn open_cache() -> (CatalogueCache, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        base_path: temp_dir.path().to_path_buf(),
    };
    (CatalogueCache::open(&config).unwrap(), temp_dir)
}

fn now() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

#[test]
fn test_load_empty_cache() {
    let (cache, _temp) = open_cache();

    assert!(cache.load().unwrap().is_none());
    assert!(cache.entry().unwrap().is_none());
}

#[test]
fn test_store_then_load() {
    let (mut cache, _temp) = open_cache();
    let text = "hersteller,code\nAcme,E01\n";

    let entry = cache.store(text, "codes.csv", Some("3"), now()).unwrap();
    let cached = cache.load().unwrap().unwrap();

    assert_eq!(cached.text, text);
    assert_eq!(cached.entry, entry);
    assert_eq!(entry.source, "codes.csv");
    assert_eq!(entry.schema_version.as_deref(), Some("3"));
    assert_eq!(entry.byte_len, text.len() as u64);
    assert_eq!(entry.stored_at, now());
}

#[test]
fn test_clear() {
    let (mut cache, _temp) = open_cache();
    cache.store("a", "a.csv", None, now()).unwrap();

    assert!(cache.clear().unwrap());
    assert!(cache.load().unwrap().is_none());
    assert!(!cache.clear().unwrap());
}

#[test]
fn test_tampered_text_fails_digest_check() {
    let (mut cache, _temp) = open_cache();
    let entry = cache.store("original", "a.csv", None, now()).unwrap();

    // Rewrite the text behind the cache's back, keeping the old entry.
    cache.db.put(db::CURRENT_SLOT, "tampered", &entry).unwrap();

    assert!(matches!(cache.load(), Err(CacheError::DigestMismatch)));
}

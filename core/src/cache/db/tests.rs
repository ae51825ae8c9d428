mod common {
    use crate::cache::db::Database;
    use crate::types::{CacheEntry, Config};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    pub(super) fn create_test_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            base_path: temp_dir.path().to_path_buf(),
        };
        let db = Database::new(&config).unwrap();
        (db, temp_dir)
    }

    pub(super) fn entry_for(text: &str) -> CacheEntry {
        CacheEntry::for_text(
            text,
            "test.csv",
            None,
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_000),
        )
    }
}

mod crud {
    use super::common::{create_test_db, entry_for};
    use crate::cache::db::CURRENT_SLOT;

    #[test]
    fn test_empty_db_has_nothing() {
        let (db, _temp) = create_test_db();

        assert!(db.text(CURRENT_SLOT).unwrap().is_none());
        assert!(db.entry(CURRENT_SLOT).unwrap().is_none());
    }

    #[test]
    fn test_put_and_get() {
        let (mut db, _temp) = create_test_db();
        let text = "hersteller,code\nAcme,E01\n";
        let entry = entry_for(text);

        db.put(CURRENT_SLOT, text, &entry).unwrap();

        assert_eq!(db.text(CURRENT_SLOT).unwrap().as_deref(), Some(text));
        assert_eq!(db.entry(CURRENT_SLOT).unwrap(), Some(entry));
    }

    #[test]
    fn test_put_replaces_previous() {
        let (mut db, _temp) = create_test_db();

        db.put(CURRENT_SLOT, "old", &entry_for("old")).unwrap();
        db.put(CURRENT_SLOT, "new", &entry_for("new")).unwrap();

        assert_eq!(db.text(CURRENT_SLOT).unwrap().as_deref(), Some("new"));
        assert!(db.entry(CURRENT_SLOT).unwrap().unwrap().matches("new"));
    }

    #[test]
    fn test_remove() {
        let (mut db, _temp) = create_test_db();
        db.put(CURRENT_SLOT, "text", &entry_for("text")).unwrap();

        assert!(db.remove(CURRENT_SLOT).unwrap());
        assert!(!db.remove(CURRENT_SLOT).unwrap());
        assert!(db.text(CURRENT_SLOT).unwrap().is_none());
    }
}

mod persistence {
    use super::common::entry_for;
    use crate::cache::db::{CURRENT_SLOT, Database};
    use crate::types::Config;
    use tempfile::TempDir;

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            base_path: temp_dir.path().join("nested"),
        };

        {
            let mut db = Database::new(&config).unwrap();
            db.put(CURRENT_SLOT, "persisted", &entry_for("persisted"))
                .unwrap();
        }

        let db = Database::new(&config).unwrap();
        assert_eq!(db.text(CURRENT_SLOT).unwrap().as_deref(), Some("persisted"));
    }
}

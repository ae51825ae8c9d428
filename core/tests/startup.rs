use common::{CATALOGUE_CSV, config_in, now, open_cache, write_file};
use errcat_core::loader::{CatalogueLoader, CatalogueOrigin};
use errcat_core::types::AppConfig;
use tempfile::tempdir;

mod common;

#[test]
fn test_first_start_reads_file_then_cache_survives_restart() {
    let tmp = tempdir().unwrap();
    let csv = write_file(tmp.path(), "fehlerliste.csv", CATALOGUE_CSV);

    {
        let mut loader = CatalogueLoader::new(Some(open_cache(tmp.path())), &csv);
        let report = loader.load(now()).unwrap();
        assert_eq!(report.origin, CatalogueOrigin::File(csv.clone()));
        assert_eq!(report.catalogue.len(), 3);
        assert_eq!(report.catalogue.schema_version(), Some("2024-03"));
    }

    std::fs::remove_file(&csv).unwrap();

    let mut loader = CatalogueLoader::new(Some(open_cache(tmp.path())), &csv);
    let report = loader.load(now()).unwrap();
    assert!(matches!(report.origin, CatalogueOrigin::Cache { .. }));
    assert_eq!(report.catalogue.len(), 3);

    let entry = loader.cache().unwrap().entry().unwrap().unwrap();
    assert_eq!(entry.schema_version.as_deref(), Some("2024-03"));
    assert_eq!(entry.stored_at, now());
}

#[test]
fn test_import_then_reset_across_restarts() {
    let tmp = tempdir().unwrap();
    let fallback = write_file(tmp.path(), "fehlerliste.csv", CATALOGUE_CSV);
    let upload = write_file(tmp.path(), "upload.csv", "hersteller,typ,code\nGamma,Fold,G1\n");

    {
        let mut loader = CatalogueLoader::new(Some(open_cache(tmp.path())), &fallback);
        let report = loader.import(&upload, now()).unwrap();
        assert!(report.is_parsed());
        assert_eq!(report.catalogue.records()[0].code, "G1");
    }

    {
        let mut loader = CatalogueLoader::new(Some(open_cache(tmp.path())), &fallback);
        let report = loader.load(now()).unwrap();
        assert_eq!(report.catalogue.records()[0].code, "G1");
        assert!(loader.reset().unwrap());
    }

    let mut loader = CatalogueLoader::new(Some(open_cache(tmp.path())), &fallback);
    let report = loader.load(now()).unwrap();
    assert_eq!(report.origin, CatalogueOrigin::File(fallback));
    assert_eq!(report.catalogue.len(), 3);
}

#[test]
fn test_config_file_disables_cache_and_points_at_catalogue() {
    let tmp = tempdir().unwrap();
    let csv = write_file(tmp.path(), "list.csv", CATALOGUE_CSV);
    let config = config_in(tmp.path());
    std::fs::create_dir_all(&config.base_path).unwrap();
    let toml = format!(
        "[search]\ndebounce_ms = 150\n\n[catalogue]\ndefault_path = {:?}\ncache_enabled = false\n",
        csv.display().to_string()
    );
    std::fs::write(config.config_path(), toml).unwrap();

    let app = AppConfig::load(&config.config_path()).unwrap();
    assert!(app.validate().is_empty());
    assert_eq!(app.search.debounce_ms, 150);
    assert!(!app.catalogue.cache_enabled);

    let mut loader = CatalogueLoader::new(None, &app.catalogue.default_path);
    let report = loader.load(now()).unwrap();
    assert_eq!(report.catalogue.len(), 3);
    assert!(loader.cache().is_none());
    assert!(!config.db_path().exists());
}

#[test]
fn test_malformed_upload_keeps_working_cache() {
    let tmp = tempdir().unwrap();
    let fallback = write_file(tmp.path(), "fehlerliste.csv", CATALOGUE_CSV);
    let broken = write_file(tmp.path(), "broken.csv", "hersteller,typ,code\nAcme,Swing\n");
    let mut loader = CatalogueLoader::new(Some(open_cache(tmp.path())), &fallback);
    loader.load(now()).unwrap();

    let report = loader.import(&broken, now()).unwrap();

    assert!(report.parse_error.is_some());
    assert!(report.catalogue.is_empty());
    let reloaded = loader.load(now()).unwrap();
    assert!(matches!(reloaded.origin, CatalogueOrigin::Cache { .. }));
    assert_eq!(reloaded.catalogue.len(), 3);
}

#![allow(dead_code)]

use errcat_core::cache::CatalogueCache;
use errcat_core::types::Config;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub const CATALOGUE_CSV: &str = "\
hersteller;typ;code;suchbegriffe;fehler
CsvVersion;;2024-03;;
Acme;Swing;E01;reset;Motor blocked
Acme;Slide;E02;close;Door did not close
Beta;Swing;E03;reset door;Encoder fault
";

pub fn now() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub fn config_in(dir: &Path) -> Config {
    Config {
        base_path: dir.join("data"),
    }
}

pub fn open_cache(dir: &Path) -> CatalogueCache {
    CatalogueCache::open(&config_in(dir)).unwrap()
}

pub fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

use std::path::PathBuf;

/// Locations of everything errcat persists, rooted at one data directory.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("errcat.redb")
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_path.join("config.toml")
    }
}

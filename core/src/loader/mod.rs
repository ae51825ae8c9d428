//! Loads the catalogue from the cache, a fallback file, or an explicit import.
//!
//! Order on startup: cached text first, the configured CSV file otherwise.
//! A catalogue that fails to parse is replaced by an empty one and the parse
//! error is handed back to the caller to show once.

use crate::cache::CatalogueCache;
use crate::cache::error::CacheError;
use crate::catalogue::{Catalogue, ParseError};
use error::LoadError;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{info, warn};

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum LoadError {
        #[error("catalogue file {path} could not be read: {source}")]
        Source {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("Cache error: {0}")]
        Cache(#[from] CacheError),
    }
}

/// Where the current catalogue came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueOrigin {
    Cache { source: String },
    File(PathBuf),
    Import(PathBuf),
}

/// Result of a load: always a usable catalogue, plus the parse failure if any.
#[derive(Debug)]
pub struct LoadReport {
    pub catalogue: Catalogue,
    pub origin: CatalogueOrigin,
    pub parse_error: Option<ParseError>,
}

impl LoadReport {
    fn parsed(text: &str, origin: CatalogueOrigin) -> Self {
        match Catalogue::from_csv(text) {
            Ok(catalogue) => Self {
                catalogue,
                origin,
                parse_error: None,
            },
            Err(err) => Self::failed(err, origin),
        }
    }

    fn failed(err: ParseError, origin: CatalogueOrigin) -> Self {
        warn!(?origin, error = %err, "catalogue parse failed");
        Self {
            catalogue: Catalogue::empty(),
            origin,
            parse_error: Some(err),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.parse_error.is_none()
    }
}

pub struct CatalogueLoader {
    cache: Option<CatalogueCache>,
    fallback_path: PathBuf,
}

impl CatalogueLoader {
    /// `cache` is `None` when caching is disabled.
    pub fn new(cache: Option<CatalogueCache>, fallback_path: impl Into<PathBuf>) -> Self {
        Self {
            cache,
            fallback_path: fallback_path.into(),
        }
    }

    pub fn fallback_path(&self) -> &Path {
        &self.fallback_path
    }

    pub fn cache(&self) -> Option<&CatalogueCache> {
        self.cache.as_ref()
    }

    /// Loads the cached catalogue, falling back to the configured file.
    ///
    /// A cache that cannot be read is skipped with a warning; only a missing
    /// fallback file is an error.
    pub fn load(&mut self, now: SystemTime) -> Result<LoadReport, LoadError> {
        if let Some(cache) = &self.cache {
            match cache.load() {
                Ok(Some(cached)) => {
                    info!(source = %cached.entry.source, "loaded catalogue from cache");
                    let origin = CatalogueOrigin::Cache {
                        source: cached.entry.source.clone(),
                    };
                    return Ok(LoadReport::parsed(&cached.text, origin));
                }
                Ok(None) => {}
                Err(err) => warn!(error = %err, "ignoring unreadable catalogue cache"),
            }
        }

        let path = self.fallback_path.clone();
        let report = self.read_and_cache(&path, CatalogueOrigin::File(path.clone()), now)?;
        info!(path = %path.display(), records = report.catalogue.len(), "loaded catalogue file");
        Ok(report)
    }

    /// Replaces the current catalogue with the contents of `path`.
    pub fn import(&mut self, path: &Path, now: SystemTime) -> Result<LoadReport, LoadError> {
        let report = self.read_and_cache(path, CatalogueOrigin::Import(path.to_path_buf()), now)?;
        info!(path = %path.display(), records = report.catalogue.len(), "imported catalogue");
        Ok(report)
    }

    /// Drops the cached catalogue so the next load reads the fallback file.
    pub fn reset(&mut self) -> Result<bool, LoadError> {
        match &mut self.cache {
            Some(cache) => Ok(cache.clear()?),
            None => Ok(false),
        }
    }

    fn read_and_cache(
        &mut self,
        path: &Path,
        origin: CatalogueOrigin,
        now: SystemTime,
    ) -> Result<LoadReport, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Source {
            path: path.to_path_buf(),
            source,
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => return Ok(LoadReport::failed(err.utf8_error().into(), origin)),
        };

        let report = LoadReport::parsed(&text, origin);

        // Only text that parsed is worth keeping across restarts.
        if let Some(cache) = self.cache.as_mut().filter(|_| report.is_parsed()) {
            cache.store(&text, &source_label(path), report.catalogue.schema_version(), now)?;
        }

        Ok(report)
    }
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

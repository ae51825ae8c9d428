//! Persistent cache for the last successfully loaded catalogue text.

use crate::cache::db::Database;
use crate::cache::db::error::DatabaseError;
use crate::types::{CacheEntry, Config};
use error::CacheError;
use std::time::SystemTime;
use tracing::{debug, warn};

pub(crate) mod db;

pub mod error {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum CacheError {
        #[error("Database error: {0}")]
        Database(#[from] DatabaseError),

        #[error("Cached text does not match its digest")]
        DigestMismatch,
    }
}

/// Cached catalogue text with its metadata.
#[derive(Debug, Clone)]
pub struct CachedCatalogue {
    pub text: String,
    pub entry: CacheEntry,
}

pub struct CatalogueCache {
    db: Database,
}

impl CatalogueCache {
    pub fn open(config: &Config) -> Result<Self, CacheError> {
        let db = Database::new(config)?;
        Ok(Self { db })
    }

    /// Returns the cached text, verified against its stored digest.
    ///
    /// A text without an entry, or one whose digest no longer matches, is
    /// reported as [`CacheError::DigestMismatch`].
    pub fn load(&self) -> Result<Option<CachedCatalogue>, CacheError> {
        let Some(text) = self.db.text(db::CURRENT_SLOT)? else {
            return Ok(None);
        };
        let Some(entry) = self.db.entry(db::CURRENT_SLOT)? else {
            warn!("cached catalogue text has no entry");
            return Err(CacheError::DigestMismatch);
        };
        if !entry.matches(&text) {
            warn!(source = %entry.source, "cached catalogue failed digest check");
            return Err(CacheError::DigestMismatch);
        }

        Ok(Some(CachedCatalogue { text, entry }))
    }

    /// Returns the metadata of the cached catalogue without reading the text.
    pub fn entry(&self) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.db.entry(db::CURRENT_SLOT)?)
    }

    /// Replaces the cached catalogue.
    pub fn store(
        &mut self,
        text: &str,
        source: &str,
        schema_version: Option<&str>,
        now: SystemTime,
    ) -> Result<CacheEntry, CacheError> {
        let entry = CacheEntry::for_text(text, source, schema_version.map(str::to_string), now);
        self.db.put(db::CURRENT_SLOT, text, &entry)?;
        debug!(source, bytes = entry.byte_len, "stored catalogue in cache");
        Ok(entry)
    }

    /// Drops the cached catalogue. Returns true if one was stored.
    pub fn clear(&mut self) -> Result<bool, CacheError> {
        Ok(self.db.remove(db::CURRENT_SLOT)?)
    }
}

#[cfg(test)]
mod tests;

//! Database layer for the catalogue cache.
//!
//! Two redb tables:
//! - Text table: slot name → raw CSV text
//! - Entry table: slot name → versioned [`CacheEntry`] bytes

use crate::cache::db::error::DatabaseError;
use crate::types::CacheEntry;
use crate::types::Config;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};

pub mod error {
    use crate::types::cache_entry::EntryCodecError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Entry codec error: {0}")]
        Entry(#[from] EntryCodecError),
    }
}

/// Text table: slot → CSV text
const TEXT_TABLE: TableDefinition<&str, &str> = TableDefinition::new("catalogue_text");

/// Entry table: slot → version byte + postcard body
const ENTRY_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("catalogue_entry");

/// The only slot in use; one catalogue is cached at a time.
pub(crate) const CURRENT_SLOT: &str = "current";

pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Creates or opens the database at the path given by the config.
    pub fn new(config: &Config) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TEXT_TABLE)?;
            let _ = write_txn.open_table(ENTRY_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

/// Read operations.
impl Database {
    pub fn text(&self, slot: &str) -> Result<Option<String>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TEXT_TABLE)?;

        Ok(table.get(slot)?.map(|guard| guard.value().to_string()))
    }

    pub fn entry(&self, slot: &str) -> Result<Option<CacheEntry>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENTRY_TABLE)?;

        match table.get(slot)? {
            None => Ok(None),
            Some(guard) => Ok(Some(CacheEntry::decode(guard.value())?)),
        }
    }
}

/// Write operations.
impl Database {
    /// Replaces text and entry of `slot` in one transaction.
    pub fn put(&mut self, slot: &str, text: &str, entry: &CacheEntry) -> Result<(), DatabaseError> {
        let bytes = entry.encode()?;

        let write_txn = self.db.begin_write()?;
        {
            let mut text_table = write_txn.open_table(TEXT_TABLE)?;
            text_table.insert(slot, text)?;

            let mut entry_table = write_txn.open_table(ENTRY_TABLE)?;
            entry_table.insert(slot, bytes.as_slice())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Removes `slot`. Returns true if anything was stored.
    pub fn remove(&mut self, slot: &str) -> Result<bool, DatabaseError> {
        let write_txn = self.db.begin_write()?;
        let existed;
        {
            let mut text_table = write_txn.open_table(TEXT_TABLE)?;
            let had_text = text_table.remove(slot)?.is_some();

            let mut entry_table = write_txn.open_table(ENTRY_TABLE)?;
            let had_entry = entry_table.remove(slot)?.is_some();

            existed = had_text || had_entry;
        }
        write_txn.commit()?;

        Ok(existed)
    }
}

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use super::EntryVariant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// blake3 digest of the cached CSV text.
    pub digest: blake3::Hash,
    pub byte_len: u64,
    pub stored_at: SystemTime,
    /// Where the text came from, e.g. the imported file name.
    pub source: String,
    pub schema_version: Option<String>,
}

impl EntryVariant for CacheEntry {
    const VERSION: u8 = 1;
}

impl CacheEntry {
    pub fn for_text(
        text: &str,
        source: impl Into<String>,
        schema_version: Option<String>,
        now: SystemTime,
    ) -> Self {
        Self {
            digest: blake3::hash(text.as_bytes()),
            byte_len: text.len() as u64,
            stored_at: now,
            source: source.into(),
            schema_version,
        }
    }

    /// Returns true if `text` is exactly the text this entry was created for.
    pub fn matches(&self, text: &str) -> bool {
        self.byte_len == text.len() as u64 && self.digest == blake3::hash(text.as_bytes())
    }
}

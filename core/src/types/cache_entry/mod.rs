//! Versioned metadata stored alongside the cached catalogue text.
//!
//! Encoded as a single version byte followed by the postcard body, so older
//! entries stay readable once a newer layout is introduced.

pub use v1::CacheEntry;

pub mod v1;

pub trait EntryVariant {
    const VERSION: u8;
}

#[derive(Debug, thiserror::Error)]
pub enum EntryCodecError {
    #[error("empty cache entry")]
    Empty,

    #[error("unsupported cache entry version: {0}")]
    UnsupportedVersion(u8),

    #[error("postcard error: {0}")]
    Postcard(#[from] postcard::Error),
}

impl CacheEntry {
    pub fn encode(&self) -> Result<Vec<u8>, EntryCodecError> {
        Ok(postcard::to_extend(self, vec![Self::VERSION])?)
    }

    pub fn decode(data: &[u8]) -> Result<Self, EntryCodecError> {
        let (version, body) = data.split_first().ok_or(EntryCodecError::Empty)?;
        match *version {
            v1::CacheEntry::VERSION => Ok(postcard::from_bytes::<v1::CacheEntry>(body)?),
            version => Err(EntryCodecError::UnsupportedVersion(version)),
        }
    }
}

#[cfg(test)]
mod tests;

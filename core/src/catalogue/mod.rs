//! The loaded error-code catalogue.
//!
//! A `Catalogue` is immutable: reloading or importing builds a new value that
//! replaces the old one wholesale.

use crate::types::ErrorRecord;
use std::sync::Arc;
use tracing::debug;

pub use error::ParseError;

mod parser;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ParseError {
        #[error("catalogue has no header row")]
        MissingHeader,

        #[error("no known column in header: {header}")]
        UnknownLayout { header: String },

        #[error("quoted field opened on line {line} is never closed")]
        UnterminatedQuote { line: usize },

        #[error("catalogue is not valid UTF-8: {0}")]
        Encoding(#[from] std::str::Utf8Error),

        #[error("malformed catalogue: {0}")]
        Csv(#[from] csv::Error),
    }
}

#[derive(Debug, Clone)]
pub struct Catalogue {
    records: Arc<[ErrorRecord]>,
    schema_version: Option<String>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalogue {
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            schema_version: None,
        }
    }

    /// Parses CSV text with a header row.
    ///
    /// Version-stamp rows are excluded from the records and their stamp kept
    /// as [`Catalogue::schema_version`].
    pub fn from_csv(text: &str) -> Result<Self, ParseError> {
        let parsed = parser::parse_rows(text)?;
        debug!(
            records = parsed.records.len(),
            schema_version = parsed.schema_version.as_deref().unwrap_or(""),
            "parsed catalogue"
        );
        Ok(Self {
            records: Arc::from(parsed.records),
            schema_version: parsed.schema_version,
        })
    }

    /// Builds a catalogue from records that are already typed.
    ///
    /// Version-stamp rows are dropped here as well.
    pub fn from_records(records: impl IntoIterator<Item = ErrorRecord>) -> Self {
        let records: Vec<ErrorRecord> = records
            .into_iter()
            .filter(|record| !parser::is_version_marker(&record.manufacturer))
            .collect();
        Self {
            records: Arc::from(records),
            schema_version: None,
        }
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn schema_version(&self) -> Option<&str> {
        self.schema_version.as_deref()
    }
}

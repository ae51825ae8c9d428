use super::FacetKey;
use serde::{Deserialize, Serialize};

/// One row of the error-code catalogue.
///
/// Every field is always present; columns missing from the source become an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub manufacturer: String,
    pub device_type: String,
    /// Primary search key. Empty for rows describing a "no error" state.
    pub code: String,
    /// Free-form synonyms, secondary search key.
    pub keywords: String,
    pub error_text: String,
    pub remedy_text: String,
    pub info_text: String,
    pub extra_text: String,
    pub category: String,
    pub link: String,
    pub device_image_path: String,
    pub details_ref: String,
    pub modal_links: Vec<ModalLink>,
    pub schema_version: String,
}

impl ErrorRecord {
    pub fn manufacturer_key(&self) -> Option<FacetKey> {
        FacetKey::from_raw(&self.manufacturer)
    }

    pub fn device_type_key(&self) -> Option<FacetKey> {
        FacetKey::from_raw(&self.device_type)
    }
}

/// A labelled link shown in the record's detail dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalLink {
    pub label: String,
    pub url: String,
}

impl ModalLink {
    /// Parses a `|`-separated list of `label:url` pairs.
    ///
    /// Splits each entry on the first `:` so URLs keep their scheme. Entries
    /// with an empty label or url are dropped, order is preserved.
    pub fn parse_list(raw: &str) -> Vec<ModalLink> {
        raw.split('|')
            .filter_map(|entry| {
                let (label, url) = entry.split_once(':')?;
                let (label, url) = (label.trim(), url.trim());
                if label.is_empty() || url.is_empty() {
                    return None;
                }
                Some(ModalLink {
                    label: label.to_string(),
                    url: url.to_string(),
                })
            })
            .collect()
    }
}

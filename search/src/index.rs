//! Per-catalogue search index.

use crate::normalize::fold;
use errcat_core::Catalogue;
use errcat_core::types::{ErrorRecord, FacetKey};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Searchable projection of one record.
#[derive(Debug, Clone)]
pub(crate) struct IndexedRecord {
    /// Folded `code`.
    pub code: String,
    /// Folded `keywords`.
    pub keywords: String,
    pub manufacturer: Option<FacetKey>,
    pub device_type: Option<FacetKey>,
}

/// Immutable index over one loaded catalogue.
///
/// Built once per load. Holds the folded search fields of every record, the
/// facet universes with their first-seen labels, and which device types occur
/// under which manufacturer.
#[derive(Debug)]
pub struct SearchIndex {
    catalogue: Catalogue,
    entries: Vec<IndexedRecord>,
    manufacturer_labels: BTreeMap<FacetKey, String>,
    device_type_labels: BTreeMap<FacetKey, String>,
    device_types_by_manufacturer: HashMap<FacetKey, BTreeSet<FacetKey>>,
}

impl SearchIndex {
    pub fn new(catalogue: Catalogue) -> Self {
        let mut entries = Vec::with_capacity(catalogue.len());
        let mut manufacturer_labels = BTreeMap::new();
        let mut device_type_labels = BTreeMap::new();
        let mut device_types_by_manufacturer: HashMap<FacetKey, BTreeSet<FacetKey>> =
            HashMap::new();

        for record in catalogue.records() {
            let manufacturer = record.manufacturer_key();
            let device_type = record.device_type_key();

            if let Some(key) = &manufacturer {
                manufacturer_labels
                    .entry(key.clone())
                    .or_insert_with(|| record.manufacturer.clone());
            }
            if let Some(key) = &device_type {
                device_type_labels
                    .entry(key.clone())
                    .or_insert_with(|| record.device_type.clone());
            }
            if let (Some(m), Some(d)) = (&manufacturer, &device_type) {
                device_types_by_manufacturer
                    .entry(m.clone())
                    .or_default()
                    .insert(d.clone());
            }

            entries.push(IndexedRecord {
                code: fold(&record.code),
                keywords: fold(&record.keywords),
                manufacturer,
                device_type,
            });
        }

        Self {
            catalogue,
            entries,
            manufacturer_labels,
            device_type_labels,
            device_types_by_manufacturer,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn records(&self) -> &[ErrorRecord] {
        self.catalogue.records()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[IndexedRecord] {
        &self.entries
    }

    pub fn has_manufacturer(&self, key: &FacetKey) -> bool {
        self.manufacturer_labels.contains_key(key)
    }

    /// Every distinct manufacturer in the catalogue.
    pub(crate) fn manufacturer_universe(&self) -> impl Iterator<Item = (&FacetKey, &str)> {
        self.manufacturer_labels
            .iter()
            .map(|(key, label)| (key, label.as_str()))
    }

    /// Device types offered for `manufacturer`.
    ///
    /// Without a manufacturer every device type in the catalogue; with one,
    /// only those that occur together with it in at least one record.
    pub(crate) fn device_type_universe(
        &self,
        manufacturer: Option<&FacetKey>,
    ) -> Vec<(&FacetKey, &str)> {
        let Some(manufacturer) = manufacturer else {
            return self
                .device_type_labels
                .iter()
                .map(|(key, label)| (key, label.as_str()))
                .collect();
        };

        self.device_types_by_manufacturer
            .get(manufacturer)
            .into_iter()
            .flatten()
            .filter_map(|key| {
                self.device_type_labels
                    .get_key_value(key)
                    .map(|(key, label)| (key, label.as_str()))
            })
            .collect()
    }

    /// Distinct non-empty codes, sorted, for input autocompletion.
    pub fn code_suggestions(&self) -> Vec<String> {
        self.records()
            .iter()
            .map(|record| record.code.as_str())
            .filter(|code| !code.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

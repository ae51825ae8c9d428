//! Facet option lists for the manufacturer and device-type dropdowns.
//!
//! Computed in two pure steps:
//! - [`aggregate`]: match counts per facet value under the current text query.
//!   Manufacturer counts ignore both selections; device-type counts follow the
//!   manufacturer selection but never their own.
//! - [`reconcile`]: turns counts into ordered options and corrects a selection
//!   that no longer fits the data.

use crate::query::Selection;
use errcat_core::types::FacetKey;
use serde::Serialize;
use std::collections::BTreeMap;

mod aggregate;
mod sync;

pub use aggregate::aggregate;
pub use sync::reconcile;

/// Label and match count of one facet value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCount {
    pub label: String,
    pub count: usize,
}

/// Counts for every offered value of both facets, keyed by canonical key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetCounts {
    pub manufacturers: BTreeMap<FacetKey, FacetCount>,
    pub device_types: BTreeMap<FacetKey, FacetCount>,
}

/// One renderable dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub key: FacetKey,
    pub label: String,
    pub match_count: usize,
    pub is_current_selection: bool,
}

impl FacetOption {
    /// Options without matches are shown but cannot be picked.
    pub fn is_disabled(&self) -> bool {
        self.match_count == 0
    }
}

/// Ordered options for both dropdowns plus the selection they imply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetView {
    pub manufacturers: Vec<FacetOption>,
    pub device_types: Vec<FacetOption>,
    pub selection: Selection,
    /// The previous manufacturer is not part of the catalogue.
    pub manufacturer_cleared: bool,
    /// The previous device type does not occur under the selected manufacturer.
    pub device_type_cleared: bool,
}

impl FacetView {
    pub fn selection_changed(&self) -> bool {
        self.manufacturer_cleared || self.device_type_cleared
    }
}

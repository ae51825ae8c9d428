//! Filter engine: the records matching a query.

use crate::index::{IndexedRecord, SearchIndex};
use crate::normalize::text_matches;
use crate::query::FilterQuery;
use errcat_core::types::FacetKey;

/// Returns the indices of all records matching `query`, in catalogue order.
///
/// A record matches if every token is a whole word of its code or keywords,
/// and both selected facets (if any) equal its own values.
pub fn filter(index: &SearchIndex, query: &FilterQuery) -> Vec<usize> {
    index
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            facet_matches(entry, query.manufacturer.as_ref(), query.device_type.as_ref())
                && text_matches(&query.tokens, &entry.code, &entry.keywords)
        })
        .map(|(position, _)| position)
        .collect()
}

pub(crate) fn facet_matches(
    entry: &IndexedRecord,
    manufacturer: Option<&FacetKey>,
    device_type: Option<&FacetKey>,
) -> bool {
    manufacturer.is_none_or(|m| entry.manufacturer.as_ref() == Some(m))
        && device_type.is_none_or(|d| entry.device_type.as_ref() == Some(d))
}

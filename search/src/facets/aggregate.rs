use super::{FacetCount, FacetCounts};
use crate::filter::facet_matches;
use crate::index::SearchIndex;
use crate::normalize::{Token, text_matches};
use errcat_core::types::FacetKey;

/// Counts, per facet value, the records the text query would yield.
///
/// The option universe comes from the whole catalogue, so values without a
/// current match are present with a count of zero. With a manufacturer
/// selected, only device types seen together with it are offered.
pub fn aggregate(
    index: &SearchIndex,
    tokens: &[Token],
    manufacturer: Option<&FacetKey>,
) -> FacetCounts {
    let mut counts = FacetCounts::default();

    for (key, label) in index.manufacturer_universe() {
        counts.manufacturers.insert(key.clone(), zero(label));
    }
    for (key, label) in index.device_type_universe(manufacturer) {
        counts.device_types.insert(key.clone(), zero(label));
    }

    for entry in index.entries() {
        if !text_matches(tokens, &entry.code, &entry.keywords) {
            continue;
        }

        if let Some(count) = entry
            .manufacturer
            .as_ref()
            .and_then(|key| counts.manufacturers.get_mut(key))
        {
            count.count += 1;
        }

        if !facet_matches(entry, manufacturer, None) {
            continue;
        }
        if let Some(count) = entry
            .device_type
            .as_ref()
            .and_then(|key| counts.device_types.get_mut(key))
        {
            count.count += 1;
        }
    }

    counts
}

fn zero(label: &str) -> FacetCount {
    FacetCount {
        label: label.to_string(),
        count: 0,
    }
}

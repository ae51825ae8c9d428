use super::{FacetCount, FacetCounts, FacetOption, FacetView};
use crate::normalize::fold;
use crate::query::Selection;
use errcat_core::types::{FacetKey, OptionOrdering};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Builds ordered options from `counts` and corrects `previous`.
///
/// A manufacturer stays selected even with zero matches; it is only dropped
/// when the catalogue does not know it. A device type is dropped when it is
/// not among the options offered for the selected manufacturer.
pub fn reconcile(counts: FacetCounts, previous: &Selection, ordering: OptionOrdering) -> FacetView {
    let manufacturer = previous
        .manufacturer
        .clone()
        .filter(|key| counts.manufacturers.contains_key(key));
    let device_type = previous
        .device_type
        .clone()
        .filter(|key| counts.device_types.contains_key(key));

    let manufacturer_cleared = previous.manufacturer.is_some() && manufacturer.is_none();
    let device_type_cleared = previous.device_type.is_some() && device_type.is_none();
    if manufacturer_cleared {
        debug!(manufacturer = ?previous.manufacturer, "cleared unknown manufacturer");
    }
    if device_type_cleared {
        debug!(device_type = ?previous.device_type, "cleared incompatible device type");
    }

    FacetView {
        manufacturers: options(counts.manufacturers, manufacturer.as_ref(), ordering),
        device_types: options(counts.device_types, device_type.as_ref(), ordering),
        selection: Selection {
            manufacturer,
            device_type,
        },
        manufacturer_cleared,
        device_type_cleared,
    }
}

fn options(
    counts: BTreeMap<FacetKey, FacetCount>,
    selected: Option<&FacetKey>,
    ordering: OptionOrdering,
) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = counts
        .into_iter()
        .map(|(key, count)| FacetOption {
            is_current_selection: selected == Some(&key),
            key,
            label: count.label,
            match_count: count.count,
        })
        .collect();

    options.sort_by(|a, b| compare(a, b, ordering));
    options
}

fn compare(a: &FacetOption, b: &FacetOption, ordering: OptionOrdering) -> Ordering {
    match ordering {
        OptionOrdering::MatchesFirst => a
            .is_disabled()
            .cmp(&b.is_disabled())
            .then(a.match_count.cmp(&b.match_count))
            .then_with(|| by_label(a, b)),
        OptionOrdering::Alphabetical => by_label(a, b),
        OptionOrdering::CountDescending => b
            .match_count
            .cmp(&a.match_count)
            .then_with(|| by_label(a, b)),
    }
}

fn by_label(a: &FacetOption, b: &FacetOption) -> Ordering {
    fold(&a.label)
        .cmp(&fold(&b.label))
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.key.cmp(&b.key))
}

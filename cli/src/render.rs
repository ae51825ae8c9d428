//! Terminal and JSON output.

use errcat_core::types::{CacheEntry, ErrorRecord};
use errcat_search::{FacetOption, FacetView, SearchOutcome, ViewState};
use serde::Serialize;
use std::io::{self, Write};
use std::time::UNIX_EPOCH;

const IDLE_HINT: &str = "Enter an error code, or pick a manufacturer or device type to browse.";
const NO_MATCHES: &str = "No matches found.";

pub fn outcome(out: &mut impl Write, outcome: &SearchOutcome) -> io::Result<()> {
    notices(out, &outcome.facets)?;
    match outcome.view_state {
        ViewState::Idle => writeln!(out, "{IDLE_HINT}"),
        ViewState::Empty => writeln!(out, "{NO_MATCHES}"),
        ViewState::Results(_) => {
            writeln!(out, "{}", outcome.hit_summary())?;
            for record in outcome.records() {
                writeln!(out)?;
                card(out, record)?;
            }
            Ok(())
        }
    }
}

pub fn facets(out: &mut impl Write, view: &FacetView) -> io::Result<()> {
    notices(out, view)?;
    writeln!(out, "Manufacturers:")?;
    options(out, &view.manufacturers)?;
    writeln!(out, "Device types:")?;
    options(out, &view.device_types)
}

fn notices(out: &mut impl Write, view: &FacetView) -> io::Result<()> {
    if view.manufacturer_cleared {
        writeln!(out, "(manufacturer not in catalogue, filter removed)")?;
    }
    if view.device_type_cleared {
        writeln!(out, "(device type not offered for this manufacturer, filter removed)")?;
    }
    Ok(())
}

fn options(out: &mut impl Write, options: &[FacetOption]) -> io::Result<()> {
    if options.is_empty() {
        return writeln!(out, "  (none)");
    }
    for option in options {
        writeln!(out, "{}", option_line(option))?;
    }
    Ok(())
}

/// `*` marks the selection, `-` an option without matches.
fn option_line(option: &FacetOption) -> String {
    let marker = if option.is_current_selection {
        '*'
    } else if option.is_disabled() {
        '-'
    } else {
        ' '
    };
    format!("{marker} {} ({})", option.label, option.match_count)
}

pub fn card(out: &mut impl Write, record: &ErrorRecord) -> io::Result<()> {
    let code = if record.code.is_empty() {
        "(no code)"
    } else {
        record.code.as_str()
    };
    writeln!(out, "{code}  {} {}", record.manufacturer, record.device_type)?;

    let fields = [
        ("Category", &record.category),
        ("Error", &record.error_text),
        ("Cause", &record.remedy_text),
        ("Info", &record.info_text),
        ("More", &record.extra_text),
        ("Link", &record.link),
        ("Image", &record.device_image_path),
        ("Details", &record.details_ref),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            writeln!(out, "  {label}: {value}")?;
        }
    }
    for link in &record.modal_links {
        writeln!(out, "  - {}: {}", link.label, link.url)?;
    }
    Ok(())
}

pub fn cache_entry(out: &mut impl Write, entry: &CacheEntry) -> io::Result<()> {
    let stored = entry
        .stored_at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    writeln!(out, "source:         {}", entry.source)?;
    writeln!(out, "bytes:          {}", entry.byte_len)?;
    writeln!(out, "blake3:         {}", entry.digest)?;
    writeln!(out, "stored at:      {stored} (unix seconds)")?;
    writeln!(
        out,
        "schema version: {}",
        entry.schema_version.as_deref().unwrap_or("-")
    )
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    view_state: ViewState,
    hit_summary: String,
    records: Vec<&'a ErrorRecord>,
    facets: &'a FacetView,
    controls: errcat_search::ControlState,
}

pub fn json(out: &mut impl Write, outcome: &SearchOutcome) -> io::Result<()> {
    let document = JsonOutcome {
        view_state: outcome.view_state,
        hit_summary: outcome.hit_summary(),
        records: outcome.records().collect(),
        facets: &outcome.facets,
        controls: outcome.controls,
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)
}

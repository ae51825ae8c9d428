//! Output of one search run.

use crate::facets::FacetView;
use crate::index::SearchIndex;
use crate::query::{FilterQuery, UiState};
use errcat_core::types::ErrorRecord;
use serde::Serialize;
use std::sync::Arc;

/// What the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum ViewState {
    /// No text and no facet: the neutral browse view.
    Idle,
    /// An active query with at least one match.
    Results(usize),
    /// An active query without matches.
    Empty,
}

/// Enabled state of the two reset buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub clear_search_enabled: bool,
    pub reset_filters_enabled: bool,
}

/// Result of [`crate::SearchEngine::run`].
///
/// Keeps the index it was computed from alive, so it stays valid after the
/// engine switches to another catalogue.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub(crate) index: Arc<SearchIndex>,
    pub query: FilterQuery,
    pub matches: Vec<usize>,
    pub view_state: ViewState,
    pub facets: FacetView,
    pub controls: ControlState,
}

impl SearchOutcome {
    /// Matching records in catalogue order.
    pub fn records(&self) -> impl Iterator<Item = &ErrorRecord> + '_ {
        let records = self.index.records();
        self.matches.iter().filter_map(move |&i| records.get(i))
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Hit counter text; empty unless there are results to show.
    pub fn hit_summary(&self) -> String {
        match self.view_state {
            ViewState::Results(1) => "1 hit".to_string(),
            ViewState::Results(n) => format!("{n} hits"),
            ViewState::Idle | ViewState::Empty => String::new(),
        }
    }

    /// `previous` with its dropdowns moved to the corrected selection.
    pub fn corrected_state(&self, previous: &UiState) -> UiState {
        previous.with_selection(&self.facets.selection)
    }
}

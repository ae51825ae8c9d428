//! Search engine over one immutable catalogue.

use crate::config::SearchConfig;
use crate::facets::{aggregate, reconcile};
use crate::filter::filter;
use crate::index::SearchIndex;
use crate::normalize::tokenize;
use crate::query::{FilterQuery, Selection, UiState};
use crate::results::{ControlState, SearchOutcome, ViewState};
use errcat_core::Catalogue;
use std::sync::Arc;
use tracing::debug;

/// Runs the tokenize → aggregate → reconcile → filter pipeline.
///
/// Every call is synchronous and recomputes everything from the input state;
/// nothing is carried over between runs except the index.
pub struct SearchEngine {
    index: Arc<SearchIndex>,
    config: SearchConfig,
}

/// Create operations.
impl SearchEngine {
    pub fn new(catalogue: Catalogue, config: SearchConfig) -> Self {
        Self {
            index: Arc::new(SearchIndex::new(catalogue)),
            config,
        }
    }
}

/// Catalogue operations.
impl SearchEngine {
    /// Swaps in a freshly loaded catalogue.
    ///
    /// Outcomes from earlier runs keep referring to the old catalogue.
    pub fn replace_catalogue(&mut self, catalogue: Catalogue) {
        debug!(records = catalogue.len(), "replacing catalogue");
        self.index = Arc::new(SearchIndex::new(catalogue));
    }

    pub fn catalogue(&self) -> &Catalogue {
        self.index.catalogue()
    }

    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Distinct codes for input autocompletion.
    pub fn code_suggestions(&self) -> Vec<String> {
        self.index.code_suggestions()
    }
}

/// Search operations.
impl SearchEngine {
    pub fn run(&self, state: &UiState) -> SearchOutcome {
        let tokens = tokenize(&state.search_text);
        let previous = Selection::from_ui(state);

        // Device types are offered per manufacturer, so an unknown manufacturer
        // must not narrow them.
        let manufacturer = previous
            .manufacturer
            .as_ref()
            .filter(|key| self.index.has_manufacturer(key));

        let counts = aggregate(&self.index, &tokens, manufacturer);
        let facets = reconcile(counts, &previous, self.config.option_ordering);

        let query = FilterQuery::new(tokens, facets.selection.clone());
        let matches = filter(&self.index, &query);

        let view_state = match (query.is_active(), matches.len()) {
            (false, _) => ViewState::Idle,
            (true, 0) => ViewState::Empty,
            (true, n) => ViewState::Results(n),
        };
        let controls = ControlState {
            clear_search_enabled: !state.search_text.trim().is_empty(),
            reset_filters_enabled: !facets.selection.is_empty(),
        };

        debug!(
            tokens = query.tokens.len(),
            matches = matches.len(),
            ?view_state,
            "search run"
        );

        SearchOutcome {
            index: Arc::clone(&self.index),
            query,
            matches,
            view_state,
            facets,
            controls,
        }
    }
}

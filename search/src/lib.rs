//! Error-code search: text filtering and cascading facets.
//!
//! # Design
//!
//! - A [`SearchIndex`] is built once per loaded catalogue and never mutated.
//!   Loading another catalogue builds a new index.
//! - Text matching is whole-word, accent- and case-insensitive. Every query
//!   token must appear in the record's code or keywords.
//! - Facet counts are mutually exclusive: manufacturer counts ignore both
//!   selections, device-type counts follow the manufacturer but never their
//!   own selection.
//! - Everything runs synchronously per input event. Debouncing belongs to the
//!   caller, see [`LatestWins`].
//!
//! # API
//!
//! - `SearchEngine::run()`: one full pass for a [`UiState`]
//! - `SearchEngine::replace_catalogue()`: swap in a new catalogue
//! - [`filter`], [`aggregate`], [`reconcile`]: the individual steps

mod config;
mod debounce;
mod engine;
mod facets;
mod filter;
mod index;
mod normalize;
mod query;
mod results;

pub use config::SearchConfig;
pub use debounce::LatestWins;
pub use engine::SearchEngine;
pub use facets::{FacetCount, FacetCounts, FacetOption, FacetView, aggregate, reconcile};
pub use filter::filter;
pub use index::SearchIndex;
pub use normalize::{Token, contains_word, fold, tokenize};
pub use query::{FilterQuery, Selection, UiState};
pub use results::{ControlState, SearchOutcome, ViewState};

pub use errcat_core::types::OptionOrdering;

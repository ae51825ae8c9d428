//! Query types.

use crate::normalize::{Token, tokenize};
use errcat_core::types::FacetKey;
use serde::{Deserialize, Serialize};

/// Snapshot of the input controls as the renderer sees them.
///
/// Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub search_text: String,
    pub selected_manufacturer: String,
    pub selected_device_type: String,
}

impl UiState {
    pub fn new(
        search_text: impl Into<String>,
        selected_manufacturer: impl Into<String>,
        selected_device_type: impl Into<String>,
    ) -> Self {
        Self {
            search_text: search_text.into(),
            selected_manufacturer: selected_manufacturer.into(),
            selected_device_type: selected_device_type.into(),
        }
    }

    /// Same search text, dropdowns set to `selection`.
    pub fn with_selection(&self, selection: &Selection) -> Self {
        let key = |k: &Option<FacetKey>| k.as_ref().map(|k| k.to_string()).unwrap_or_default();
        Self {
            search_text: self.search_text.clone(),
            selected_manufacturer: key(&selection.manufacturer),
            selected_device_type: key(&selection.device_type),
        }
    }
}

/// Selected facet values; `None` is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub manufacturer: Option<FacetKey>,
    pub device_type: Option<FacetKey>,
}

impl Selection {
    pub fn from_ui(state: &UiState) -> Self {
        Self {
            manufacturer: FacetKey::from_raw(&state.selected_manufacturer),
            device_type: FacetKey::from_raw(&state.selected_device_type),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none() && self.device_type.is_none()
    }
}

/// Text tokens plus facet constraints, rebuilt from input on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterQuery {
    pub tokens: Vec<Token>,
    pub manufacturer: Option<FacetKey>,
    pub device_type: Option<FacetKey>,
}

impl FilterQuery {
    pub fn from_ui(state: &UiState) -> Self {
        Self::new(tokenize(&state.search_text), Selection::from_ui(state))
    }

    pub fn new(tokens: Vec<Token>, selection: Selection) -> Self {
        Self {
            tokens,
            manufacturer: selection.manufacturer,
            device_type: selection.device_type,
        }
    }

    pub fn selection(&self) -> Selection {
        Selection {
            manufacturer: self.manufacturer.clone(),
            device_type: self.device_type.clone(),
        }
    }

    /// True if any of text, manufacturer or device type constrains the result.
    pub fn is_active(&self) -> bool {
        !self.tokens.is_empty() || self.manufacturer.is_some() || self.device_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ui_normalizes_all_parts() {
        let query = FilterQuery::from_ui(&UiState::new(" Reset  TÜR ", "GEZE", " slim "));

        let tokens: Vec<_> = query.tokens.iter().map(Token::as_str).collect();
        assert_eq!(tokens, ["reset", "tur"]);
        assert_eq!(query.manufacturer.as_deref().map(String::as_str), Some("geze"));
        assert_eq!(query.device_type.as_deref().map(String::as_str), Some("slim"));
    }

    #[test]
    fn test_inactive_when_everything_blank() {
        let query = FilterQuery::from_ui(&UiState::new("  ", "", " "));
        assert!(!query.is_active());
        assert!(query.selection().is_empty());
    }

    #[test]
    fn test_active_with_only_a_facet() {
        let query = FilterQuery::from_ui(&UiState::new("", "", "T1"));
        assert!(query.is_active());
    }

    #[test]
    fn test_with_selection_keeps_search_text() {
        let state = UiState::new("e01", "Acme", "X");
        let selection = Selection {
            manufacturer: FacetKey::from_raw("Acme"),
            device_type: None,
        };

        let corrected = state.with_selection(&selection);

        assert_eq!(corrected, UiState::new("e01", "acme", ""));
    }
}

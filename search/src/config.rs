use errcat_core::types::{AppConfig, OptionOrdering, SearchSettings};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub option_ordering: OptionOrdering,
    /// Quiet period applied by [`crate::LatestWins`] at the input boundary.
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::from(&SearchSettings::default())
    }
}

impl From<&SearchSettings> for SearchConfig {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            option_ordering: settings.option_ordering,
            debounce: Duration::from_millis(settings.debounce_ms),
        }
    }
}

impl From<&AppConfig> for SearchConfig {
    fn from(config: &AppConfig) -> Self {
        Self::from(&config.search)
    }
}

mod app;
mod core;

pub use app::{AppConfig, AppConfigError, CatalogueConfig, OptionOrdering, SearchSettings};
pub use core::Config;

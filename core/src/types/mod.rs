pub(crate) mod config;
pub use config::{
    AppConfig, AppConfigError, CatalogueConfig, Config, OptionOrdering, SearchSettings,
};

pub(crate) mod facet_key;
pub use facet_key::{FacetKey, FacetKeyError};

pub(crate) mod record;
pub use record::{ErrorRecord, ModalLink};

pub(crate) mod cache_entry;
pub use cache_entry::{CacheEntry, EntryCodecError};

pub mod cache;
pub mod catalogue;
pub mod loader;
pub mod types;

pub use catalogue::{Catalogue, ParseError};

//! Media module for listing URL handling and extension filtering.

pub mod filter;
pub mod parser;

pub use filter::FilterSet;
pub use parser::{decode_entities, extension, filename_from_url};

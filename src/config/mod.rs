//! Configuration module for the reddit-image-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::Config;
pub use validation::{validate_config, validate_subreddits};

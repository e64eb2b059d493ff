//! Filesystem module.
//!
//! Provides:
//! - Destination path computation
//! - Download directory management

pub mod paths;

pub use paths::{destination_path, ensure_dir, prepare_download_dir};

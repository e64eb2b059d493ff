//! Reddit API module.
//!
//! This module provides:
//! - The shared, pooled HTTP client
//! - Subreddit listing retrieval
//! - Listing response types

pub mod client;
pub mod types;

pub use client::{build_http_client, cancellable, HttpSettings, RedditApi, API_BASE, USER_AGENT};
pub use types::{Child, Listing, ListingData, Post};

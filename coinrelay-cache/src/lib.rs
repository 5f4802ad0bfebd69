//! TTL cache for upstream payloads.
//!
//! Generic in-memory key/value store with per-entry expiration.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod cache;

pub use cache::{CacheStats, PayloadCache};

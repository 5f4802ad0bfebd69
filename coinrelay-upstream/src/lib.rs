//! Outbound HTTP fetcher for upstream market-data APIs.
//!
//! One GET per call, no retry; bodies are returned as opaque JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod fetcher;

pub use fetcher::{FetcherConfig, HttpFetcher};

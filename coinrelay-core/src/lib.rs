//! # Coinrelay Core
//!
//! Core types, errors, and traits for the coinrelay market-data gateway.
//!
//! This crate provides the foundational building blocks used by all other
//! coinrelay crates:
//!
//! - **Types**: The upstream request descriptor and the uniform response envelope
//! - **Errors**: The gateway error taxonomy with context
//! - **Traits**: The `Fetch` seam between the dispatcher and the HTTP client
//!
//! ## Example
//!
//! ```rust
//! use coinrelay_core::Envelope;
//!
//! let ok = Envelope::success(serde_json::json!({"status": "ok"}));
//! let json = serde_json::to_string(&ok).unwrap();
//! assert!(json.contains("\"success\":true"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{GatewayError, Result};
pub use traits::Fetch;
pub use types::{Envelope, UpstreamRequest};

//! Request-side data model for the Traverso engine.
//!
//! This crate owns the vocabulary the rest of the engine speaks: identifier
//! [`Key`]s and their [`coerce`] rules, the [`UrlChain`] of unconsumed path
//! tokens, and the [`ResourceRequest`] that bundles both with the HTTP method
//! and parameter maps. It performs no I/O; building a request from a live
//! connection is a transport concern.

pub mod chain;
pub mod key;
pub mod request;

pub use chain::UrlChain;
pub use key::{Key, KeyKind, coerce};
pub use request::{ResourceRequest, ResourceRequestBuilder, parse_urlencoded};

// Re-export error types so downstream crates share one vocabulary.
pub use traverso_exception::{Error, Result};

//! `nimble-http` is an HTTP client for the Nimble web-search and
//! content-extraction API.
//!
//! The crate wraps the `/search` and `/extract` endpoints with typed
//! parameters and a small document schema:
//! - [`NimbleClient::search`] / [`NimbleClient::extract`] (async)
//! - [`BlockingClient::search`] / [`BlockingClient::extract`] (blocking)
//!
//! Clients are cheap to construct: pooled `reqwest` clients live in a
//! process-wide cache keyed by the full [`ClientConfig`] tuple, and both call
//! styles share one exponential-backoff retry policy for 5xx responses and
//! transport failures.

mod client;
mod config;
mod decode;
mod error;
mod factory;
mod retry;
mod types;
mod wire;

pub mod blocking;

pub use blocking::BlockingClient;
pub use client::NimbleClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::NimbleError;
pub use factory::clear_pool_cache;
pub use types::{
    Document, DocumentMetadata, ExtractParams, ParsingType, SearchParams, SearchTopic,
};

pub type Result<T> = std::result::Result<T, NimbleError>;

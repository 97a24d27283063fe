//! Process-wide cache of pooled HTTP clients.
//!
//! Clients are keyed by the full [`ClientConfig`] tuple: equal configs share
//! one connection pool, and any field difference yields an independent pool.
//! The blocking and async caches are separate maps, so the two call styles
//! never share a pooled client even for identical configs. The cache mutex
//! serializes first-time construction per key, so concurrent first use cannot
//! produce two divergent pools for the same config.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::{
    config::{ClientConfig, CLIENT_SOURCE},
    NimbleError,
};

const MAX_IDLE_CONNECTIONS: usize = 20;

static ASYNC_POOLS: LazyLock<Mutex<HashMap<ClientConfig, reqwest::Client>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

static BLOCKING_POOLS: LazyLock<Mutex<HashMap<ClientConfig, reqwest::blocking::Client>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Returns the cached async client for `config`, constructing it on first use.
///
/// The returned handle is a cheap clone sharing the cached client's
/// connection pool. Construction is lazy and network-free; socket and DNS
/// errors surface only once a request is issued.
pub(crate) fn pooled_client(config: &ClientConfig) -> Result<reqwest::Client, NimbleError> {
    let mut pools = ASYNC_POOLS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(client) = pools.get(config) {
        return Ok(client.clone());
    }
    let client = build_async(config)?;
    pools.insert(config.clone(), client.clone());
    Ok(client)
}

/// Blocking counterpart of [`pooled_client`], backed by its own cache map.
pub(crate) fn pooled_blocking_client(
    config: &ClientConfig,
) -> Result<reqwest::blocking::Client, NimbleError> {
    let mut pools = BLOCKING_POOLS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(client) = pools.get(config) {
        return Ok(client.clone());
    }
    let client = build_blocking(config)?;
    pools.insert(config.clone(), client.clone());
    Ok(client)
}

/// Drops every cached client in both maps.
///
/// Pools close once their last in-flight clone is dropped; teardown is
/// reqwest's and never raises. Intended as an explicit shutdown hook —
/// subsequent requests simply rebuild their pools.
pub fn clear_pool_cache() {
    ASYNC_POOLS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
    BLOCKING_POOLS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

fn build_async(config: &ClientConfig) -> Result<reqwest::Client, NimbleError> {
    let mut builder = reqwest::Client::builder()
        .default_headers(default_headers(config)?)
        .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| NimbleError::Config(format!("failed to build HTTP client: {err}")))
}

fn build_blocking(config: &ClientConfig) -> Result<reqwest::blocking::Client, NimbleError> {
    let mut builder = reqwest::blocking::Client::builder()
        .default_headers(default_headers(config)?)
        .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    } else {
        // The blocking builder defaults to a 30 s timeout; None must mean
        // no timeout on both call styles.
        builder = builder.timeout(None);
    }
    builder
        .build()
        .map_err(|err| NimbleError::Config(format!("failed to build HTTP client: {err}")))
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap, NimbleError> {
    let mut authorization = HeaderValue::from_str(&bearer_authorization(&config.api_key))
        .map_err(|_| NimbleError::Config("API key contains invalid header bytes".to_owned()))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert("X-Client-Source", HeaderValue::from_static(CLIENT_SOURCE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Prefixes the key with `Bearer ` unless a bearer prefix is already present.
fn bearer_authorization(api_key: &str) -> String {
    let trimmed = api_key.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}

#[cfg(test)]
pub(crate) fn async_cache_len() -> usize {
    ASYNC_POOLS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .len()
}

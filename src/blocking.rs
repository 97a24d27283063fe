//! Blocking variant of the client.
//!
//! Same endpoints, same retry policy, same cache-key scheme — but backed by
//! `reqwest::blocking` and its own pool cache, so a blocking and an async
//! client for the same config never share a pooled client. Backoff waits use
//! `std::thread::sleep`; one thread is occupied per in-flight request, and
//! callers scale out with their own threads.

use std::thread;

use crate::{
    decode::decode_documents,
    factory,
    retry::{self, RetryDecision},
    ClientConfig, Document, ExtractParams, NimbleError, Result, SearchParams,
};

/// Blocking HTTP client for the Nimble search and extract endpoints.
///
/// Must not be used from within an async runtime; use
/// [`NimbleClient`](crate::NimbleClient) there instead.
#[derive(Clone, Debug)]
pub struct BlockingClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl BlockingClient {
    /// Creates a client for the production endpoint with default options.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Creates a client from an explicit configuration.
    ///
    /// Returns [`NimbleError::Config`] when the API key is empty.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(NimbleError::Config("API key must not be empty".to_owned()));
        }
        let http = factory::pooled_blocking_client(&config)?;
        Ok(Self { http, config })
    }

    /// Creates a client from `NIMBLE_*` environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Runs a web search and returns the retrieved documents.
    pub fn search(&self, params: &SearchParams) -> Result<Vec<Document>> {
        let body = self.send_with_retry("search", params)?;
        decode_documents(&body)
    }

    /// Extracts content from the given URLs and returns one document per
    /// successfully extracted page.
    pub fn extract(&self, params: &ExtractParams) -> Result<Vec<Document>> {
        let body = self.send_with_retry("extract", params)?;
        decode_documents(&body)
    }

    fn send_with_retry<T: serde::Serialize>(&self, route: &str, payload: &T) -> Result<String> {
        let url = format!("{}/{route}", self.config.base_url);
        let mut attempt = 0usize;
        loop {
            let outcome = self.http.post(&url).json(payload).send();
            match outcome {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().map_err(NimbleError::from_transport)?;
                    match retry::on_status(
                        status,
                        attempt,
                        self.config.max_retries,
                        self.config.retry_backoff,
                    ) {
                        RetryDecision::Accept => {
                            if status.is_success() {
                                return Ok(body);
                            }
                            return Err(NimbleError::from_status(status, body));
                        }
                        RetryDecision::RetryAfter(delay) => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(
                                status = status.as_u16(),
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                "retrying after server error"
                            );
                            thread::sleep(delay);
                            attempt += 1;
                        }
                    }
                }
                Err(err) => {
                    match retry::on_transport_error(
                        attempt,
                        self.config.max_retries,
                        self.config.retry_backoff,
                    ) {
                        Some(delay) => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                error = %err,
                                "retrying after transport error"
                            );
                            thread::sleep(delay);
                            attempt += 1;
                        }
                        None => return Err(NimbleError::from_transport(err)),
                    }
                }
            }
        }
    }
}

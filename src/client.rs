use tokio::time::sleep;

use crate::{
    decode::decode_documents,
    factory,
    retry::{self, RetryDecision},
    ClientConfig, Document, ExtractParams, NimbleError, Result, SearchParams,
};

/// Async HTTP client for the Nimble search and extract endpoints.
///
/// Obtaining a client is cheap: the underlying pooled `reqwest` client comes
/// from a process-wide cache keyed by the [`ClientConfig`] tuple, so every
/// `NimbleClient` built from an equal config shares one connection pool.
#[derive(Clone, Debug)]
pub struct NimbleClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl NimbleClient {
    /// Creates a client for the production endpoint with default options.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nimble_http::NimbleClient;
    ///
    /// let client = NimbleClient::new("my-api-key").expect("valid key");
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Creates a client from an explicit configuration.
    ///
    /// Returns [`NimbleError::Config`] when the API key is empty. The
    /// underlying pool is fetched from (or inserted into) the process-wide
    /// cache; no network activity happens until the first request.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(NimbleError::Config("API key must not be empty".to_owned()));
        }
        let http = factory::pooled_client(&config)?;
        Ok(Self { http, config })
    }

    /// Creates a client from `NIMBLE_*` environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Runs a web search and returns the retrieved documents.
    ///
    /// Result count, ordering and relevance are the API's; this client does
    /// no re-ranking or deduplication.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Document>> {
        let body = self.send_with_retry("search", params).await?;
        decode_documents(&body)
    }

    /// Extracts content from the given URLs and returns one document per
    /// successfully extracted page.
    pub async fn extract(&self, params: &ExtractParams) -> Result<Vec<Document>> {
        let body = self.send_with_retry("extract", params).await?;
        decode_documents(&body)
    }

    /// Sends one logical request, resending on 5xx responses and transport
    /// failures per the retry policy in [`crate::retry`].
    ///
    /// Status and error conversion happens here, above the classification:
    /// the loop itself only decides accept vs resend. Backoff sleeps go
    /// through `tokio::time::sleep`, so waiting requests never occupy a
    /// worker thread.
    async fn send_with_retry<T: serde::Serialize>(&self, route: &str, payload: &T) -> Result<String> {
        let url = format!("{}/{route}", self.config.base_url);
        let mut attempt = 0usize;
        loop {
            let outcome = self.http.post(&url).json(payload).send().await;
            match outcome {
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .map_err(NimbleError::from_transport)?;
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
                            sleep(delay).await;
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
                            sleep(delay).await;
                            attempt += 1;
                        }
                        None => return Err(NimbleError::from_transport(err)),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NimbleClient;
    use crate::NimbleError;

    #[test]
    fn empty_api_key_is_rejected_by_the_constructor() {
        let err = NimbleClient::new("   ").expect_err("must reject empty key");
        assert!(matches!(err, NimbleError::Config(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        // Built directly to keep the process-wide cache untouched; cache
        // behavior is covered in the factory tests.
        let client = NimbleClient {
            http: reqwest::Client::new(),
            config: crate::ClientConfig::new("secret-token"),
        };
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-token"));
    }
}

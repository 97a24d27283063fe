use std::env;
use std::fmt;
use std::time::Duration;

/// Production endpoint for the Nimble retrieval API.
pub const DEFAULT_BASE_URL: &str = "https://nimble-retriever.webit.live";

/// Value of the `X-Client-Source` header sent with every request.
pub const CLIENT_SOURCE: &str = "nimble-http";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);
const DEFAULT_MAX_RETRIES: usize = 2;
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Configures credentials, endpoint and retry behavior for one client.
///
/// The full field tuple doubles as the key of the process-wide pool cache:
/// two configs with identical fields resolve to the same pooled HTTP client,
/// while a difference in any single field yields an independent pool.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
    /// Nimble API key, sent as a bearer credential.
    pub api_key: String,
    /// Base address of the API, without a trailing slash.
    pub base_url: String,
    /// Per-attempt request timeout. `None` disables the timeout entirely.
    pub timeout: Option<Duration>,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Backoff time unit for the exponential retry delay series.
    pub retry_backoff: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .finish()
    }
}

impl ClientConfig {
    /// Builds a config for the production endpoint with default timeout
    /// (100 s) and retry budget (2).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Some(DEFAULT_TIMEOUT),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Overrides the base address, trimming any trailing slash.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url = base_url.into();
        self.base_url = url.trim_end_matches('/').to_owned();
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables the per-attempt timeout.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Sets the retry budget. Zero disables retries entirely; values above 5
    /// are legal but rarely useful against a rate-limited upstream.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff time unit (delay before retry `n` is `unit * 2^n`).
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Builds a config from environment variables.
    ///
    /// Reads:
    /// - `NIMBLE_API_KEY` — required, must be non-empty
    /// - `NIMBLE_API_URL` — optional base address override
    /// - `NIMBLE_MAX_RETRIES` — optional retry budget override
    /// - `NIMBLE_TIMEOUT_SECS` — optional per-attempt timeout override
    pub fn from_env() -> Result<Self, crate::NimbleError> {
        let api_key = env::var("NIMBLE_API_KEY")
            .map_err(|_| crate::NimbleError::Config("missing NIMBLE_API_KEY".to_owned()))?;
        if api_key.trim().is_empty() {
            return Err(crate::NimbleError::Config(
                "NIMBLE_API_KEY is set but empty".to_owned(),
            ));
        }

        let mut config = Self::new(api_key.trim());
        if let Ok(url) = env::var("NIMBLE_API_URL") {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }
        if let Ok(raw) = env::var("NIMBLE_MAX_RETRIES") {
            let retries = raw.trim().parse::<usize>().map_err(|_| {
                crate::NimbleError::Config(format!("invalid NIMBLE_MAX_RETRIES value '{raw}'"))
            })?;
            config = config.with_max_retries(retries);
        }
        if let Ok(raw) = env::var("NIMBLE_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                crate::NimbleError::Config(format!("invalid NIMBLE_TIMEOUT_SECS value '{raw}'"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

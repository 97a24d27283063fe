/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum NimbleError {
    /// Non-success HTTP status in the 4xx range. Never retried.
    #[error("Nimble API request failed with client error ({status}): {body}")]
    Client { status: u16, body: String },
    /// Non-success HTTP status in the 5xx range, surfaced after the retry
    /// budget was exhausted.
    #[error("Nimble API request failed with server error ({status}): {body}")]
    Server { status: u16, body: String },
    /// A request attempt exceeded the configured timeout.
    #[error("Nimble API request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    /// Network or request execution error from `reqwest`, surfaced after the
    /// retry budget was exhausted.
    #[error("Nimble API request failed with network error: {0}")]
    Transport(#[source] reqwest::Error),
    /// Response decoding or protocol-shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
    /// Invalid or missing client configuration (empty API key, builder
    /// failure, malformed environment override).
    #[error("configuration error: {0}")]
    Config(String),
}

impl NimbleError {
    /// Splits a terminal non-success status into the client/server variants.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        if status.is_client_error() {
            Self::Client {
                status: status.as_u16(),
                body,
            }
        } else {
            Self::Server {
                status: status.as_u16(),
                body,
            }
        }
    }

    /// Classifies a terminal transport failure, separating timeouts from
    /// other network errors.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }
}

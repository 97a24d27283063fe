//! Retry policy shared by the async and blocking clients.
//!
//! The policy is pure: it classifies one attempt's outcome and computes the
//! backoff delay. The send loops in [`crate::client`] and [`crate::blocking`]
//! drive it with their own suspend primitive (`tokio::time::sleep` vs
//! `std::thread::sleep`), so both call styles follow identical rules.

use std::time::Duration;

use reqwest::StatusCode;

/// What the send loop should do after receiving an HTTP response.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RetryDecision {
    /// Return the response as-is. Covers success, 4xx (client errors are not
    /// transient) and a terminal 5xx once the budget is exhausted.
    Accept,
    /// Sleep for the given delay, then resend.
    RetryAfter(Duration),
}

/// Delay preceding retry attempt `attempt` (0-indexed): `unit * 2^attempt`.
/// No jitter; the exponent is clamped to keep the multiplication in range.
pub(crate) fn backoff_delay(attempt: usize, unit: Duration) -> Duration {
    let exp = attempt.min(16) as u32;
    unit.saturating_mul(1u32 << exp)
}

/// Classifies a completed attempt by status code.
pub(crate) fn on_status(
    status: StatusCode,
    attempt: usize,
    max_retries: usize,
    unit: Duration,
) -> RetryDecision {
    if status.is_server_error() && attempt < max_retries {
        RetryDecision::RetryAfter(backoff_delay(attempt, unit))
    } else {
        RetryDecision::Accept
    }
}

/// Classifies a failed attempt (network/transport error).
///
/// `Some(delay)` means sleep and resend; `None` means the budget is exhausted
/// and the failure propagates to the caller.
pub(crate) fn on_transport_error(
    attempt: usize,
    max_retries: usize,
    unit: Duration,
) -> Option<Duration> {
    (attempt < max_retries).then(|| backoff_delay(attempt, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: Duration = Duration::from_secs(1);

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff_delay(0, UNIT), Duration::from_secs(1));
        assert_eq!(backoff_delay(1, UNIT), Duration::from_secs(2));
        assert_eq!(backoff_delay(2, UNIT), Duration::from_secs(4));
        assert_eq!(backoff_delay(3, UNIT), Duration::from_secs(8));
    }

    #[test]
    fn total_delay_for_k_retries_is_geometric_sum() {
        let k: usize = 4;
        let total: Duration = (0..k).map(|n| backoff_delay(n, UNIT)).sum();
        assert_eq!(total, UNIT * ((1u32 << k) - 1));
    }

    #[test]
    fn success_and_client_errors_accept_immediately() {
        assert_eq!(on_status(StatusCode::OK, 0, 5, UNIT), RetryDecision::Accept);
        assert_eq!(
            on_status(StatusCode::NOT_FOUND, 0, 5, UNIT),
            RetryDecision::Accept
        );
        assert_eq!(
            on_status(StatusCode::TOO_MANY_REQUESTS, 0, 5, UNIT),
            RetryDecision::Accept
        );
    }

    #[test]
    fn server_errors_retry_until_budget_exhausted() {
        assert_eq!(
            on_status(StatusCode::SERVICE_UNAVAILABLE, 0, 2, UNIT),
            RetryDecision::RetryAfter(Duration::from_secs(1))
        );
        assert_eq!(
            on_status(StatusCode::SERVICE_UNAVAILABLE, 1, 2, UNIT),
            RetryDecision::RetryAfter(Duration::from_secs(2))
        );
        // Exhausted: the terminal 5xx response is returned as-is.
        assert_eq!(
            on_status(StatusCode::SERVICE_UNAVAILABLE, 2, 2, UNIT),
            RetryDecision::Accept
        );
    }

    #[test]
    fn zero_budget_never_retries() {
        assert_eq!(
            on_status(StatusCode::INTERNAL_SERVER_ERROR, 0, 0, UNIT),
            RetryDecision::Accept
        );
        assert_eq!(on_transport_error(0, 0, UNIT), None);
    }

    #[test]
    fn transport_errors_retry_then_propagate() {
        assert_eq!(on_transport_error(0, 2, UNIT), Some(Duration::from_secs(1)));
        assert_eq!(on_transport_error(1, 2, UNIT), Some(Duration::from_secs(2)));
        assert_eq!(on_transport_error(2, 2, UNIT), None);
    }
}

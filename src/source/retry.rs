//! Retry and backoff helpers for image downloads.

use std::time::Duration;

/// Default number of retry attempts for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (500 ms).
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Maximum delay cap for exponential backoff (30 seconds).
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(30);

/// Whether a reqwest error is a transient network failure worth retrying.
///
/// Connection failures, timeouts and interrupted bodies are transient;
/// malformed URLs, redirect loops and decode errors are not.
pub fn is_transient_network_error(error: &reqwest::Error) -> bool {
    if error.is_connect() || error.is_timeout() || error.is_body() {
        return true;
    }
    error
        .status()
        .is_some_and(|status| is_transient_status(status.as_u16()))
}

/// Whether an HTTP status signals a temporary server-side condition.
///
/// 429 Too Many Requests, 502 Bad Gateway, 503 Service Unavailable and
/// 504 Gateway Timeout.
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 429 | 502 | 503 | 504)
}

/// Parse a `Retry-After` header given in whole seconds.
pub fn parse_retry_after(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Exponential backoff: `min(base * 2^attempt + base / 2, max)`.
pub fn calculate_backoff(attempt: u32, base: Duration, max: Duration) -> Duration {
    let exponential = base.saturating_mul(2u32.saturating_pow(attempt));
    exponential.saturating_add(base / 2).min(max)
}

/// Delay before the next attempt, honoring a server-provided hint.
pub fn next_delay(
    attempt: u32,
    retry_after_secs: Option<u64>,
    base: Duration,
    max: Duration,
) -> Duration {
    match retry_after_secs {
        Some(secs) => Duration::from_secs(secs).min(max),
        None => calculate_backoff(attempt, base, max),
    }
}

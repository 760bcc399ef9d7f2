//! HTTP download of source images.

use std::time::Duration;

use futures_util::StreamExt;

use super::retry::{
    is_transient_network_error, is_transient_status, next_delay, parse_retry_after,
    DEFAULT_BACKOFF_BASE, DEFAULT_BACKOFF_MAX, DEFAULT_MAX_RETRIES,
};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on downloaded bytes (50 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// Download limits and retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub max_bytes: u64,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            max_bytes: DEFAULT_MAX_BYTES,
            backoff_base: DEFAULT_BACKOFF_BASE,
            backoff_max: DEFAULT_BACKOFF_MAX,
        }
    }
}

/// Errors that can occur while downloading an image.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with status {status}")]
    Status {
        status: u16,
        /// Retry-After header value in seconds, if provided
        retry_after_secs: Option<u64>,
    },

    #[error("Response exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("Network error: {message} (after {attempts} attempts)")]
    Exhausted { message: String, attempts: u32 },
}

impl FetchError {
    fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => is_transient_network_error(e),
            FetchError::Status { status, .. } => is_transient_status(*status),
            _ => false,
        }
    }
}

/// HTTP client for image downloads.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    options: FetchOptions,
}

impl Fetcher {
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .user_agent(concat!("glyphcast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Download `url`, retrying transient failures with backoff.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Exhausted` once retries run out on transient
    /// failures, or the first non-transient error as-is (4xx statuses,
    /// oversized bodies, invalid URLs).
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let max_retries = self.options.max_retries;
        let mut last_error = String::new();
        let mut attempts = 0u32;

        for attempt in 0..=max_retries {
            attempts = attempt + 1;

            let err = match self.fetch_once(url).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.is_transient() => e,
                Err(e) => return Err(e),
            };
            last_error = err.to_string();

            if attempt >= max_retries {
                log::error!(
                    "Download of {} failed after {} attempts: {}",
                    url,
                    attempts,
                    err
                );
                break;
            }

            let retry_after = match err {
                FetchError::Status {
                    retry_after_secs, ..
                } => retry_after_secs,
                _ => None,
            };
            let delay = next_delay(
                attempt,
                retry_after,
                self.options.backoff_base,
                self.options.backoff_max,
            );
            log::warn!(
                "Download failed (attempt {}/{}): {}. Retrying in {:?}...",
                attempt + 1,
                max_retries + 1,
                last_error,
                delay
            );
            tokio::time::sleep(delay).await;
        }

        Err(FetchError::Exhausted {
            message: last_error,
            attempts,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                retry_after_secs: parse_retry_after(&response),
            });
        }

        let limit = self.options.max_bytes;
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(FetchError::TooLarge { limit });
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if (body.len() + chunk.len()) as u64 > limit {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        log::debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

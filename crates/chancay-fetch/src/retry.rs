//! Fetch configuration, errors, and backoff.

use std::time::Duration;

use thiserror::Error;

/// Configuration for the quarterly statement fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Maximum concurrent quarter fetches.
    pub concurrency: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed fetches.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

/// Errors that can occur while talking to a statement source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Could not reach the source.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("Fetch timed out after {0} attempts")]
    Timeout(u32),

    /// The source returned an error for this quarter.
    #[error("Source error for {quarter}: {message}")]
    Source {
        /// The quarter being fetched.
        quarter: String,
        /// The source's error message.
        message: String,
    },

    /// The payload could not be decoded.
    #[error("Corrupt payload: {0}")]
    Corrupt(String),
}

impl FetchError {
    /// Returns true if a retry can reasonably succeed.
    ///
    /// Corrupt payloads are not retryable: the source would return the
    /// same bytes again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) | Self::Source { .. } => true,
            Self::Corrupt(_) => false,
        }
    }
}

/// Calculates the backoff delay with exponential backoff and jitter.
#[must_use]
pub fn backoff_delay(config: &FetchConfig, attempt: u32) -> Duration {
    // Exponential backoff: base_delay * 2^attempt
    let exp_delay = config.base_delay_ms.saturating_mul(1u64 << attempt.min(10));
    let capped_delay = exp_delay.min(config.max_delay_ms);

    // Deterministic jitter (±25%), avoiding a random number generator.
    let jitter_range = capped_delay / 4;
    let jitter = if jitter_range > 0 {
        let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
        jitter_offset.saturating_sub(jitter_range)
    } else {
        0
    };

    let final_delay = (capped_delay as i64 + jitter as i64).max(100) as u64;
    Duration::from_millis(final_delay)
}

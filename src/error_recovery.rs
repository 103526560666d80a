// src/error_recovery.rs
//! Retry with exponential backoff for graph API requests.

use crate::error::FetchError;
use std::time::Duration;

/// Retries an async operation with exponential backoff.
///
/// Only failures the [`FetchError`] itself marks retryable get another
/// attempt; auth and decode failures surface immediately. Once the
/// attempt budget is spent, the last failure is returned as-is, so
/// callers always see exactly one terminal error.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, FetchError>>,
{
    let mut delay = initial_delay;
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_retryable() {
                    return Err(e);
                }
                last_error = Some(e);

                if attempt < max_attempts {
                    log::warn!("Attempt {} failed, retrying after {:?}", attempt, delay);
                    tokio::time::sleep(delay).await;

                    delay = std::cmp::min(delay * 2, max_delay);
                }
            }
        }
    }

    Err(last_error.unwrap_or(FetchError::Transport {
        code: None,
        message: "retry budget spent with no recorded error".to_string(),
    }))
}

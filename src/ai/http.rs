//! Retry wrapper for requests to the generation service.
//!
//! Transient failures (rate limits, gateway errors, connect timeouts) get a
//! bounded number of retries with exponential backoff and jitter. Anything
//! else is returned to the caller as-is.

use anyhow::{Context, Result};
use rand::Rng;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

const BASE_DELAY_SECS: u64 = 1;
const MAX_RETRIES: usize = 3;

fn is_retriable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn is_retriable_send_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_body()
}

/// Exponential backoff with up to 25% added jitter.
fn backoff_delay(attempt: usize) -> Duration {
    let multiplier = 1u64.checked_shl(attempt as u32).unwrap_or(u64::MAX);
    let base = Duration::from_secs(BASE_DELAY_SECS.saturating_mul(multiplier));

    let max_jitter_ms = (base.as_millis() / 4).min(u128::from(u64::MAX)) as u64;
    if max_jitter_ms == 0 {
        return base;
    }
    base + Duration::from_millis(rand::thread_rng().gen_range(0..=max_jitter_ms))
}

pub(super) async fn send_with_retry(
    mut make_request: impl FnMut() -> reqwest::RequestBuilder,
) -> Result<reqwest::Response> {
    let max_attempts = MAX_RETRIES + 1;

    for attempt in 0..max_attempts {
        match make_request().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() || !is_retriable_status(status) || attempt == MAX_RETRIES {
                    return Ok(response);
                }

                let delay = backoff_delay(attempt);
                debug!(
                    "generation request returned {}; retrying in {:?} ({}/{})",
                    status,
                    delay,
                    attempt + 1,
                    max_attempts
                );
                let _ = response.bytes().await;
                sleep(delay).await;
            }
            Err(err) => {
                if !is_retriable_send_error(&err) || attempt == MAX_RETRIES {
                    return Err(anyhow::Error::new(err)).with_context(|| {
                        format!("generation request failed after {} attempt(s)", attempt + 1)
                    });
                }

                let delay = backoff_delay(attempt);
                debug!(
                    "generation request error: {}; retrying in {:?} ({}/{})",
                    err,
                    delay,
                    attempt + 1,
                    max_attempts
                );
                sleep(delay).await;
            }
        }
    }

    unreachable!("send_with_retry returns within max_attempts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_statuses() {
        assert!(is_retriable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retriable_status(StatusCode::BAD_GATEWAY));
        assert!(!is_retriable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retriable_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_backoff_grows() {
        assert!(backoff_delay(0) >= Duration::from_secs(1));
        assert!(backoff_delay(2) >= Duration::from_secs(4));
    }
}

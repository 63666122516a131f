//! Retry logic for weather lookups.
//!
//! Two failure lanes with different pacing:
//! - HTTP 429 (rate limited): linear, attempt-indexed delay
//! - anything else (non-success status, transport error, malformed body):
//!   exponential backoff
//!
//! Both draw from the same attempt budget; exhausting it surfaces
//! `WeatherError::Unavailable`.

use std::future::Future;
use std::time::Duration;

use crate::error::WeatherError;

/// Default retry configuration
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RATE_LIMIT_STEP_MS: u64 = 1500;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget (the first try included)
    pub max_attempts: u32,
    /// Step of the linear delay applied after a 429
    pub rate_limit_step: Duration,
    /// Base of the exponential delay applied after other failures (doubles per attempt)
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rate_limit_step: Duration::from_millis(DEFAULT_RATE_LIMIT_STEP_MS),
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with custom settings
    pub fn new(max_attempts: u32, rate_limit_step_ms: u64, backoff_base_ms: u64) -> Self {
        Self {
            max_attempts,
            rate_limit_step: Duration::from_millis(rate_limit_step_ms),
            backoff_base: Duration::from_millis(backoff_base_ms),
        }
    }

    /// Delay after a rate-limited attempt (0-indexed): step, 2*step, 3*step, ...
    pub fn rate_limit_delay(&self, attempt: u32) -> Duration {
        self.rate_limit_step * (attempt + 1)
    }

    /// Delay after any other failed attempt (0-indexed): base, 2*base, 4*base, ...
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt)
    }
}

/// Why a single fetch attempt failed.
#[derive(Debug)]
pub enum AttemptError {
    /// HTTP 429 - waits the linear rate-limit delay before the next attempt
    RateLimited,
    /// Any other failure - waits the exponential backoff
    Other(String),
}

/// Run `operation` until it succeeds or the attempt budget is spent.
///
/// # Example
/// ```ignore
/// let body = with_retry(&policy, || async {
///     let response = client.get(url).send().await.map_err(...)?;
///     classify(response).await
/// }).await?;
/// ```
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T, WeatherError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    for attempt in 0..policy.max_attempts {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!("Weather request succeeded on attempt {}", attempt + 1);
                }
                return Ok(value);
            }
            Err(AttemptError::RateLimited) => {
                tracing::warn!(
                    "Weather endpoint rate limited (429), attempt {} of {}",
                    attempt + 1,
                    policy.max_attempts
                );
                if attempt + 1 < policy.max_attempts {
                    tokio::time::sleep(policy.rate_limit_delay(attempt)).await;
                }
            }
            Err(AttemptError::Other(reason)) => {
                tracing::warn!(
                    "Weather request failed on attempt {} of {}: {}",
                    attempt + 1,
                    policy.max_attempts,
                    reason
                );
                if attempt + 1 < policy.max_attempts {
                    tokio::time::sleep(policy.backoff_delay(attempt)).await;
                }
            }
        }
    }

    tracing::error!("All {} weather attempts exhausted", policy.max_attempts);
    Err(WeatherError::Unavailable {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.rate_limit_step, Duration::from_millis(1500));
        assert_eq!(policy.backoff_base, Duration::from_millis(500));
    }

    #[test]
    fn test_rate_limit_delay_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.rate_limit_delay(0), Duration::from_millis(1500));
        assert_eq!(policy.rate_limit_delay(1), Duration::from_millis(3000));
        assert_eq!(policy.rate_limit_delay(2), Duration::from_millis(4500));
    }

    #[test]
    fn test_backoff_delay_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(0), Duration::from_millis(500));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, 1, 1);
        let calls = AtomicU32::new(0);
        let calls_ref = &calls;

        let result = with_retry(&policy, move || async move {
            if calls_ref.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AttemptError::Other("boom".into()))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_surfaces_unavailable() {
        let policy = RetryPolicy::new(3, 1, 1);
        let calls = AtomicU32::new(0);
        let calls_ref = &calls;

        let result: Result<i32, _> = with_retry(&policy, move || async move {
            calls_ref.fetch_add(1, Ordering::SeqCst);
            Err(AttemptError::RateLimited)
        })
        .await;

        assert!(matches!(
            result,
            Err(WeatherError::Unavailable { attempts: 3 })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}

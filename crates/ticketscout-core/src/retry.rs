//! Retry logic with exponential backoff and jitter.
//!
//! Retrying is a layer around a single transport attempt and knows nothing about
//! caching or response decoding.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Backoff strategy for retrying failed requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed {
        /// Delay between retries.
        delay: Duration,
    },
    /// Uses an exponential delay between retries.
    ///
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(250),
            factor: 2.0,
            max: Duration::from_secs(4),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let seconds = base.as_secs_f64() * factor.powi(exponent);
                let capped_seconds = seconds.min(max.as_secs_f64());

                let mut delay = Duration::from_secs_f64(capped_seconds);

                if jitter {
                    let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                    let jitter_ms = millis / 2;
                    let random_offset = fastrand::u64(0..=(jitter_ms * 2));
                    delay = Duration::from_millis((millis - jitter_ms).saturating_add(random_offset));
                }

                delay
            }
        }
    }
}

/// Retry budget and pacing for marketplace calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::exponential(3)
    }
}

impl RetryPolicy {
    pub fn exponential(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::default(),
        }
    }

    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed { delay },
        }
    }

    pub fn no_retry() -> Self {
        Self::fixed(Duration::ZERO, 0)
    }

    /// 429 and every 5xx are worth another attempt; everything else is final.
    pub const fn should_retry_status(status: u16) -> bool {
        status == 429 || (status >= 500 && status <= 599)
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

/// Failure of a single attempt, as judged by the operation itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError<E> {
    Retryable(E),
    Fatal(E),
}

/// Terminal failure of a retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// The operation reported a non-retryable failure.
    Fatal { attempts: u32, error: E },
    /// Every attempt failed with a retryable error; carries the last one.
    Exhausted { attempts: u32, last: E },
}

/// Runs `operation` until it succeeds, fails fatally, or the retry budget is spent.
///
/// `operation` receives the 0-based attempt number.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttemptError<E>>>,
    E: std::fmt::Display,
{
    let mut attempt = 0_u32;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Fatal(error)) => {
                return Err(RetryError::Fatal {
                    attempts: attempt + 1,
                    error,
                })
            }
            Err(AttemptError::Retryable(error)) => {
                if attempt >= policy.max_retries {
                    return Err(RetryError::Exhausted {
                        attempts: attempt + 1,
                        last: error,
                    });
                }

                let delay = policy.delay_for_attempt(attempt);
                debug!(
                    attempt = attempt + 1,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    %error,
                    "retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_fixed_backoff() {
        let backoff = Backoff::Fixed {
            delay: Duration::from_millis(100),
        };

        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(10), Duration::from_millis(100));
    }

    #[test]
    fn test_exponential_backoff() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            factor: 2.0,
            max: Duration::from_secs(1),
            jitter: false,
        };

        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(1), Duration::from_millis(200));
        assert_eq!(backoff.delay(2), Duration::from_millis(400));
        assert_eq!(backoff.delay(3), Duration::from_millis(800));
        assert_eq!(backoff.delay(4), Duration::from_secs(1)); // capped
    }

    #[test]
    fn test_exponential_backoff_with_jitter_stays_in_band() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            factor: 2.0,
            max: Duration::from_secs(1),
            jitter: true,
        };

        for _ in 0..10 {
            for attempt in 0..5 {
                let delay_ms = backoff.delay(attempt).as_millis() as f64;
                let expected = (100.0 * 2_f64.powi(attempt as i32)).min(1000.0);
                assert!(delay_ms >= expected * 0.5, "attempt={attempt}, delay_ms={delay_ms}");
                assert!(delay_ms <= expected * 1.5, "attempt={attempt}, delay_ms={delay_ms}");
            }
        }
    }

    #[test]
    fn retryable_statuses_are_rate_limit_and_server_errors() {
        assert!(RetryPolicy::should_retry_status(429));
        assert!(RetryPolicy::should_retry_status(500));
        assert!(RetryPolicy::should_retry_status(503));
        assert!(!RetryPolicy::should_retry_status(400));
        assert!(!RetryPolicy::should_retry_status(401));
        assert!(!RetryPolicy::should_retry_status(404));
        assert!(!RetryPolicy::should_retry_status(422));
    }

    #[tokio::test]
    async fn stops_after_max_retries_and_returns_last_error() {
        let policy = RetryPolicy::fixed(Duration::ZERO, 2);
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = retry_with_backoff(&policy, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(AttemptError::Retryable(format!("boom {attempt}"))) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            result,
            Err(RetryError::Exhausted {
                attempts: 3,
                last: String::from("boom 2"),
            })
        );
    }

    #[tokio::test]
    async fn fatal_error_is_not_retried() {
        let policy = RetryPolicy::fixed(Duration::ZERO, 5);
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = retry_with_backoff(&policy, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Fatal(String::from("denied"))) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(RetryError::Fatal { attempts: 1, .. })));
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let policy = RetryPolicy::fixed(Duration::ZERO, 3);

        let result = retry_with_backoff(&policy, |attempt| async move {
            if attempt < 2 {
                Err(AttemptError::Retryable(String::from("busy")))
            } else {
                Ok(attempt)
            }
        })
        .await;

        assert_eq!(result, Ok(2));
    }
}

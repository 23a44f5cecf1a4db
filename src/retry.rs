//! Retry with exponential backoff and jitter for remote calls.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{error, warn};

use crate::circuit_breaker::CircuitBreaker;
use crate::config::RecoveryConfig;
use crate::errors::CrossieError;

/// Backoff before retry number `attempt` (1-based), jitter excluded
pub fn backoff_delay(config: &RecoveryConfig, attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    let delay = config
        .base_retry_delay_ms
        .saturating_mul(1u64 << exp)
        .min(config.max_retry_delay_ms);
    Duration::from_millis(delay)
}

fn with_jitter(delay: Duration) -> Duration {
    let max_jitter = (delay.as_millis() / 4) as u64;
    if max_jitter == 0 {
        return delay;
    }
    delay + Duration::from_millis(rand::thread_rng().gen_range(0..=max_jitter))
}

/// Run `operation` until it succeeds, fails permanently or runs out of retries
///
/// Every attempt goes through the circuit breaker; an open circuit fails
/// immediately with [`CrossieError::CircuitOpen`].
pub async fn with_retry<T, F, Fut>(
    config: &RecoveryConfig,
    breaker: &CircuitBreaker,
    operation: &str,
    mut f: F,
) -> Result<T, CrossieError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CrossieError>>,
{
    let mut attempt = 0;
    loop {
        if breaker.is_open() {
            warn!(operation, "Circuit breaker open, skipping remote call");
            return Err(CrossieError::CircuitOpen);
        }

        match f().await {
            Ok(value) => {
                breaker.record_success();
                return Ok(value);
            }
            Err(e) => {
                breaker.record_failure();
                attempt += 1;
                if !e.is_retryable() || attempt > config.max_retries {
                    error!(operation, attempts = attempt, error = %e, "Remote call failed");
                    return Err(e);
                }
                let delay = with_jitter(backoff_delay(config, attempt));
                warn!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Remote call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_retries: u32) -> RecoveryConfig {
        RecoveryConfig {
            max_retries,
            base_retry_delay_ms: 1,
            max_retry_delay_ms: 2,
            circuit_breaker_threshold: 100,
            ..Default::default()
        }
    }

    #[test]
    fn test_backoff_is_capped() {
        let config = RecoveryConfig::default();
        assert_eq!(backoff_delay(&config, 1), Duration::from_millis(1000));
        assert_eq!(backoff_delay(&config, 2), Duration::from_millis(2000));
        assert_eq!(backoff_delay(&config, 10), Duration::from_millis(10000));
    }

    #[tokio::test]
    async fn test_retries_transient_errors() {
        let config = fast_config(3);
        let breaker = CircuitBreaker::new(config.clone());
        let calls = AtomicU32::new(0);

        let result = with_retry(&config, &breaker, "test", || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(CrossieError::Transport("reset".into()))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(breaker.failure_count(), 0);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let config = fast_config(3);
        let breaker = CircuitBreaker::new(config.clone());
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&config, &breaker, "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(CrossieError::Auth("invalid_grant".into()))
        })
        .await;

        assert!(matches!(result, Err(CrossieError::Auth(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let config = fast_config(2);
        let breaker = CircuitBreaker::new(config.clone());
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&config, &breaker, "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(CrossieError::Http { status: 503, message: "unavailable".into() })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_open_circuit_fails_fast() {
        let config = RecoveryConfig { circuit_breaker_threshold: 1, ..fast_config(0) };
        let breaker = CircuitBreaker::new(config.clone());
        breaker.record_failure();

        let result: Result<(), _> = with_retry(&config, &breaker, "test", || async { Ok(()) }).await;
        assert_eq!(result, Err(CrossieError::CircuitOpen));
    }
}

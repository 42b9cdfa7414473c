//! Rate-limit retry with exponential backoff.
//!
//! A wrapper around the transport call of a critic backend, kept out of the
//! orchestrator so the policy is swappable independently of business logic.
//! Backoff sleeps are plain suspension points holding no locks; dropping
//! the future cancels cleanly between attempts.

use std::time::Duration;

use tracing::warn;

use super::error::CriticError;

/// Bounded exponential backoff policy for rate-limited transport calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempt budget (first call included). Must be at least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each one after.
    pub base_delay: Duration,
    /// Adds up to +50% clock-derived jitter to each delay.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            jitter: true,
        }
    }
}

/// Runs `call` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is spent.
///
/// Only [`CriticError::RateLimited`] is retried; anything else surfaces
/// unchanged on the attempt that produced it. Exhaustion yields
/// [`CriticError::Unavailable`] carrying the attempt count.
pub async fn with_backoff<T, F, Fut>(policy: RetryPolicy, mut call: F) -> Result<T, CriticError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CriticError>>,
{
    let mut delay = policy.base_delay;
    let mut last_message = String::new();

    for attempt in 1..=policy.max_attempts.max(1) {
        match call().await {
            Ok(value) => return Ok(value),
            Err(CriticError::RateLimited { message }) => {
                last_message = message;
                if attempt == policy.max_attempts.max(1) {
                    break;
                }

                let wait = if policy.jitter { jittered(delay) } else { delay };
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    wait_ms = wait.as_millis() as u64,
                    "critic rate limited, backing off"
                );
                tokio::time::sleep(wait).await;
                delay = delay.saturating_mul(2);
            }
            Err(other) => return Err(other),
        }
    }

    Err(CriticError::Unavailable {
        attempts: policy.max_attempts.max(1),
        message: last_message,
    })
}

/// Adds up to +50% jitter derived from the wall clock's subsecond nanos.
fn jittered(delay: Duration) -> Duration {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);

    let extra_ms = (delay.as_millis() as u64).saturating_mul(u64::from(nanos % 512)) / 1024;
    delay + Duration::from_millis(extra_ms)
}

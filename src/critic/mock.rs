use std::sync::atomic::{AtomicU32, Ordering};

use super::error::CriticError;
use super::retry::{RetryPolicy, with_backoff};
use super::types::CriticVerdict;
use super::Critic;

/// Deterministic offline critic.
///
/// Always compiled (selecting `mock` in configuration is a supported way to
/// run without any model backend), and scriptable for tests: a canned
/// verdict plus an optional run of leading rate-limit failures that
/// exercise the same backoff wrapper the network backends use.
pub struct MockCritic {
    confidence: f32,
    explanation: String,
    fallback_answer: Option<String>,
    rate_limit_first: u32,
    policy: RetryPolicy,
    calls: AtomicU32,
}

impl Default for MockCritic {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCritic {
    /// Creates a critic that always reports confidence 90 with a canned
    /// fallback answer.
    pub fn new() -> Self {
        Self {
            confidence: 90.0,
            explanation: "mock critic: fixed confidence".to_string(),
            fallback_answer: Some(
                "The documents did not contain the answer; this is the mock \
                 critic's canned general-knowledge fallback."
                    .to_string(),
            ),
            rate_limit_first: 0,
            policy: RetryPolicy {
                base_delay: std::time::Duration::from_millis(10),
                jitter: false,
                ..RetryPolicy::default()
            },
            calls: AtomicU32::new(0),
        }
    }

    /// Sets the reported confidence.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets or clears the fallback answer.
    pub fn with_fallback(mut self, fallback: Option<String>) -> Self {
        self.fallback_answer = fallback;
        self
    }

    /// Makes the first `n` transport calls fail with a rate-limit signal.
    pub fn rate_limited_first(mut self, n: u32) -> Self {
        self.rate_limit_first = n;
        self
    }

    /// Replaces the retry policy (defaults to 5 fast attempts).
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of transport-level calls made so far (retries included).
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Critic for MockCritic {
    async fn validate(&self, _question: &str, _excerpt: &str) -> Result<CriticVerdict, CriticError> {
        with_backoff(self.policy, || async {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.rate_limit_first {
                return Err(CriticError::RateLimited {
                    message: format!("scripted rate limit on call {call}"),
                });
            }

            Ok(CriticVerdict {
                confidence: self.confidence,
                explanation: self.explanation.clone(),
                fallback_answer: self.fallback_answer.clone(),
            })
        })
        .await
    }
}

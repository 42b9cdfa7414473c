use thiserror::Error;

/// Errors from critic validation calls.
///
/// Only [`CriticError::RateLimited`] is transient; the retry wrapper
/// absorbs it up to the configured attempt budget and converts exhaustion
/// into [`CriticError::Unavailable`]. Everything else surfaces immediately.
#[derive(Debug, Error)]
pub enum CriticError {
    /// The backend signalled a rate limit. Retried with backoff inside the
    /// critic; invisible to the orchestrator unless retries exhaust.
    #[error("critic rate limited: {message}")]
    RateLimited { message: String },

    /// The retry budget is spent. Terminal: the orchestrator surfaces this
    /// as a pipeline failure rather than guessing a decision.
    #[error("critic unavailable after {attempts} attempts: {message}")]
    Unavailable { attempts: u32, message: String },

    /// The backend violated the response contract (unparsable JSON,
    /// out-of-range confidence, or a low-confidence verdict without
    /// fallback text). Not retried: the same input would likely recur.
    #[error("critic returned a malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// Authentication or authorization failure. Not retried.
    #[error("critic authentication failed: {message}")]
    AuthFailed { message: String },

    /// Transport-level failure (network unreachable, per-attempt timeout).
    /// Not retried.
    #[error("critic backend unreachable: {message}")]
    Unreachable { message: String },
}

impl CriticError {
    /// Returns `true` for failures the backoff wrapper may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CriticError::RateLimited { .. })
    }
}

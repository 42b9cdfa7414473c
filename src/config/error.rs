//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
///
/// All of these are fatal at construction time: a pipeline is never built
/// from a configuration that failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Critic backend name is not one of `remote`, `local`, `mock`.
    ///
    /// Unknown backends fail fast here rather than silently defaulting,
    /// so a typo in deployment config can never swap in the wrong critic.
    #[error("unknown critic backend '{value}': expected one of 'remote', 'local', 'mock'")]
    UnknownBackend { value: String },

    /// An environment variable was set but could not be parsed.
    #[error("failed to parse {var}='{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// A threshold is outside its valid range.
    ///
    /// Similarity thresholds live on the cosine scale [-1, 1]; confidence
    /// thresholds live on the critic's 0-100 scale. A value outside its
    /// range almost always means the two scales were mixed up.
    #[error("{name} {value} is outside the valid range [{min}, {max}]")]
    ThresholdOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// `top_k` must be at least 1.
    #[error("top_k must be at least 1")]
    ZeroTopK,

    /// The retry policy must allow at least one attempt.
    #[error("retry max_attempts must be at least 1")]
    ZeroRetryAttempts,
}

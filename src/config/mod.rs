//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERITOR_*` environment
//! variables. A [`Config`] is an immutable snapshot: one instance serves
//! many questions, and per-call threshold changes go through
//! [`QueryOverrides`] rather than mutation.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::critic::RetryPolicy;

/// Default query-instruction prefix for BGE-family embedding models.
///
/// BGE retrieval models score better when queries (not documents) carry this
/// prefix. It must be applied to every query so scores stay comparable
/// across calls; set `VERITOR_QUERY_INSTRUCTION` to an empty string for
/// embedding families that do not use one.
pub const DEFAULT_QUERY_INSTRUCTION: &str =
    "Represent this sentence for searching relevant passages: ";

/// Default Qdrant URL used when `VERITOR_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default Ollama URL used when `VERITOR_OLLAMA_URL` is not set.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Which critic backend a pipeline talks to.
///
/// The three variants are siblings behind the [`Critic`](crate::critic::Critic)
/// contract; selection is a configuration value, never runtime guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticBackend {
    /// Hosted LLM via the `genai` provider client.
    Remote,
    /// Locally hosted model behind an Ollama endpoint.
    Local,
    /// Deterministic offline critic for reproducible runs.
    Mock,
}

impl FromStr for CriticBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            "mock" => Ok(Self::Mock),
            _ => Err(ConfigError::UnknownBackend {
                value: s.to_string(),
            }),
        }
    }
}

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERITOR_*` overrides on top of
/// defaults, then [`Config::validate`] before constructing a pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of candidates retrieved per question. Default: `5`.
    pub top_k: usize,

    /// Scope-gate floor on the best cosine similarity. Default: `0.20`.
    ///
    /// Relevant passages typically score 0.20-0.60 with BGE embeddings;
    /// tune after inspecting your own score distribution.
    pub similarity_threshold: f32,

    /// Confidence-gate floor on the critic's 0-100 confidence. Default: `85.0`.
    pub confidence_threshold: f32,

    /// Selected critic backend. Default: [`CriticBackend::Local`].
    pub critic_backend: CriticBackend,

    /// Instruction prefix applied to every query before embedding.
    pub query_instruction: String,

    /// Model name for the remote critic. Default: `gemini-2.5-flash`.
    ///
    /// Provider credentials are resolved by the `genai` client from its
    /// usual environment variables (e.g. `GEMINI_API_KEY`).
    pub remote_model: String,

    /// Model name for the local critic. Default: `gemma3:4b`.
    pub ollama_model: String,

    /// Ollama endpoint URL. Default: `http://localhost:11434`.
    pub ollama_url: String,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Qdrant collection holding the passage index. Default: `veritor_passages`.
    pub collection_name: String,

    /// Max critic transport attempts on rate-limit failures. Default: `5`.
    pub retry_max_attempts: u32,

    /// Base backoff delay, doubled each attempt. Default: `1s`.
    pub retry_base_delay: Duration,

    /// Whether backoff delays get random jitter. Default: `true`.
    pub retry_jitter: bool,

    /// Per-attempt timeout on critic transport calls. Default: `30s`.
    ///
    /// Independent of the backoff delays between attempts.
    pub critic_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_k: 5,
            similarity_threshold: 0.20,
            confidence_threshold: 85.0,
            critic_backend: CriticBackend::Local,
            query_instruction: DEFAULT_QUERY_INSTRUCTION.to_string(),
            remote_model: "gemini-2.5-flash".to_string(),
            ollama_model: "gemma3:4b".to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection_name: "veritor_passages".to_string(),
            retry_max_attempts: 5,
            retry_base_delay: Duration::from_secs(1),
            retry_jitter: true,
            critic_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    const ENV_TOP_K: &'static str = "VERITOR_TOP_K";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "VERITOR_SIMILARITY_THRESHOLD";
    const ENV_CONFIDENCE_THRESHOLD: &'static str = "VERITOR_CONFIDENCE_THRESHOLD";
    const ENV_CRITIC_BACKEND: &'static str = "VERITOR_CRITIC_BACKEND";
    const ENV_QUERY_INSTRUCTION: &'static str = "VERITOR_QUERY_INSTRUCTION";
    const ENV_REMOTE_MODEL: &'static str = "VERITOR_REMOTE_MODEL";
    const ENV_OLLAMA_MODEL: &'static str = "VERITOR_OLLAMA_MODEL";
    const ENV_OLLAMA_URL: &'static str = "VERITOR_OLLAMA_URL";
    const ENV_QDRANT_URL: &'static str = "VERITOR_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "VERITOR_COLLECTION";
    const ENV_RETRY_MAX_ATTEMPTS: &'static str = "VERITOR_RETRY_MAX_ATTEMPTS";
    const ENV_RETRY_BASE_DELAY_MS: &'static str = "VERITOR_RETRY_BASE_DELAY_MS";
    const ENV_RETRY_JITTER: &'static str = "VERITOR_RETRY_JITTER";
    const ENV_CRITIC_TIMEOUT_SECS: &'static str = "VERITOR_CRITIC_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// A variable that is set but unparsable is a [`ConfigError`], never a
    /// silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let top_k = Self::parse_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let similarity_threshold =
            Self::parse_from_env(Self::ENV_SIMILARITY_THRESHOLD, defaults.similarity_threshold)?;
        let confidence_threshold =
            Self::parse_from_env(Self::ENV_CONFIDENCE_THRESHOLD, defaults.confidence_threshold)?;

        let critic_backend = match env::var(Self::ENV_CRITIC_BACKEND) {
            Ok(value) => value.parse()?,
            Err(_) => defaults.critic_backend,
        };

        let retry_max_attempts =
            Self::parse_from_env(Self::ENV_RETRY_MAX_ATTEMPTS, defaults.retry_max_attempts)?;
        let retry_base_delay_ms: u64 = Self::parse_from_env(
            Self::ENV_RETRY_BASE_DELAY_MS,
            defaults.retry_base_delay.as_millis() as u64,
        )?;
        let retry_jitter = Self::parse_from_env(Self::ENV_RETRY_JITTER, defaults.retry_jitter)?;
        let critic_timeout_secs: u64 = Self::parse_from_env(
            Self::ENV_CRITIC_TIMEOUT_SECS,
            defaults.critic_timeout.as_secs(),
        )?;

        Ok(Self {
            top_k,
            similarity_threshold,
            confidence_threshold,
            critic_backend,
            query_instruction: Self::string_from_env(
                Self::ENV_QUERY_INSTRUCTION,
                defaults.query_instruction,
            ),
            remote_model: Self::string_from_env(Self::ENV_REMOTE_MODEL, defaults.remote_model),
            ollama_model: Self::string_from_env(Self::ENV_OLLAMA_MODEL, defaults.ollama_model),
            ollama_url: Self::string_from_env(Self::ENV_OLLAMA_URL, defaults.ollama_url),
            qdrant_url: Self::string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url),
            collection_name: Self::string_from_env(Self::ENV_COLLECTION, defaults.collection_name),
            retry_max_attempts,
            retry_base_delay: Duration::from_millis(retry_base_delay_ms),
            retry_jitter,
            critic_timeout: Duration::from_secs(critic_timeout_secs),
        })
    }

    /// Validates threshold scales and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }

        if self.retry_max_attempts == 0 {
            return Err(ConfigError::ZeroRetryAttempts);
        }

        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "similarity_threshold",
                value: self.similarity_threshold,
                min: -1.0,
                max: 1.0,
            });
        }

        if !(0.0..=100.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "confidence_threshold",
                value: self.confidence_threshold,
                min: 0.0,
                max: 100.0,
            });
        }

        Ok(())
    }

    /// Returns the retry policy derived from this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            base_delay: self.retry_base_delay,
            jitter: self.retry_jitter,
        }
    }

    fn parse_from_env<T>(var: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var) {
            Ok(value) => value.trim().parse().map_err(|e: T::Err| {
                ConfigError::InvalidValue {
                    var,
                    value,
                    reason: e.to_string(),
                }
            }),
            Err(_) => Ok(default),
        }
    }

    fn string_from_env(var: &'static str, default: String) -> String {
        env::var(var).unwrap_or(default)
    }
}

/// Per-call threshold overrides.
///
/// A functional override: the shared [`Config`] is never mutated, and a
/// field left `None` falls back to the configured value.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOverrides {
    /// Replaces [`Config::similarity_threshold`] for this call.
    pub similarity_threshold: Option<f32>,
    /// Replaces [`Config::confidence_threshold`] for this call.
    pub confidence_threshold: Option<f32>,
}

impl QueryOverrides {
    /// Overrides only the scope-gate threshold.
    pub fn similarity(threshold: f32) -> Self {
        Self {
            similarity_threshold: Some(threshold),
            ..Self::default()
        }
    }

    /// Overrides only the confidence-gate threshold.
    pub fn confidence(threshold: f32) -> Self {
        Self {
            confidence_threshold: Some(threshold),
            ..Self::default()
        }
    }
}

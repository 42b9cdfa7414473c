//! The Critic port: independent validation of retrieved excerpts.
//!
//! Three sibling backends share one contract - [`RemoteCritic`] (hosted
//! LLM), [`LocalCritic`] (Ollama) and [`MockCritic`] (deterministic,
//! offline). None inherits from another; [`CriticHandle`] dispatches over
//! the configured variant. Rate-limit retry lives in [`retry`] as a
//! wrapper around each backend's transport call, not in the orchestrator.

pub mod error;
pub mod local;
pub mod mock;
pub mod prompt;
pub mod remote;
pub mod retry;
pub mod types;


pub use error::CriticError;
pub use local::LocalCritic;
pub use mock::MockCritic;
pub use remote::RemoteCritic;
pub use retry::{RetryPolicy, with_backoff};
pub use types::CriticVerdict;

use crate::config::{Config, CriticBackend};

/// Validation capability every critic backend implements.
pub trait Critic: Send + Sync {
    /// Scores how well `excerpt` answers `question`.
    ///
    /// At most one verdict per call; transient rate limits are absorbed
    /// internally per the backend's retry policy.
    fn validate(
        &self,
        question: &str,
        excerpt: &str,
    ) -> impl std::future::Future<Output = Result<CriticVerdict, CriticError>> + Send;
}

/// Tagged dispatch over the configured critic backend.
pub enum CriticHandle {
    Remote(RemoteCritic),
    Local(LocalCritic),
    Mock(MockCritic),
}

impl CriticHandle {
    /// Builds the backend selected by `config.critic_backend`.
    ///
    /// Unknown backend names never reach this point: they fail at
    /// configuration parse time.
    pub fn from_config(config: &Config) -> Self {
        match config.critic_backend {
            CriticBackend::Remote => Self::Remote(RemoteCritic::new(
                &config.remote_model,
                config.retry_policy(),
                config.critic_timeout,
            )),
            CriticBackend::Local => Self::Local(LocalCritic::new(
                &config.ollama_url,
                &config.ollama_model,
                config.retry_policy(),
                config.critic_timeout,
            )),
            CriticBackend::Mock => Self::Mock(MockCritic::new()),
        }
    }

    /// Returns a short backend tag (useful for logging).
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Remote(_) => "remote",
            Self::Local(_) => "local",
            Self::Mock(_) => "mock",
        }
    }
}

impl Critic for CriticHandle {
    async fn validate(&self, question: &str, excerpt: &str) -> Result<CriticVerdict, CriticError> {
        match self {
            Self::Remote(critic) => critic.validate(question, excerpt).await,
            Self::Local(critic) => critic.validate(question, excerpt).await,
            Self::Mock(critic) => critic.validate(question, excerpt).await,
        }
    }
}

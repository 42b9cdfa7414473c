use thiserror::Error;

use crate::critic::CriticError;
use crate::index::IndexError;

/// Failures surfaced by a pipeline call instead of a decision.
///
/// Transient critic failures never appear here; they are absorbed by the
/// critic's retry wrapper. What does arrive is terminal for the call, and
/// the caller decides user-visible behavior.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Retrieval failed (unbuilt index, vector DB unreachable, ...).
    #[error("similarity index error: {0}")]
    Index(#[from] IndexError),

    /// The critic failed terminally (retry exhaustion, contract violation,
    /// auth, transport).
    #[error("critic error: {0}")]
    Critic(#[from] CriticError),
}

impl PipelineError {
    /// Returns `true` when retrying the whole question later could
    /// plausibly succeed (the critic was temporarily unavailable).
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            PipelineError::Critic(CriticError::Unavailable { .. })
        )
    }
}

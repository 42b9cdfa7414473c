use serde::{Deserialize, Serialize};

/// Result of one validation call.
///
/// The critic may return a fallback answer regardless of where the
/// confidence lands; the confidence gate (not the critic) decides which
/// field the final decision uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticVerdict {
    /// How well the excerpt answers the question, on a 0-100 scale.
    pub confidence: f32,
    /// Short rationale from the judge.
    pub explanation: String,
    /// General-knowledge answer, populated when the critic judged the
    /// excerpt insufficient. Presence is a convention, not a guarantee:
    /// the orchestrator treats a missing fallback on a failed confidence
    /// gate as a contract violation.
    pub fallback_answer: Option<String>,
}

impl CriticVerdict {
    /// Creates a verdict with no fallback answer.
    pub fn new(confidence: f32, explanation: impl Into<String>) -> Self {
        Self {
            confidence,
            explanation: explanation.into(),
            fallback_answer: None,
        }
    }

    /// Attaches a fallback answer.
    pub fn with_fallback(mut self, answer: impl Into<String>) -> Self {
        self.fallback_answer = Some(answer.into());
        self
    }

    /// Returns the fallback answer if it carries non-whitespace text.
    ///
    /// An empty or blank fallback is treated as absent, so a backend
    /// cannot satisfy the contract with `""`.
    pub fn usable_fallback(&self) -> Option<&str> {
        self.fallback_answer
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

//! The orchestrator: Actor -> Scope Gate -> Critic -> Confidence Gate.
//!
//! Strictly linear per question, at most one critic call, never loops:
//!
//! ```text
//! Start -> ScopeCheck -> OutOfScope            (terminal, critic skipped)
//!                     -> CriticValidation -> ConfidenceCheck -> Document
//!                                                            -> GeneralKnowledge
//! ```
//!
//! A [`Pipeline`] holds no mutable cross-question state; concurrent
//! questions against one instance (e.g. behind an `Arc`) need no
//! coordination. Cancellation drops the in-flight future without side
//! effects: a call either completes with a full [`Decision`] or fails.

pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::PipelineError;
pub use types::Decision;

use tracing::{debug, info};

use crate::config::{Config, ConfigError, QueryOverrides};
use crate::critic::{Critic, CriticError};
use crate::gate::{MIN_SIMILARITY, passes_confidence, passes_scope};
use crate::index::SimilarityIndex;
use crate::retrieval::Retriever;

/// Actor-Critic decision pipeline.
///
/// Instantiate once with an immutable [`Config`] snapshot; call
/// [`Pipeline::answer`] many times.
pub struct Pipeline<I, C> {
    retriever: Retriever<I>,
    critic: C,
    config: Config,
}

impl<I: SimilarityIndex, C: Critic> Pipeline<I, C> {
    /// Builds a pipeline, validating the configuration first.
    pub fn new(index: I, critic: C, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let retriever = Retriever::new(index, config.query_instruction.clone());
        Ok(Self {
            retriever,
            critic,
            config,
        })
    }

    /// Returns the configuration snapshot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Answers one question with the configured thresholds.
    pub async fn answer(&self, question: &str) -> Result<Decision, PipelineError> {
        self.answer_with(question, QueryOverrides::default()).await
    }

    /// Answers one question, overriding thresholds for this call only.
    pub async fn answer_with(
        &self,
        question: &str,
        overrides: QueryOverrides,
    ) -> Result<Decision, PipelineError> {
        let similarity_threshold = overrides
            .similarity_threshold
            .unwrap_or(self.config.similarity_threshold);
        let confidence_threshold = overrides
            .confidence_threshold
            .unwrap_or(self.config.confidence_threshold);

        // Step 1: the Actor retrieves candidates. An empty retrieval is out
        // of scope no matter where the threshold sits.
        let candidates = self.retriever.retrieve(question, self.config.top_k).await?;
        let Some(best) = candidates.first() else {
            info!("retrieval returned no candidates, question out of scope");
            return Ok(Decision::OutOfScope {
                best_score: MIN_SIMILARITY,
            });
        };
        let best_score = best.similarity;

        // Step 2: scope gate. Failing here deliberately skips the critic
        // call entirely; out-of-scope questions cost no model latency.
        if !passes_scope(best_score, similarity_threshold) {
            info!(
                best_score,
                threshold = similarity_threshold,
                "question out of scope"
            );
            return Ok(Decision::OutOfScope { best_score });
        }

        // Step 3: the Critic validates the single best excerpt. Terminal
        // critic failures propagate; a guessed decision is never returned.
        let verdict = self.critic.validate(question, &best.passage.text).await?;

        debug!(
            confidence = verdict.confidence,
            threshold = confidence_threshold,
            explanation = %verdict.explanation,
            "critic verdict"
        );

        // Step 4: confidence gate.
        if passes_confidence(verdict.confidence, confidence_threshold) {
            info!(
                source = %best.passage.source,
                page = best.passage.page,
                similarity = best.similarity,
                confidence = verdict.confidence,
                "high confidence, returning document excerpt"
            );
            return Ok(Decision::Document {
                excerpt: best.passage.text.clone(),
                source_file: best.passage.source.clone(),
                page: best.passage.page,
                similarity: best.similarity,
                confidence: verdict.confidence,
            });
        }

        // Step 5: low confidence falls back to the critic's own knowledge.
        // A low-confidence verdict without fallback text violates the
        // critic contract and is surfaced, not papered over.
        let answer = verdict
            .usable_fallback()
            .ok_or_else(|| CriticError::MalformedResponse {
                reason: format!(
                    "low-confidence verdict ({}) carried no fallback answer",
                    verdict.confidence
                ),
            })?
            .to_string();

        info!(
            confidence = verdict.confidence,
            "low confidence, falling back to general knowledge"
        );
        Ok(Decision::GeneralKnowledge {
            answer,
            confidence: verdict.confidence,
        })
    }
}

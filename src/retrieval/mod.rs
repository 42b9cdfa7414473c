//! The Actor: retrieval and distance-to-similarity scoring.
//!
//! Converts the index's raw Euclidean distances into bounded cosine
//! similarities and hands the orchestrator a descending-sorted candidate
//! list. Holds no state across queries.

pub mod types;

#[cfg(test)]
mod tests;

pub use types::{ScoredCandidate, similarity_from_distance};

use std::cmp::Ordering;
use tracing::debug;

use crate::index::{IndexError, SimilarityIndex};

/// Retrieval front-end over a similarity index.
pub struct Retriever<I> {
    index: I,
    query_instruction: String,
}

impl<I: SimilarityIndex> Retriever<I> {
    /// Creates a retriever applying `query_instruction` to every query.
    ///
    /// The prefix must be applied consistently for every call so scores
    /// stay comparable; an empty string disables it.
    pub fn new(index: I, query_instruction: impl Into<String>) -> Self {
        Self {
            index,
            query_instruction: query_instruction.into(),
        }
    }

    /// Returns the underlying index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Retrieves up to `k` candidates for `query`, scored and sorted
    /// descending by similarity (stable on ties).
    ///
    /// The result is empty only when the index itself is empty. Index
    /// failures (including an unbuilt index) propagate unchanged; they are
    /// fatal to the pipeline call.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredCandidate>, IndexError> {
        let prefixed = format!("{}{}", self.query_instruction, query);
        let vector = self.index.embed(&prefixed).await?;
        let raw = self.index.search(vector, k).await?;

        let mut candidates: Vec<ScoredCandidate> =
            raw.into_iter().map(ScoredCandidate::from_candidate).collect();

        // sort_by is stable: ties keep the index's original order.
        candidates.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });

        if let Some(best) = candidates.first() {
            debug!(
                query_len = query.len(),
                candidates = candidates.len(),
                best_similarity = best.similarity,
                best_source = %best.passage.source,
                "retrieval complete"
            );
        } else {
            debug!(query_len = query.len(), "retrieval returned no candidates");
        }

        Ok(candidates)
    }
}

use crate::index::{Passage, RetrievalCandidate};

/// Converts a raw Euclidean distance between unit vectors into cosine
/// similarity.
///
/// For unit-normalized `a`, `b`: `|a - b|² = 2 - 2·cos(a, b)`, so
/// `cos(a, b) = 1 - d²/2`. The result lands in [-1, 1]: 1 is identical
/// direction, 0 orthogonal, negative opposed. Only valid when the index
/// operates on unit-normalized vectors, which is the embedder's invariant
/// to uphold.
#[inline]
pub fn similarity_from_distance(distance: f32) -> f32 {
    1.0 - (distance * distance) / 2.0
}

/// A retrieval candidate with its distance converted to a bounded
/// similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub passage: Passage,
    /// Cosine similarity in [-1, 1] (higher is more similar).
    pub similarity: f32,
}

impl ScoredCandidate {
    /// Scores a raw candidate.
    pub fn from_candidate(candidate: RetrievalCandidate) -> Self {
        Self {
            similarity: similarity_from_distance(candidate.distance),
            passage: candidate.passage,
        }
    }
}

//! Pure threshold gates.
//!
//! Both gates are total functions over their domain: they never fail and
//! have no side effects. Threshold scale mismatches are a configuration
//! error caught at construction ([`ConfigError`](crate::config::ConfigError)),
//! never a runtime one here.

/// Lowest possible cosine similarity; the best score attributed to an
/// empty candidate set, so the scope gate always fails on it.
pub const MIN_SIMILARITY: f32 = -1.0;

/// Scope gate: is the best retrieval similarity good enough to consult
/// the documents at all?
#[inline]
pub fn passes_scope(best_score: f32, threshold: f32) -> bool {
    best_score >= threshold
}

/// Confidence gate: does the critic trust the excerpt enough to return it
/// verbatim? Both values are on the 0-100 scale.
#[inline]
pub fn passes_confidence(confidence: f32, threshold: f32) -> bool {
    confidence >= threshold
}

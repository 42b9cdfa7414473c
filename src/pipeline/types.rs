use serde::Serialize;

/// Terminal outcome of one question.
///
/// Exactly one variant per question; each carries only the fields that
/// exist on its path, plus enough provenance for a caller to render where
/// an answer came from. Serializes with a `source` tag
/// (`document` / `general_knowledge` / `out_of_scope`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Decision {
    /// Both gates passed: the excerpt is returned verbatim, never
    /// rewritten by a model.
    Document {
        excerpt: String,
        source_file: String,
        page: u32,
        similarity: f32,
        confidence: f32,
    },
    /// Scope passed but confidence failed: the critic's own
    /// general-knowledge answer.
    GeneralKnowledge { answer: String, confidence: f32 },
    /// The documents have nothing relevant; no critic call was spent.
    OutOfScope {
        /// Best similarity that failed the gate (-1.0 when retrieval
        /// returned nothing).
        best_score: f32,
    },
}

impl Decision {
    /// Returns `true` for the document path.
    pub fn is_document(&self) -> bool {
        matches!(self, Decision::Document { .. })
    }

    /// Returns `true` for the out-of-scope path.
    pub fn is_out_of_scope(&self) -> bool {
        matches!(self, Decision::OutOfScope { .. })
    }

    /// Critic confidence, when a critic was consulted.
    pub fn confidence(&self) -> Option<f32> {
        match self {
            Decision::Document { confidence, .. }
            | Decision::GeneralKnowledge { confidence, .. } => Some(*confidence),
            Decision::OutOfScope { .. } => None,
        }
    }

    /// The answer text a caller would render, if any.
    pub fn answer_text(&self) -> Option<&str> {
        match self {
            Decision::Document { excerpt, .. } => Some(excerpt),
            Decision::GeneralKnowledge { answer, .. } => Some(answer),
            Decision::OutOfScope { .. } => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Document {
                source_file,
                page,
                similarity,
                confidence,
                ..
            } => write!(
                f,
                "DOCUMENT ({source_file} p.{page}, similarity {similarity:.4}, confidence {confidence:.1})"
            ),
            Decision::GeneralKnowledge { confidence, .. } => {
                write!(f, "GENERAL_KNOWLEDGE (confidence {confidence:.1})")
            }
            Decision::OutOfScope { best_score } => {
                write!(f, "OUT_OF_SCOPE (best_score {best_score:.4})")
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::hashing::hash_passage;

/// Immutable unit of retrievable text.
///
/// Created during ingestion (out of scope here), never mutated. Identity is
/// `(source, page, text)` via [`Passage::id`]; the embedding vector lives in
/// the similarity index and is not duplicated on the passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Raw passage text, returned verbatim on the document path.
    pub text: String,
    /// Source document identifier (typically a file name).
    pub source: String,
    /// Page or location marker within the source.
    pub page: u32,
}

impl Passage {
    /// Creates a passage.
    pub fn new(text: impl Into<String>, source: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            page,
        }
    }

    /// Content-derived identity, used as the index point id.
    pub fn id(&self) -> u64 {
        hash_passage(&self.source, self.page, &self.text)
    }
}

/// A passage paired with the raw distance one query produced.
///
/// Transient: created per query, consumed by the retriever's scoring step.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalCandidate {
    pub passage: Passage,
    /// Raw Euclidean distance between unit vectors (lower is closer).
    pub distance: f32,
}

impl RetrievalCandidate {
    pub fn new(passage: Passage, distance: f32) -> Self {
        Self { passage, distance }
    }
}

use std::collections::HashMap;

use super::error::IndexError;
use super::model::{Passage, RetrievalCandidate};
use super::{Embedder, SimilarityIndex};

/// Exact Euclidean distance between two vectors.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Embedder over a fixed text-to-vector table.
///
/// Deterministic and offline; unknown text is an [`IndexError::EmbeddingFailed`]
/// so tests notice missing registrations instead of silently matching nothing.
#[derive(Debug, Default)]
pub struct MockEmbedder {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: HashMap::new(),
        }
    }

    /// Registers the vector returned for `text`.
    pub fn register(&mut self, text: impl Into<String>, vector: Vec<f32>) {
        self.vectors.insert(text.into(), vector);
    }
}

impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| IndexError::EmbeddingFailed {
                message: format!("no registered embedding for text: {text:?}"),
            })
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// In-memory similarity index with exact Euclidean search.
///
/// Immutable after construction, mirroring the read-only-after-build
/// contract of the production index.
#[derive(Debug, Default)]
pub struct MockSimilarityIndex {
    passages: Vec<(Passage, Vec<f32>)>,
    query_vectors: HashMap<String, Vec<f32>>,
}

impl MockSimilarityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a passage with its stored embedding.
    pub fn add_passage(&mut self, passage: Passage, vector: Vec<f32>) {
        self.passages.push((passage, vector));
    }

    /// Registers the embedding returned for a query text.
    pub fn register_query(&mut self, text: impl Into<String>, vector: Vec<f32>) {
        self.query_vectors.insert(text.into(), vector);
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }
}

impl SimilarityIndex for MockSimilarityIndex {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        self.query_vectors
            .get(text)
            .cloned()
            .ok_or_else(|| IndexError::EmbeddingFailed {
                message: format!("no registered embedding for query: {text:?}"),
            })
    }

    async fn search(&self, query: Vec<f32>, k: usize) -> Result<Vec<RetrievalCandidate>, IndexError> {
        let mut candidates: Vec<RetrievalCandidate> = self
            .passages
            .iter()
            .map(|(passage, vector)| {
                RetrievalCandidate::new(passage.clone(), euclidean_distance(&query, vector))
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        candidates.truncate(k);
        Ok(candidates)
    }
}

//! Similarity-index boundary.
//!
//! The pipeline consumes the index as a black-box capability: `embed` turns
//! text into a fixed-length unit-normalized vector, `search` returns the
//! nearest passages with raw Euclidean distances. The index guarantees the
//! unit-norm invariant; the pipeline assumes it and never verifies.
//!
//! [`QdrantIndex`] is the production backend. Index builds
//! ([`QdrantIndex::upsert_passages`]) are an offline maintenance operation
//! and must not run concurrently with serving; after build the index is
//! shared read-only across all pipeline instances.

pub mod error;
pub mod model;
pub mod qdrant;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::IndexError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEmbedder, MockSimilarityIndex, euclidean_distance};
pub use model::{Passage, RetrievalCandidate};
pub use qdrant::QdrantIndex;

/// Text-to-vector capability consumed by the index.
///
/// Implementations must return unit-normalized vectors of a fixed
/// dimension; everything downstream (the `1 - d²/2` similarity conversion
/// in particular) is only valid under that invariant.
pub trait Embedder: Send + Sync {
    /// Embeds `text` into a unit-normalized vector.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, IndexError>> + Send;

    /// Returns the fixed embedding dimension.
    fn dimension(&self) -> usize;
}

/// Minimal async interface the retriever depends on.
pub trait SimilarityIndex: Send + Sync {
    /// Embeds query text (the index owns the embedding model).
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, IndexError>> + Send;

    /// Returns up to `k` candidates ordered by ascending raw distance.
    fn search(
        &self,
        query: Vec<f32>,
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RetrievalCandidate>, IndexError>> + Send;
}

use thiserror::Error;

/// Errors from the similarity-index boundary.
///
/// All of these are fatal to the pipeline call that hit them; retrieval
/// failures are never retried.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The backing collection does not exist. The index must be built
    /// (an offline operation) before the pipeline can serve questions.
    #[error("similarity index has not been built: collection '{collection}' does not exist")]
    NotBuilt { collection: String },

    /// Could not reach the vector database.
    #[error("failed to connect to vector database at {url}: {message}")]
    ConnectionFailed { url: String, message: String },

    /// A similarity search request failed.
    #[error("search failed in collection '{collection}': {message}")]
    SearchFailed { collection: String, message: String },

    /// An index-build upsert failed.
    #[error("upsert failed in collection '{collection}': {message}")]
    UpsertFailed { collection: String, message: String },

    /// The embedder could not produce a vector.
    #[error("embedding failed: {message}")]
    EmbeddingFailed { message: String },

    /// A vector had the wrong dimension for the collection.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, ScoredPoint, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use std::collections::HashMap;
use tracing::{debug, info};

use super::error::IndexError;
use super::model::{Passage, RetrievalCandidate};
use super::{Embedder, SimilarityIndex};

/// Qdrant-backed similarity index.
///
/// The collection uses Euclidean distance so that, with the embedder's
/// unit-normalized vectors, the retriever's `1 - d²/2` conversion yields
/// exact cosine similarity. Qdrant reports the raw distance as the point
/// score for Euclid collections, ordered ascending.
pub struct QdrantIndex<E> {
    client: Qdrant,
    url: String,
    collection: String,
    embedder: E,
}

impl<E: Embedder> QdrantIndex<E> {
    /// Creates an index client for `url` over `collection`.
    pub fn new(url: &str, collection: &str, embedder: E) -> Result<Self, IndexError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| IndexError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
            embedder,
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Ensures the passage collection exists (creates it if missing).
    ///
    /// Build-time operation; must not run concurrently with serving.
    pub async fn ensure_collection(&self) -> Result<(), IndexError> {
        let exists = self.collection_exists().await?;

        if !exists {
            let vectors_config =
                VectorParamsBuilder::new(self.embedder.dimension() as u64, Distance::Euclid);

            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(vectors_config)
                        .on_disk_payload(true),
                )
                .await
                .map_err(|e| IndexError::UpsertFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;

            info!(collection = %self.collection, "created passage collection");
        }

        Ok(())
    }

    /// Embeds and upserts passages into the collection.
    ///
    /// Build-time operation; must not run concurrently with serving.
    /// Documents are embedded without the query-instruction prefix.
    pub async fn upsert_passages(&self, passages: Vec<Passage>) -> Result<(), IndexError> {
        if passages.is_empty() {
            return Ok(());
        }

        let expected = self.embedder.dimension();
        let mut points = Vec::with_capacity(passages.len());

        for passage in passages {
            let vector = self.embedder.embed(&passage.text).await?;
            if vector.len() != expected {
                return Err(IndexError::InvalidDimension {
                    expected,
                    actual: vector.len(),
                });
            }

            let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
            payload.insert("text".to_string(), passage.text.clone().into());
            payload.insert("source".to_string(), passage.source.clone().into());
            payload.insert("page".to_string(), (passage.page as i64).into());

            points.push(PointStruct::new(passage.id(), vector, payload));
        }

        let count = points.len();
        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| IndexError::UpsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        info!(collection = %self.collection, count, "upserted passages");
        Ok(())
    }

    async fn collection_exists(&self) -> Result<bool, IndexError> {
        self.client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| IndexError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })
    }
}

/// Rebuilds a candidate from a scored point's payload.
///
/// A point without text is unusable and dropped; missing provenance fields
/// degrade to placeholders rather than dropping the candidate.
pub(super) fn candidate_from_scored_point(point: ScoredPoint) -> Option<RetrievalCandidate> {
    let payload = point.payload;

    let text = payload.get("text").and_then(|v| v.as_str())?.to_string();
    let source = payload
        .get("source")
        .and_then(|v| v.as_str())
        .map_or("unknown", String::as_str)
        .to_string();
    let page = payload
        .get("page")
        .and_then(|v| v.as_integer())
        .and_then(|i| u32::try_from(i).ok())
        .unwrap_or(0);

    Some(RetrievalCandidate::new(
        Passage::new(text, source, page),
        point.score,
    ))
}

impl<E: Embedder> SimilarityIndex for QdrantIndex<E> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        self.embedder.embed(text).await
    }

    async fn search(&self, query: Vec<f32>, k: usize) -> Result<Vec<RetrievalCandidate>, IndexError> {
        if !self.collection_exists().await? {
            return Err(IndexError::NotBuilt {
                collection: self.collection.clone(),
            });
        }

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query, k as u64).with_payload(true),
            )
            .await
            .map_err(|e| IndexError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let candidates: Vec<RetrievalCandidate> = search_result
            .result
            .into_iter()
            .filter_map(candidate_from_scored_point)
            .collect();

        debug!(
            collection = %self.collection,
            returned = candidates.len(),
            "similarity search complete"
        );

        Ok(candidates)
    }
}

//! Veritor library crate.
//!
//! An Actor-Critic pipeline for answering natural-language questions against
//! a private document collection. The **Actor** ([`Retriever`]) surfaces
//! candidate passages from a similarity index; the **Critic** (any
//! [`Critic`] backend) independently judges whether the best excerpt
//! actually answers the question. Two pure threshold gates decide the
//! outcome:
//!
//! 1. **Scope gate** on the best retrieval similarity — questions the
//!    document collection knows nothing about exit early as
//!    [`Decision::OutOfScope`] without spending a critic call.
//! 2. **Confidence gate** on the critic's reported confidence — a passing
//!    excerpt is returned verbatim as [`Decision::Document`]; a failing one
//!    falls back to the critic's own general-knowledge answer as
//!    [`Decision::GeneralKnowledge`].
//!
//! # Module Map
//!
//! - [`config`] - Environment-backed configuration and backend selection
//! - [`index`] - Similarity-index boundary (Qdrant backend + traits)
//! - [`retrieval`] - The Actor: distance-to-similarity scoring
//! - [`gate`] - Pure scope/confidence threshold functions
//! - [`critic`] - The Critic port: remote, local and mock backends behind
//!   one contract, with rate-limit retry/backoff
//! - [`pipeline`] - The orchestrator producing one [`Decision`] per question
//!
//! # Test/Mock Support
//!
//! [`MockCritic`] is always compiled: it is a runtime-selectable backend,
//! not only a test aid. The in-memory [`MockSimilarityIndex`] is available
//! behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod critic;
pub mod gate;
pub mod hashing;
pub mod index;
pub mod pipeline;
pub mod retrieval;

pub use config::{Config, ConfigError, CriticBackend, QueryOverrides};
pub use critic::{
    Critic, CriticError, CriticHandle, CriticVerdict, LocalCritic, MockCritic, RemoteCritic,
    RetryPolicy,
};
pub use gate::{MIN_SIMILARITY, passes_confidence, passes_scope};
pub use hashing::{hash_passage, hash_to_u64};
pub use index::{
    Embedder, IndexError, Passage, QdrantIndex, RetrievalCandidate, SimilarityIndex,
};
#[cfg(any(test, feature = "mock"))]
pub use index::{MockEmbedder, MockSimilarityIndex};
pub use pipeline::{Decision, Pipeline, PipelineError};
pub use retrieval::{Retriever, ScoredCandidate, similarity_from_distance};

use super::*;
use crate::config::Config;
use crate::critic::{CriticError, MockCritic, RetryPolicy};
use crate::index::{MockSimilarityIndex, Passage};

use std::time::Duration;

fn unit_vec(cosine: f32) -> Vec<f32> {
    vec![cosine, (1.0 - cosine * cosine).sqrt()]
}

/// Index with one passage at the given cosine similarity to the query "q".
fn index_with_best(cosine: f32) -> MockSimilarityIndex {
    let mut index = MockSimilarityIndex::new();
    index.add_passage(
        Passage::new("Leave accrues at 1.5 days per month.", "handbook.pdf", 12),
        unit_vec(cosine),
    );
    index.register_query("q", vec![1.0, 0.0]);
    index
}

fn test_config() -> Config {
    Config {
        query_instruction: String::new(),
        ..Config::default()
    }
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 5,
        base_delay: Duration::from_millis(10),
        jitter: false,
    }
}

#[tokio::test]
async fn test_out_of_scope_skips_critic() {
    let pipeline = Pipeline::new(
        index_with_best(0.15),
        MockCritic::new().with_confidence(100.0),
        test_config(),
    )
    .unwrap();

    let decision = pipeline.answer("q").await.unwrap();

    match decision {
        Decision::OutOfScope { best_score } => assert!((best_score - 0.15).abs() < 1e-5),
        other => panic!("expected OutOfScope, got {other}"),
    }

    // The deliberate short-circuit: no critic call was spent.
    assert_eq!(pipeline.critic.call_count(), 0);
}

#[tokio::test]
async fn test_empty_index_is_out_of_scope_with_minimum_score() {
    let mut index = MockSimilarityIndex::new();
    index.register_query("q", vec![1.0, 0.0]);

    let pipeline = Pipeline::new(index, MockCritic::new(), test_config()).unwrap();
    let decision = pipeline.answer("q").await.unwrap();

    assert_eq!(
        decision,
        Decision::OutOfScope {
            best_score: crate::gate::MIN_SIMILARITY
        }
    );
}

#[tokio::test]
async fn test_empty_index_short_circuits_even_at_minimum_threshold() {
    // A threshold of -1.0 is valid configuration and would pass the gate
    // for the empty-retrieval sentinel; emptiness must still exit early
    // without touching the critic or the (nonexistent) best candidate.
    let mut index = MockSimilarityIndex::new();
    index.register_query("q", vec![1.0, 0.0]);

    let config = Config {
        similarity_threshold: -1.0,
        ..test_config()
    };
    let pipeline = Pipeline::new(index, MockCritic::new().with_confidence(100.0), config).unwrap();

    let decision = pipeline.answer("q").await.unwrap();
    assert_eq!(
        decision,
        Decision::OutOfScope {
            best_score: crate::gate::MIN_SIMILARITY
        }
    );
    assert_eq!(pipeline.critic.call_count(), 0);
}

#[tokio::test]
async fn test_empty_index_short_circuits_under_permissive_override() {
    let mut index = MockSimilarityIndex::new();
    index.register_query("q", vec![1.0, 0.0]);

    let pipeline = Pipeline::new(index, MockCritic::new(), test_config()).unwrap();

    let decision = pipeline
        .answer_with("q", crate::config::QueryOverrides::similarity(-2.0))
        .await
        .unwrap();
    assert!(decision.is_out_of_scope());
    assert_eq!(pipeline.critic.call_count(), 0);
}

#[tokio::test]
async fn test_high_confidence_returns_document_with_provenance() {
    let pipeline = Pipeline::new(
        index_with_best(0.40),
        MockCritic::new().with_confidence(92.0),
        test_config(),
    )
    .unwrap();

    let decision = pipeline.answer("q").await.unwrap();

    match decision {
        Decision::Document {
            excerpt,
            source_file,
            page,
            similarity,
            confidence,
        } => {
            assert_eq!(excerpt, "Leave accrues at 1.5 days per month.");
            assert_eq!(source_file, "handbook.pdf");
            assert_eq!(page, 12);
            assert!((similarity - 0.40).abs() < 1e-5);
            assert_eq!(confidence, 92.0);
        }
        other => panic!("expected Document, got {other}"),
    }
}

#[tokio::test]
async fn test_low_confidence_returns_general_knowledge() {
    let pipeline = Pipeline::new(
        index_with_best(0.40),
        MockCritic::new()
            .with_confidence(60.0)
            .with_fallback(Some("Leave accrues at 1.5 days per month by statute.".into())),
        test_config(),
    )
    .unwrap();

    let decision = pipeline.answer("q").await.unwrap();

    assert_eq!(
        decision,
        Decision::GeneralKnowledge {
            answer: "Leave accrues at 1.5 days per month by statute.".into(),
            confidence: 60.0,
        }
    );
}

#[tokio::test]
async fn test_low_confidence_without_fallback_is_contract_violation() {
    let pipeline = Pipeline::new(
        index_with_best(0.40),
        MockCritic::new().with_confidence(50.0).with_fallback(None),
        test_config(),
    )
    .unwrap();

    let err = pipeline.answer("q").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Critic(CriticError::MalformedResponse { .. })
    ));
}

#[tokio::test]
async fn test_low_confidence_with_blank_fallback_is_contract_violation() {
    let pipeline = Pipeline::new(
        index_with_best(0.40),
        MockCritic::new()
            .with_confidence(50.0)
            .with_fallback(Some("   ".into())),
        test_config(),
    )
    .unwrap();

    let err = pipeline.answer("q").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Critic(CriticError::MalformedResponse { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_critic_recovers_within_budget() {
    let pipeline = Pipeline::new(
        index_with_best(0.40),
        MockCritic::new()
            .with_confidence(92.0)
            .rate_limited_first(4)
            .with_policy(fast_policy()),
        test_config(),
    )
    .unwrap();

    let decision = pipeline.answer("q").await.unwrap();
    assert!(decision.is_document());
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_critic_surfaces_unavailable() {
    let pipeline = Pipeline::new(
        index_with_best(0.40),
        MockCritic::new()
            .rate_limited_first(u32::MAX)
            .with_policy(fast_policy()),
        test_config(),
    )
    .unwrap();

    let err = pipeline.answer("q").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Critic(CriticError::Unavailable { attempts: 5, .. })
    ));
    assert!(err.is_retriable());
}

#[tokio::test]
async fn test_answer_is_idempotent_with_deterministic_critic() {
    let pipeline = Pipeline::new(
        index_with_best(0.40),
        MockCritic::new().with_confidence(92.0),
        test_config(),
    )
    .unwrap();

    let first = pipeline.answer("q").await.unwrap();
    let second = pipeline.answer("q").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_per_call_override_does_not_mutate_config() {
    let pipeline = Pipeline::new(
        index_with_best(0.15),
        MockCritic::new().with_confidence(92.0),
        test_config(),
    )
    .unwrap();

    // 0.15 fails the default 0.20 gate but passes an overridden 0.10 gate.
    let overridden = pipeline
        .answer_with("q", crate::config::QueryOverrides::similarity(0.10))
        .await
        .unwrap();
    assert!(overridden.is_document());

    // The shared config is untouched; the next plain call gates as before.
    assert_eq!(pipeline.config().similarity_threshold, 0.20);
    let plain = pipeline.answer("q").await.unwrap();
    assert!(plain.is_out_of_scope());
}

#[tokio::test]
async fn test_confidence_override_flips_gate() {
    let pipeline = Pipeline::new(
        index_with_best(0.40),
        MockCritic::new().with_confidence(60.0),
        test_config(),
    )
    .unwrap();

    let decision = pipeline
        .answer_with("q", crate::config::QueryOverrides::confidence(50.0))
        .await
        .unwrap();

    assert!(decision.is_document());
}

#[tokio::test]
async fn test_unbuilt_index_error_propagates() {
    // An unregistered query embedding stands in for an index failure: it
    // surfaces as a PipelineError::Index, fatal to the call.
    let index = MockSimilarityIndex::new();
    let pipeline = Pipeline::new(index, MockCritic::new(), test_config()).unwrap();

    let err = pipeline.answer("q").await.unwrap_err();
    assert!(matches!(err, PipelineError::Index(_)));
    assert!(!err.is_retriable());
}

#[test]
fn test_decision_serializes_with_source_tag() {
    let decision = Decision::OutOfScope { best_score: 0.15 };
    let json = serde_json::to_value(&decision).unwrap();

    assert_eq!(json["source"], "out_of_scope");

    let doc = Decision::Document {
        excerpt: "text".into(),
        source_file: "handbook.pdf".into(),
        page: 3,
        similarity: 0.4,
        confidence: 92.0,
    };
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["source"], "document");
    assert_eq!(json["source_file"], "handbook.pdf");
    assert_eq!(json["page"], 3);
}

#[test]
fn test_decision_accessors() {
    let doc = Decision::Document {
        excerpt: "text".into(),
        source_file: "handbook.pdf".into(),
        page: 3,
        similarity: 0.4,
        confidence: 92.0,
    };
    assert!(doc.is_document());
    assert_eq!(doc.confidence(), Some(92.0));
    assert_eq!(doc.answer_text(), Some("text"));

    let oos = Decision::OutOfScope { best_score: -1.0 };
    assert!(oos.confidence().is_none());
    assert!(oos.answer_text().is_none());
}

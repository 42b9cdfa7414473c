use super::*;
use crate::index::{MockSimilarityIndex, Passage};

fn unit_vec(cosine: f32) -> Vec<f32> {
    vec![cosine, (1.0 - cosine * cosine).sqrt()]
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[test]
fn test_similarity_matches_direct_cosine() {
    // For unit vector pairs, 1 - d²/2 must equal the directly computed
    // cosine similarity within floating-point tolerance.
    let query = vec![1.0, 0.0];
    for cosine in [-1.0_f32, -0.6, -0.1, 0.0, 0.15, 0.2, 0.4, 0.85, 1.0] {
        let passage_vec = unit_vec(cosine);
        let distance = crate::index::euclidean_distance(&query, &passage_vec);

        let converted = similarity_from_distance(distance);
        let direct = dot(&query, &passage_vec);

        assert!(
            (converted - direct).abs() < 1e-5,
            "cosine {cosine}: converted {converted} vs direct {direct}"
        );
    }
}

#[test]
fn test_similarity_endpoints() {
    assert_eq!(similarity_from_distance(0.0), 1.0);
    assert!((similarity_from_distance(2.0_f32.sqrt()) - 0.0).abs() < 1e-6);
    assert!((similarity_from_distance(2.0) - (-1.0)).abs() < 1e-6);
}

#[tokio::test]
async fn test_retrieve_sorts_descending_by_similarity() {
    let mut index = MockSimilarityIndex::new();
    index.add_passage(Passage::new("weak", "a.pdf", 1), unit_vec(0.1));
    index.add_passage(Passage::new("strong", "a.pdf", 2), unit_vec(0.8));
    index.add_passage(Passage::new("medium", "a.pdf", 3), unit_vec(0.4));
    index.register_query("q", vec![1.0, 0.0]);

    let retriever = Retriever::new(index, "");
    let candidates = retriever.retrieve("q", 5).await.unwrap();

    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0].passage.text, "strong");
    assert_eq!(candidates[1].passage.text, "medium");
    assert_eq!(candidates[2].passage.text, "weak");
    assert!(candidates[0].similarity >= candidates[1].similarity);
    assert!(candidates[1].similarity >= candidates[2].similarity);
}

#[tokio::test]
async fn test_retrieve_applies_query_instruction_prefix() {
    let mut index = MockSimilarityIndex::new();
    index.add_passage(Passage::new("text", "a.pdf", 1), unit_vec(0.5));
    // Only the prefixed form is registered; an unprefixed lookup would fail.
    index.register_query("search: what is leave?", vec![1.0, 0.0]);

    let retriever = Retriever::new(index, "search: ");
    let candidates = retriever.retrieve("what is leave?", 5).await.unwrap();

    assert_eq!(candidates.len(), 1);
}

#[tokio::test]
async fn test_retrieve_caps_at_k() {
    let mut index = MockSimilarityIndex::new();
    for page in 0..8 {
        index.add_passage(
            Passage::new(format!("p{page}"), "a.pdf", page),
            unit_vec(0.1 * page as f32),
        );
    }
    index.register_query("q", vec![1.0, 0.0]);

    let retriever = Retriever::new(index, "");
    let candidates = retriever.retrieve("q", 4).await.unwrap();

    assert_eq!(candidates.len(), 4);
}

#[tokio::test]
async fn test_retrieve_empty_index_yields_empty() {
    let mut index = MockSimilarityIndex::new();
    index.register_query("q", vec![1.0, 0.0]);

    let retriever = Retriever::new(index, "");
    let candidates = retriever.retrieve("q", 5).await.unwrap();

    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_retrieve_recovers_registered_cosine() {
    let mut index = MockSimilarityIndex::new();
    index.add_passage(Passage::new("text", "a.pdf", 1), unit_vec(0.40));
    index.register_query("q", vec![1.0, 0.0]);

    let retriever = Retriever::new(index, "");
    let candidates = retriever.retrieve("q", 1).await.unwrap();

    assert!((candidates[0].similarity - 0.40).abs() < 1e-5);
}

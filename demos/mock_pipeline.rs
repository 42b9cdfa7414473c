//! Runs the full decision pipeline offline: mock similarity index, mock
//! critic, no network. Useful for seeing the three decision paths.
//!
//! ```sh
//! RUST_LOG=veritor=debug cargo run --example mock_pipeline --features mock
//! ```

use veritor::{Config, CriticBackend, CriticHandle, MockSimilarityIndex, Passage, Pipeline};

fn unit_vec(cosine: f32) -> Vec<f32> {
    vec![cosine, (1.0 - cosine * cosine).sqrt()]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut index = MockSimilarityIndex::new();
    index.add_passage(
        Passage::new(
            "Annual leave accrues at 1.5 days per completed month of service.",
            "handbook.pdf",
            12,
        ),
        unit_vec(0.45),
    );
    index.register_query("How much annual leave do I accrue?", vec![1.0, 0.0]);
    index.register_query("What is the capital of France?", vec![0.0, -1.0]);

    let config = Config {
        critic_backend: CriticBackend::Mock,
        query_instruction: String::new(),
        ..Config::default()
    };

    let critic = CriticHandle::from_config(&config);
    let pipeline = Pipeline::new(index, critic, config)?;

    for question in [
        "How much annual leave do I accrue?",
        "What is the capital of France?",
    ] {
        let decision = pipeline.answer(question).await?;
        println!("Q: {question}");
        println!("   -> {decision}");
    }

    Ok(())
}

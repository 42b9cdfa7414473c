use std::time::Duration;

use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::debug;

use super::error::CriticError;
use super::prompt::{parse_verdict, validation_prompt};
use super::retry::{RetryPolicy, with_backoff};
use super::types::CriticVerdict;
use super::Critic;

/// Remote-service critic over a hosted LLM.
///
/// Provider credentials are resolved by the `genai` client from its usual
/// environment variables; constructing the critic never touches the
/// network, so a missing key only fails at the first validation call.
pub struct RemoteCritic {
    client: Client,
    model: String,
    policy: RetryPolicy,
    timeout: Duration,
}

impl RemoteCritic {
    /// Creates a remote critic for `model`.
    pub fn new(model: impl Into<String>, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            policy,
            timeout,
        }
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call_model(&self, prompt: &str) -> Result<String, CriticError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt.to_string())]);

        let response = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, request, None),
        )
        .await
        .map_err(|_| CriticError::Unreachable {
            message: format!("validation call timed out after {:?}", self.timeout),
        })?
        .map_err(classify_provider_error)?;

        response
            .first_text()
            .map(|s| s.to_string())
            .ok_or_else(|| CriticError::MalformedResponse {
                reason: "provider returned no text content".to_string(),
            })
    }
}

impl Critic for RemoteCritic {
    async fn validate(&self, question: &str, excerpt: &str) -> Result<CriticVerdict, CriticError> {
        let prompt = validation_prompt(question, excerpt);

        // Retry wraps the transport only; a malformed response after a
        // successful call is never retried.
        let raw = with_backoff(self.policy, || self.call_model(&prompt)).await?;
        let verdict = parse_verdict(&raw)?;

        debug!(
            model = %self.model,
            confidence = verdict.confidence,
            has_fallback = verdict.fallback_answer.is_some(),
            "remote critic verdict"
        );

        Ok(verdict)
    }
}

/// Maps provider errors onto the critic taxonomy.
///
/// `genai` flattens provider responses into display strings, so rate-limit
/// detection is substring-based, matching what the upstream APIs emit
/// (HTTP 429 / RESOURCE_EXHAUSTED).
fn classify_provider_error(error: genai::Error) -> CriticError {
    let message = error.to_string();
    let lowered = message.to_ascii_lowercase();

    if message.contains("429")
        || message.contains("RESOURCE_EXHAUSTED")
        || lowered.contains("rate limit")
        || lowered.contains("too many requests")
    {
        CriticError::RateLimited { message }
    } else if message.contains("401")
        || message.contains("403")
        || lowered.contains("api key")
        || lowered.contains("unauthorized")
        || lowered.contains("permission")
    {
        CriticError::AuthFailed { message }
    } else {
        CriticError::Unreachable { message }
    }
}

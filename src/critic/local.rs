use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CriticError;
use super::prompt::{parse_verdict, validation_prompt};
use super::retry::{RetryPolicy, with_backoff};
use super::types::CriticVerdict;
use super::Critic;

/// Local-inference critic against an Ollama endpoint.
///
/// Same response contract as [`RemoteCritic`](super::RemoteCritic); only
/// transport and latency expectations differ. `format: "json"` asks the
/// model server to constrain output to valid JSON.
pub struct LocalCritic {
    http: reqwest::Client,
    base_url: String,
    model: String,
    policy: RetryPolicy,
    timeout: Duration,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LocalCritic {
    /// Creates a local critic for `model` at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        policy: RetryPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
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
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
        };

        let response = tokio::time::timeout(self.timeout, self.http.post(&url).json(&body).send())
            .await
            .map_err(|_| CriticError::Unreachable {
                message: format!("validation call timed out after {:?}", self.timeout),
            })?
            .map_err(|e| CriticError::Unreachable {
                message: format!("request to {url} failed: {e}"),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CriticError::RateLimited {
                message: format!("{url} returned 429"),
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CriticError::AuthFailed {
                message: format!("{url} returned {status}"),
            });
        }
        if !status.is_success() {
            return Err(CriticError::Unreachable {
                message: format!("{url} returned {status}"),
            });
        }

        let body: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| CriticError::MalformedResponse {
                    reason: format!("invalid generate response body: {e}"),
                })?;

        Ok(body.response)
    }
}

impl Critic for LocalCritic {
    async fn validate(&self, question: &str, excerpt: &str) -> Result<CriticVerdict, CriticError> {
        let prompt = validation_prompt(question, excerpt);

        let raw = with_backoff(self.policy, || self.call_model(&prompt)).await?;
        let verdict = parse_verdict(&raw)?;

        debug!(
            model = %self.model,
            confidence = verdict.confidence,
            has_fallback = verdict.fallback_answer.is_some(),
            "local critic verdict"
        );

        Ok(verdict)
    }
}

//! Shared judge prompt and structured-response parsing for the remote and
//! local backends. The two variants differ only in transport; the response
//! contract is identical.

use serde::Deserialize;

use super::error::CriticError;
use super::types::CriticVerdict;

/// Builds the validation prompt sent to an LLM backend.
///
/// The model is asked for a single JSON object carrying the confidence,
/// a one-sentence rationale, and - when the excerpt falls short - a
/// general-knowledge fallback answer in the same response, so low
/// confidence never costs a second round trip.
pub fn validation_prompt(question: &str, excerpt: &str) -> String {
    format!(
        r#"You are a strict validation judge for a retrieval-augmented answering system.

### TASK
Decide whether the Excerpt below correctly and sufficiently answers the
Question. Respond with a single JSON object with exactly these keys:

  {{"confidence": <int 0-100>, "explanation": "<one sentence>", "fallback_answer": <string or null>}}

Rules:
* 100 = the excerpt fully and correctly answers the question.
*   0 = the excerpt is completely irrelevant.
* Be harsh - partial or vague matches should score below 70.
* If the excerpt does not sufficiently answer the question, set
  "fallback_answer" to a helpful, accurate answer from your own general
  knowledge. Otherwise set it to null.

### QUESTION
{question}

### EXCERPT
{excerpt}

### YOUR JSON RESPONSE (no markdown fences):
"#
    )
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    confidence: f64,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    fallback_answer: Option<String>,
}

/// Parses a backend's raw text into a [`CriticVerdict`].
///
/// Models occasionally wrap JSON in markdown fences despite instructions;
/// those are stripped before parsing. Anything that still fails to parse,
/// or parses with a confidence outside 0-100, is a
/// [`CriticError::MalformedResponse`] - a contract violation, not a crash.
pub fn parse_verdict(raw: &str) -> Result<CriticVerdict, CriticError> {
    let cleaned = strip_fences(raw);

    let parsed: RawVerdict =
        serde_json::from_str(cleaned).map_err(|e| CriticError::MalformedResponse {
            reason: format!("invalid JSON: {e}"),
        })?;

    if !(0.0..=100.0).contains(&parsed.confidence) {
        return Err(CriticError::MalformedResponse {
            reason: format!("confidence {} outside 0-100", parsed.confidence),
        });
    }

    // Blank fallback text is normalized away so the contract check in the
    // orchestrator sees it as absent.
    let fallback_answer = parsed
        .fallback_answer
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(CriticVerdict {
        confidence: parsed.confidence as f32,
        explanation: parsed.explanation,
        fallback_answer,
    })
}

fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

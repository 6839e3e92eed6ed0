//! Question answering against the configured provider.
//!
//! One request in, one reply out; nothing is retained between calls. The
//! caller supplies the question and the revealed excerpt as context. When no
//! provider key is configured the reply is a fixed, clearly labeled offline
//! placeholder — a deliberate degraded mode, not an error.
//!
//! The provider has been observed answering in several response shapes, so
//! the answer is pulled out by an ordered list of extractors and falls back
//! to a sentinel string rather than failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "XAI_API_KEY";

/// Sampling temperature for every upstream call.
pub const TEMPERATURE: f64 = 0.25;

/// Output-length cap for every upstream call.
pub const MAX_OUTPUT_TOKENS: u32 = 600;

/// System instruction sent with every question.
pub const SYSTEM_PROMPT: &str = "You are a reading companion. Answer the \
    reader's question concisely, grounding yourself in the excerpt they have \
    revealed so far. Quote the excerpt where it helps, and end with one short \
    suggestion for what to notice next.";

/// Validation message for an absent or blank question.
pub const BLANK_QUESTION_ERROR: &str = "Please include a question in your request.";

/// Sentinel when no extractor recognizes the provider's response shape.
pub const ANSWER_FALLBACK: &str = "Grok responded without readable text.";

/// Fixed placeholder answer for offline/demo mode.
pub const OFFLINE_ANSWER: &str = "Lento is running without a provider key, so \
    this is a canned demo answer rather than a real one. Set XAI_API_KEY and \
    ask again to get answers grounded in what you've revealed.";

/// Body of `POST /api/ask`.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
    /// The revealed sentence prefix, joined with single spaces.
    #[serde(default)]
    pub context: String,
}

/// Successful reply from the proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskReply {
    pub answer: String,
    /// Present and true only in offline/demo mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline: Option<bool>,
}

/// Failure from the proxy, already sorted by who caused it.
#[derive(Debug)]
pub enum AskError {
    /// The request itself was bad; no upstream call was made.
    BlankQuestion,
    /// The provider call failed (network, status, or unparseable body).
    Upstream(String),
}

impl std::fmt::Display for AskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AskError::BlankQuestion => write!(f, "{}", BLANK_QUESTION_ERROR),
            AskError::Upstream(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AskError {}

/// Answer one question.
///
/// Validates the question, short-circuits to the offline placeholder when no
/// credential is configured, and otherwise makes a single provider call —
/// no retries, no server-side history.
pub async fn answer_request(
    config: &Config,
    http: &reqwest::Client,
    req: &AskRequest,
) -> Result<AskReply, AskError> {
    if req.question.trim().is_empty() {
        return Err(AskError::BlankQuestion);
    }

    // Read once per request so behavior is consistent within it.
    let api_key = match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            return Ok(AskReply {
                answer: OFFLINE_ANSWER.to_string(),
                offline: Some(true),
            });
        }
    };

    let body = serde_json::json!({
        "model": config.provider.model,
        "temperature": TEMPERATURE,
        "max_tokens": MAX_OUTPUT_TOKENS,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": user_turn(&req.context, &req.question) },
        ],
    });

    let url = format!(
        "{}/v1/chat/completions",
        config.provider.base_url.trim_end_matches('/')
    );

    let response = http
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&body)
        .send()
        .await
        .map_err(|e| AskError::Upstream(format!("couldn't reach the provider: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await.unwrap_or_default();
        return Err(AskError::Upstream(upstream_error_message(
            status.as_u16(),
            &body_text,
        )));
    }

    let json: Value = response
        .json()
        .await
        .map_err(|e| AskError::Upstream(format!("provider returned an unreadable body: {}", e)))?;

    Ok(AskReply {
        answer: extract_answer(&json).unwrap_or_else(|| ANSWER_FALLBACK.to_string()),
        offline: None,
    })
}

/// The user turn embedding the revealed excerpt and the question.
fn user_turn(context: &str, question: &str) -> String {
    if context.trim().is_empty() {
        format!("The reader hasn't revealed any text yet.\n\nQuestion: {}", question.trim())
    } else {
        format!(
            "Excerpt revealed so far:\n{}\n\nQuestion: {}",
            context.trim(),
            question.trim()
        )
    }
}

/// Pull a structured error message out of a failed provider body, falling
/// back to a generic status line.
fn upstream_error_message(status: u16, body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        let structured = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .or_else(|| v.get("error").and_then(Value::as_str));
        if let Some(msg) = structured {
            if !msg.trim().is_empty() {
                return msg.to_string();
            }
        }
    }
    format!("provider service returned status {}", status)
}

/// Try each known response shape in priority order; first hit wins.
pub fn extract_answer(v: &Value) -> Option<String> {
    const EXTRACTORS: [fn(&Value) -> Option<String>; 4] = [
        choices_content_string,
        choices_content_chunks,
        output_blocks,
        output_text,
    ];
    EXTRACTORS.iter().find_map(|extract| extract(v))
}

/// `choices[0].message.content` as a plain string.
fn choices_content_string(v: &Value) -> Option<String> {
    message_content(v)?.as_str().map(str::to_string)
}

/// `choices[0].message.content` as an array of typed chunks with `text`.
fn choices_content_chunks(v: &Value) -> Option<String> {
    join_text_chunks(message_content(v)?.as_array()?)
}

/// Alternate `output[]` blocks, each with a `content[]` chunk array.
fn output_blocks(v: &Value) -> Option<String> {
    let blocks = v.get("output")?.as_array()?;
    let texts: Vec<&str> = blocks
        .iter()
        .filter_map(|b| b.get("content").and_then(Value::as_array))
        .flatten()
        .filter_map(|chunk| chunk.get("text").and_then(Value::as_str))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n"))
    }
}

/// Top-level `output_text`, either a string or an array of strings.
fn output_text(v: &Value) -> Option<String> {
    match v.get("output_text")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let texts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.join("\n"))
            }
        }
        _ => None,
    }
}

fn message_content(v: &Value) -> Option<&Value> {
    v.get("choices")?.get(0)?.get("message")?.get("content")
}

fn join_text_chunks(chunks: &[Value]) -> Option<String> {
    let texts: Vec<&str> = chunks
        .iter()
        .filter_map(|chunk| chunk.get("text").and_then(Value::as_str))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n"))
    }
}

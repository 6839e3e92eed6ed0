//! Q&A client side: talks to a running `lento serve` over HTTP.
//!
//! Every outcome — answer, offline placeholder, or failure — comes back as
//! data; nothing here panics or retries. Failures become conversation
//! entries at the call site, so the reading flow is never interrupted.

use anyhow::Result;
use serde_json::Value;

use crate::config::Config;
use crate::ingest;
use crate::qa::AskReply;

/// What came back from one ask round-trip.
#[derive(Debug)]
pub enum ClientOutcome {
    /// A well-formed answer, possibly the offline placeholder.
    Answered { answer: String, offline: bool },
    /// Anything else: network error, error status, malformed body.
    Failed { reason: String },
}

/// HTTP client for the proxy's `/api/ask` endpoint.
pub struct AskClient {
    http: reqwest::Client,
    base_url: String,
}

impl AskClient {
    pub fn new(base_url: &str) -> Self {
        AskClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send one question with its revealed-text context.
    pub async fn ask(&self, question: &str, context: &str) -> ClientOutcome {
        let body = serde_json::json!({ "question": question, "context": context });
        let url = format!("{}/api/ask", self.base_url);

        let response = match self.http.post(&url).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                return ClientOutcome::Failed {
                    reason: format!("couldn't reach {}: {}", url, e),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            let reason = match response.json::<Value>().await {
                Ok(v) => v
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("server returned status {}", status.as_u16())),
                Err(_) => format!("server returned status {}", status.as_u16()),
            };
            return ClientOutcome::Failed { reason };
        }

        match response.json::<AskReply>().await {
            Ok(reply) => ClientOutcome::Answered {
                answer: reply.answer,
                offline: reply.offline.unwrap_or(false),
            },
            Err(e) => ClientOutcome::Failed {
                reason: format!("server returned an unreadable body: {}", e),
            },
        }
    }
}

/// One-shot `lento ask` command.
///
/// Builds the context from `--context-file` (optionally limited to its first
/// `--sentences` N, mirroring a partially revealed document) and prints the
/// answer or failure.
pub async fn run_ask(
    config: &Config,
    question: &str,
    context_file: Option<&std::path::Path>,
    sentences: Option<usize>,
) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("question must not be empty");
    }

    let context = match context_file {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "context.txt".to_string());
            let doc = ingest::ingest_bytes(&name, &bytes, ingest::MAX_SENTENCES)
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
            let take = sentences
                .unwrap_or(doc.sentences.len())
                .min(doc.sentences.len());
            doc.sentences[..take].join(" ")
        }
        None => String::new(),
    };

    let client = AskClient::new(&config.client.ask_url);
    match client.ask(question, &context).await {
        ClientOutcome::Answered { answer, offline } => {
            if offline {
                println!("(offline demo mode)");
            }
            println!("{}", answer);
        }
        ClientOutcome::Failed { reason } => {
            anyhow::bail!("{}", reason);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let c = AskClient::new("http://127.0.0.1:7331/");
        assert_eq!(c.base_url, "http://127.0.0.1:7331");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_failure_outcome() {
        // Reserved port with nothing listening.
        let client = AskClient::new("http://127.0.0.1:9");
        match client.ask("q", "c").await {
            ClientOutcome::Failed { reason } => {
                assert!(reason.contains("couldn't reach"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}

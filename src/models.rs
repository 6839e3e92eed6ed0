//! Core data models used throughout Lento.
//!
//! These types represent the document being read and the running Q&A
//! conversation attached to a reading session.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A segmented document ready for progressive reveal.
///
/// Replaced wholesale on every successful ingest — there is no merging of
/// documents. `sentences.len()` never exceeds [`crate::ingest::MAX_SENTENCES`]
/// after ingestion; `truncated` records whether the cap was hit.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub byline: String,
    pub sentences: Vec<String>,
    /// Name of the uploaded file, when the document came from one.
    pub filename: Option<String>,
    pub truncated: bool,
}

impl Document {
    /// The built-in document shown before anything is loaded.
    pub fn welcome() -> Self {
        let text = "Welcome to Lento. This reader reveals a document one \
            sentence at a time, so you can sit with each idea before moving \
            on. Press forward to reveal the next sentence, or back to tuck \
            one away again. At any point you can ask a question about what \
            you have read so far, and only that much — the answer is grounded \
            in the revealed text, never in the part you haven't reached. Load \
            a text, markdown, or PDF file to begin.";
        Document {
            title: "Welcome to Lento".to_string(),
            byline: "A quick tour".to_string(),
            sentences: crate::segment::split_sentences(text),
            filename: None,
            truncated: false,
        }
    }
}

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the running conversation.
///
/// The conversation is append-only: messages are never edited or removed,
/// and it lives for the session, not for any one document.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Message {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

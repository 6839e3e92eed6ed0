//! Document ingestion.
//!
//! Turns an uploaded file (name + bytes) into a segmented [`Document`].
//! Plain text and markdown are decoded directly; PDF bytes go through
//! `pdf-extract`. Extraction failures are returned as a single
//! human-readable error and never panic — a failed ingest must leave the
//! caller's current document untouched.

use crate::models::Document;
use crate::segment::split_sentences;

/// Hard cap on sentences kept per document.
pub const MAX_SENTENCES: usize = 2200;

/// File extensions the upload surface accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "md", "markdown"];

/// Ingestion error, surfaced to the reader as one message.
#[derive(Debug)]
pub enum IngestError {
    UnsupportedType(String),
    Pdf(String),
    /// Decoded fine but produced no sentences.
    Unreadable,
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::UnsupportedType(ext) => {
                write!(
                    f,
                    "unsupported file type: .{} (expected one of: .{})",
                    ext,
                    ACCEPTED_EXTENSIONS.join(", .")
                )
            }
            IngestError::Pdf(e) => write!(f, "couldn't read that PDF: {}", e),
            IngestError::Unreadable => {
                write!(f, "couldn't find readable text in that file")
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// How a file's content should be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Text,
}

/// Classify a filename by extension. The PDF special case is the only one
/// that changes the decode path; everything else is read as text.
pub fn classify(filename: &str) -> Result<FileKind, IngestError> {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Ok(FileKind::Pdf),
        "txt" | "md" | "markdown" => Ok(FileKind::Text),
        other => Err(IngestError::UnsupportedType(other.to_string())),
    }
}

/// Ingest a file's bytes into a [`Document`].
///
/// Classifies by extension, extracts or decodes the text, segments it, and
/// truncates to `max_sentences`. Fails with [`IngestError::Unreadable`] when
/// segmentation yields nothing.
pub fn ingest_bytes(
    filename: &str,
    bytes: &[u8],
    max_sentences: usize,
) -> Result<Document, IngestError> {
    let kind = classify(filename)?;

    let raw = match kind {
        FileKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| IngestError::Pdf(e.to_string()))?,
        // Text files tolerate stray non-UTF-8 bytes rather than failing.
        FileKind::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    let mut sentences = split_sentences(&raw);
    if sentences.is_empty() {
        return Err(IngestError::Unreadable);
    }

    let truncated = sentences.len() >= max_sentences;
    sentences.truncate(max_sentences);

    Ok(Document {
        title: title_from_filename(filename),
        byline: match kind {
            FileKind::Pdf => "Imported PDF".to_string(),
            FileKind::Text => "Imported file".to_string(),
        },
        sentences,
        filename: Some(filename.to_string()),
        truncated,
    })
}

/// Document title from the file's stem, e.g. `notes.final.md` → `notes.final`.
fn title_from_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => filename.to_string(),
    }
}

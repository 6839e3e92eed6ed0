//! Reading session state.
//!
//! One struct owns everything the reader can mutate — the current document,
//! the reveal cursor, the tap tracker, the conversation, and the in-flight
//! question flag — and every mutation goes through a named transition. The
//! document and cursor always move together: loading a document resets the
//! cursor, and nothing else touches it besides reveal/unreveal.

use crate::gesture::{command_for, GestureCommand, Side, TapTracker};
use crate::models::{Document, Message, Role};
use crate::reveal::RevealCursor;

/// Prefix on assistant entries that are local fallbacks, not real answers.
pub const LOCAL_FALLBACK_PREFIX: &str = "[reader] ";

/// Why a question was rejected before any request went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionRejected {
    Blank,
    /// A previous question is still in flight.
    Busy,
}

/// The live state of one reader.
#[derive(Debug)]
pub struct ReaderSession {
    document: Document,
    cursor: RevealCursor,
    taps: TapTracker,
    conversation: Vec<Message>,
    busy: bool,
}

impl ReaderSession {
    /// Fresh session showing the built-in welcome document.
    pub fn new(tap_window_ms: i64) -> Self {
        let document = Document::welcome();
        let cursor = RevealCursor::new(document.sentences.len());
        ReaderSession {
            document,
            cursor,
            taps: TapTracker::new(tap_window_ms),
            conversation: Vec::new(),
            busy: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> &RevealCursor {
        &self.cursor
    }

    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Replace the document wholesale and reset the cursor to the start.
    ///
    /// The conversation is deliberately kept: it belongs to the session, not
    /// to any one document, so a reader comparing two texts keeps their
    /// thread.
    pub fn load_document(&mut self, document: Document) {
        self.cursor = RevealCursor::new(document.sentences.len());
        self.document = document;
    }

    /// Show one more sentence.
    pub fn reveal(&mut self) {
        self.cursor.reveal();
    }

    /// Hide the most recently revealed sentence.
    pub fn unreveal(&mut self) {
        self.cursor.unreveal();
    }

    /// Feed a timestamped tap through the gesture recognizer and apply
    /// whatever command it emits.
    pub fn tap(&mut self, side: Side, at_ms: i64) -> Option<GestureCommand> {
        let command = self.taps.on_tap(side, at_ms)?;
        self.apply(command);
        Some(command)
    }

    /// Apply a pointer double-click, which needs no debouncing.
    pub fn double_click(&mut self, side: Side) -> GestureCommand {
        let command = command_for(side);
        self.apply(command);
        command
    }

    fn apply(&mut self, command: GestureCommand) {
        match command {
            GestureCommand::Reveal => self.reveal(),
            GestureCommand::Unreveal => self.unreveal(),
        }
    }

    /// The revealed sentence prefix, joined with single spaces. This is the
    /// context sent alongside every question.
    pub fn revealed_text(&self) -> String {
        self.document.sentences[..self.cursor.revealed()].join(" ")
    }

    /// Start a question: validate it, append the user message optimistically,
    /// and mark the session busy. Returns the context snapshot to send.
    ///
    /// A blank question changes nothing, and a second question can't start
    /// while one is outstanding.
    pub fn begin_question(&mut self, question: &str) -> Result<String, QuestionRejected> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QuestionRejected::Blank);
        }
        if self.busy {
            return Err(QuestionRejected::Busy);
        }
        self.conversation.push(Message::new(Role::User, question));
        self.busy = true;
        Ok(self.revealed_text())
    }

    /// Record a real answer for the outstanding question.
    pub fn record_answer(&mut self, answer: impl Into<String>) {
        self.conversation.push(Message::new(Role::Assistant, answer));
        self.busy = false;
    }

    /// Record a failure for the outstanding question as a visible assistant
    /// entry, prefixed so the reader can tell it's a local fallback.
    pub fn record_failure(&mut self, reason: &str) {
        self.conversation.push(Message::new(
            Role::Assistant,
            format!("{}Couldn't get an answer: {}", LOCAL_FALLBACK_PREFIX, reason),
        ));
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest_bytes;

    fn three_sentence_session() -> ReaderSession {
        let mut session = ReaderSession::new(320);
        let doc = ingest_bytes("test.txt", b"Hello world. How are you? Fine!", 2200).unwrap();
        session.load_document(doc);
        session
    }

    #[test]
    fn starts_with_welcome_document() {
        let session = ReaderSession::new(320);
        assert!(!session.document().sentences.is_empty());
        assert_eq!(session.cursor().revealed(), 1);
        assert!(session.conversation().is_empty());
    }

    #[test]
    fn load_resets_cursor_regardless_of_position() {
        let mut session = three_sentence_session();
        session.reveal();
        session.reveal();
        assert_eq!(session.cursor().revealed(), 3);

        let doc = ingest_bytes("next.txt", b"New text. More text.", 2200).unwrap();
        session.load_document(doc);
        assert_eq!(session.cursor().revealed(), 1);
        assert_eq!(session.document().sentences.len(), 2);
    }

    #[test]
    fn revealed_text_is_single_space_joined_prefix() {
        let mut session = three_sentence_session();
        assert_eq!(session.revealed_text(), "Hello world.");
        session.reveal();
        assert_eq!(session.revealed_text(), "Hello world. How are you?");
        session.reveal();
        session.reveal(); // saturates
        assert_eq!(session.revealed_text(), "Hello world. How are you? Fine!");
        assert_eq!(session.cursor().revealed(), 3);
    }

    #[test]
    fn taps_drive_the_cursor() {
        let mut session = three_sentence_session();
        assert_eq!(session.tap(Side::Right, 0), None);
        assert_eq!(session.tap(Side::Right, 100), Some(GestureCommand::Reveal));
        assert_eq!(session.cursor().revealed(), 2);

        assert_eq!(session.tap(Side::Left, 200), None);
        assert_eq!(session.tap(Side::Left, 250), Some(GestureCommand::Unreveal));
        assert_eq!(session.cursor().revealed(), 1);
    }

    #[test]
    fn double_click_needs_no_pairing() {
        let mut session = three_sentence_session();
        assert_eq!(session.double_click(Side::Right), GestureCommand::Reveal);
        assert_eq!(session.cursor().revealed(), 2);
    }

    #[test]
    fn blank_question_changes_nothing() {
        let mut session = three_sentence_session();
        assert_eq!(
            session.begin_question("   \t "),
            Err(QuestionRejected::Blank)
        );
        assert!(session.conversation().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn question_is_appended_optimistically_then_answered() {
        let mut session = three_sentence_session();
        let context = session.begin_question("What is this about?").unwrap();
        assert_eq!(context, "Hello world.");
        assert!(session.is_busy());
        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.conversation()[0].role, Role::User);

        session.record_answer("A greeting.");
        assert!(!session.is_busy());
        assert_eq!(session.conversation().len(), 2);
        assert_eq!(session.conversation()[1].role, Role::Assistant);
    }

    #[test]
    fn second_question_is_rejected_while_busy() {
        let mut session = three_sentence_session();
        session.begin_question("First?").unwrap();
        assert_eq!(
            session.begin_question("Second?"),
            Err(QuestionRejected::Busy)
        );
        assert_eq!(session.conversation().len(), 1);
    }

    #[test]
    fn failure_is_a_prefixed_assistant_entry() {
        let mut session = three_sentence_session();
        session.begin_question("Anyone there?").unwrap();
        session.record_failure("connection refused");
        assert!(!session.is_busy());
        let last = session.conversation().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert!(last.content.starts_with(LOCAL_FALLBACK_PREFIX));
        assert!(last.content.contains("connection refused"));
    }

    #[test]
    fn conversation_survives_document_switch() {
        let mut session = three_sentence_session();
        session.begin_question("Q?").unwrap();
        session.record_answer("A.");

        let doc = ingest_bytes("other.txt", b"Different text.", 2200).unwrap();
        session.load_document(doc);
        assert_eq!(session.conversation().len(), 2);
    }
}

//! End-to-end reading flow over the library: ingest → session → reveal.

use lento::gesture::Side;
use lento::ingest::ingest_bytes;
use lento::session::ReaderSession;

#[test]
fn txt_upload_reveals_sentence_by_sentence() {
    let mut session = ReaderSession::new(320);
    let doc = ingest_bytes("hello.txt", b"Hello world. How are you? Fine!", 2200).unwrap();
    session.load_document(doc);

    assert_eq!(session.document().sentences.len(), 3);
    assert_eq!(session.cursor().revealed(), 1);
    assert_eq!(session.revealed_text(), "Hello world.");

    session.reveal();
    session.reveal();
    assert_eq!(session.cursor().revealed(), 3);
    assert_eq!(
        session.revealed_text(),
        "Hello world. How are you? Fine!"
    );

    // Revealing past the end changes nothing.
    session.reveal();
    assert_eq!(session.cursor().revealed(), 3);
}

#[test]
fn failed_ingest_leaves_the_session_untouched() {
    let mut session = ReaderSession::new(320);
    let doc = ingest_bytes("good.txt", b"Kept sentence.", 2200).unwrap();
    session.load_document(doc);
    session.begin_question("a question").unwrap();
    session.record_answer("an answer");

    // An unreadable file never reaches load_document.
    assert!(ingest_bytes("blank.txt", b"   ", 2200).is_err());
    assert!(ingest_bytes("bad.pdf", b"not a pdf", 2200).is_err());

    assert_eq!(session.document().sentences, vec!["Kept sentence."]);
    assert_eq!(session.cursor().revealed(), 1);
    assert_eq!(session.conversation().len(), 2);
}

#[test]
fn gestures_and_questions_interleave() {
    let mut session = ReaderSession::new(320);
    let doc = ingest_bytes(
        "doc.md",
        b"First point. Second point. Third point. Fourth point.",
        2200,
    )
    .unwrap();
    session.load_document(doc);

    // Double-tap right twice: cursor 1 -> 2 -> 3.
    assert!(session.tap(Side::Right, 0).is_none());
    assert!(session.tap(Side::Right, 100).is_some());
    assert!(session.tap(Side::Right, 1000).is_none());
    assert!(session.tap(Side::Right, 1100).is_some());
    assert_eq!(session.cursor().revealed(), 3);

    // Question context is exactly the revealed prefix.
    let context = session.begin_question("what so far?").unwrap();
    assert_eq!(context, "First point. Second point. Third point.");
    session.record_answer("three points");

    // Reveal/unreveal stays available regardless of Q&A activity.
    session.double_click(Side::Left);
    assert_eq!(session.cursor().revealed(), 2);
}

#[test]
fn truncated_document_still_reads_normally() {
    let text = "Sentence here. ".repeat(8);
    let doc = ingest_bytes("long.txt", text.as_bytes(), 5).unwrap();
    assert!(doc.truncated);

    let mut session = ReaderSession::new(320);
    session.load_document(doc);
    for _ in 0..10 {
        session.reveal();
    }
    assert_eq!(session.cursor().revealed(), 5);
    assert_eq!(session.cursor().progress_percent(), 100);
}

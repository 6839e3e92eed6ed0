//! Interactive reading loop.
//!
//! Drives a [`ReaderSession`] from stdin, one command per line. Prompts are
//! printed only on a TTY, so a scripted session can be piped in:
//!
//! ```text
//! r            reveal the next sentence (Enter does the same)
//! u            tuck the last sentence away again
//! .  ,         tap the right/left half (two taps within the window pair up)
//! ?<question>  ask about the revealed text
//! open <path>  load another document
//! thread       print the conversation so far
//! q            quit
//! ```

use anyhow::Result;
use chrono::Utc;
use std::io::BufRead;
use std::path::Path;

use crate::client::{AskClient, ClientOutcome};
use crate::config::Config;
use crate::gesture::{GestureCommand, Side};
use crate::ingest;
use crate::models::Role;
use crate::session::{QuestionRejected, ReaderSession};

/// `lento read` entry point. With no file, the welcome document is shown.
pub async fn run_read(config: &Config, file: Option<&Path>) -> Result<()> {
    let mut session = ReaderSession::new(config.gesture.double_tap_window_ms);

    if let Some(path) = file {
        match load_file(&mut session, config, path) {
            Ok(()) => {}
            Err(message) => anyhow::bail!("{}", message),
        }
    }

    let interactive = atty::is(atty::Stream::Stdin);
    let client = AskClient::new(&config.client.ask_url);

    print_document_header(&session);
    print_current(&session);

    let stdin = std::io::stdin();
    loop {
        if interactive {
            print!("> ");
            use std::io::Write;
            std::io::stdout().flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "q" | "quit" => break,
            "" | "r" => {
                step(&mut session, GestureCommand::Reveal);
            }
            "u" => {
                step(&mut session, GestureCommand::Unreveal);
            }
            "." => {
                if let Some(cmd) = session.tap(Side::Right, Utc::now().timestamp_millis()) {
                    report_step(&session, cmd);
                }
            }
            "," => {
                if let Some(cmd) = session.tap(Side::Left, Utc::now().timestamp_millis()) {
                    report_step(&session, cmd);
                }
            }
            "thread" => print_thread(&session),
            _ if line.starts_with('?') => {
                ask(&mut session, &client, line[1..].trim()).await;
            }
            _ if line.starts_with("open ") => {
                let path = Path::new(line["open ".len()..].trim());
                match load_file(&mut session, config, path) {
                    Ok(()) => {
                        print_document_header(&session);
                        print_current(&session);
                    }
                    // Failed loads leave the current document in place.
                    Err(message) => eprintln!("{}", message),
                }
            }
            other => eprintln!("unknown command: {:?} (try r, u, ?<question>, q)", other),
        }
    }

    Ok(())
}

/// `lento segment` command: sentence-level inspection of a file without
/// starting a session.
pub fn run_segment(path: &Path, show_sentences: bool, max: usize) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let doc = ingest::ingest_bytes(&name, &bytes, max)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    println!("title: {}", doc.title);
    println!("sentences: {}", doc.sentences.len());
    println!("truncated: {}", doc.truncated);
    if show_sentences {
        for (i, sentence) in doc.sentences.iter().enumerate() {
            println!("{:>5}  {}", i + 1, sentence);
        }
    }
    Ok(())
}

/// Ingest a file into the session. The previous document survives a failure.
fn load_file(session: &mut ReaderSession, config: &Config, path: &Path) -> Result<(), String> {
    let bytes =
        std::fs::read(path).map_err(|e| format!("couldn't open {}: {}", path.display(), e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let doc = ingest::ingest_bytes(&name, &bytes, config.document.max_sentences)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    session.load_document(doc);
    Ok(())
}

fn step(session: &mut ReaderSession, command: GestureCommand) {
    match command {
        GestureCommand::Reveal => session.reveal(),
        GestureCommand::Unreveal => session.unreveal(),
    }
    report_step(session, command);
}

fn report_step(session: &ReaderSession, command: GestureCommand) {
    let cursor = session.cursor();
    match command {
        GestureCommand::Reveal => {
            if cursor.is_empty() {
                println!("(empty document)");
                return;
            }
            let sentence = &session.document().sentences[cursor.revealed() - 1];
            println!(
                "[{}/{} {}%] {}",
                cursor.revealed(),
                cursor.total(),
                cursor.progress_percent(),
                sentence
            );
        }
        GestureCommand::Unreveal => {
            println!(
                "[{}/{} {}%] (hidden one sentence)",
                cursor.revealed(),
                cursor.total(),
                cursor.progress_percent()
            );
        }
    }
}

async fn ask(session: &mut ReaderSession, client: &AskClient, question: &str) {
    let context = match session.begin_question(question) {
        Ok(context) => context,
        Err(QuestionRejected::Blank) => {
            eprintln!("nothing asked — type ?<your question>");
            return;
        }
        Err(QuestionRejected::Busy) => {
            eprintln!("still waiting on the previous question");
            return;
        }
    };

    println!("asking...");
    match client.ask(question, &context).await {
        ClientOutcome::Answered { answer, offline } => {
            if offline {
                println!("(offline demo mode)");
            }
            session.record_answer(answer);
        }
        ClientOutcome::Failed { reason } => {
            session.record_failure(&reason);
        }
    }

    // The answer (or the local fallback) is the newest entry.
    if let Some(last) = session.conversation().last() {
        println!("{}", last.content);
    }
}

fn print_document_header(session: &ReaderSession) {
    let doc = session.document();
    println!("— {} —", doc.title);
    println!("{}", doc.byline);
    if doc.truncated {
        println!("(long document: truncated to {} sentences)", doc.sentences.len());
    }
    println!("{} sentences", doc.sentences.len());
}

fn print_current(session: &ReaderSession) {
    if session.cursor().is_empty() {
        println!("(empty document)");
    } else {
        report_step(session, GestureCommand::Reveal);
    }
}

fn print_thread(session: &ReaderSession) {
    if session.conversation().is_empty() {
        println!("(no questions yet)");
        return;
    }
    for message in session.conversation() {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant => "lento",
        };
        println!("{}: {}", who, message.content);
    }
}

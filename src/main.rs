//! # Lento CLI (`lento`)
//!
//! The `lento` binary is the interface to Lento: a terminal reading loop, a
//! segmentation inspector, a one-shot question command, and the Q&A proxy
//! server the other two talk to.
//!
//! ## Usage
//!
//! ```bash
//! lento [--config ./lento.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lento read [file]` | Read a document one sentence at a time |
//! | `lento segment <file>` | Show how a file splits into sentences |
//! | `lento ask "<question>"` | Ask a question against a running proxy |
//! | `lento serve` | Start the Q&A proxy (`POST /api/ask`) |
//!
//! ## Examples
//!
//! ```bash
//! # Start the proxy (offline demo mode unless XAI_API_KEY is set)
//! lento serve
//!
//! # Read a paper, asking questions as you go
//! lento read paper.pdf
//!
//! # Inspect segmentation without starting a session
//! lento segment notes.md --show
//!
//! # One-shot question grounded in the first 40 sentences of a file
//! lento ask "who is the narrator?" --context-file novel.txt --sentences 40
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lento::{client, config, read_cmd, server};

/// Lento — a sentence-at-a-time reading companion with grounded Q&A.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; every setting has a sensible default, so the flag is optional.
#[derive(Parser)]
#[command(
    name = "lento",
    about = "Lento — a sentence-at-a-time reading companion with grounded Q&A",
    version,
    long_about = "Lento reveals a document one sentence at a time and lets you \
    ask questions about the portion you've read so far. Questions are forwarded \
    to a language-model provider through a small stateless proxy; without a \
    provider key the proxy answers in a clearly labeled offline demo mode."
)]
struct Cli {
    /// Path to configuration file (TOML). Optional; defaults apply without it.
    #[arg(long, global = true, default_value = "./lento.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Read a document one sentence at a time.
    ///
    /// Reveals sentences as you ask for them and forwards `?question` lines
    /// to the configured proxy. With no file, a built-in welcome document
    /// is shown.
    Read {
        /// Document to read (`.txt`, `.md`, `.markdown`, `.pdf`).
        file: Option<PathBuf>,
    },

    /// Show how a file splits into sentences.
    ///
    /// Prints the sentence count and truncation flag; `--show` also prints
    /// every sentence with its index.
    Segment {
        /// File to segment.
        file: PathBuf,

        /// Print the sentences themselves, not just the counts.
        #[arg(long)]
        show: bool,
    },

    /// Ask one question against a running proxy.
    ///
    /// Context comes from `--context-file`, optionally limited to its first
    /// `--sentences` N to mirror a partially revealed document.
    Ask {
        /// The question to ask.
        question: String,

        /// File whose text grounds the answer.
        #[arg(long)]
        context_file: Option<PathBuf>,

        /// Use only the first N sentences of the context file.
        #[arg(long)]
        sentences: Option<usize>,
    },

    /// Start the Q&A proxy.
    ///
    /// Serves `POST /api/ask` and `GET /health` on `[server].bind`. Without
    /// an XAI_API_KEY in the environment, answers come back as a fixed
    /// offline placeholder with `offline: true`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Every setting has a default, so a missing config file is fine.
    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::Config::minimal()
    };

    match cli.command {
        Commands::Read { file } => {
            read_cmd::run_read(&cfg, file.as_deref()).await?;
        }
        Commands::Segment { file, show } => {
            read_cmd::run_segment(&file, show, cfg.document.max_sentences)?;
        }
        Commands::Ask {
            question,
            context_file,
            sentences,
        } => {
            client::run_ask(&cfg, &question, context_file.as_deref(), sentences).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}

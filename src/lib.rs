//! # Lento
//!
//! A sentence-at-a-time reading companion with grounded Q&A.
//!
//! Lento ingests a text, markdown, or PDF file, segments it into sentences,
//! and reveals them one at a time under the reader's control. At any point
//! the reader can ask a free-form question; the revealed prefix — and only
//! that — is sent as context to a language-model provider through a small
//! stateless HTTP proxy.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌─────────────────┐
//! │  Ingest  │──▶│  Segment  │──▶│  ReaderSession   │
//! │ txt/pdf  │   │ sentences │   │ cursor + thread │
//! └──────────┘   └───────────┘   └────────┬────────┘
//!                                         │ revealed prefix
//!                                         ▼
//!                                  ┌────────────┐   ┌──────────┐
//!                                  │  AskClient │──▶│  /api/ask │──▶ provider
//!                                  └────────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! lento serve                   # start the ask proxy
//! lento read paper.pdf          # read, revealing sentence by sentence
//! lento segment notes.md --show # inspect segmentation
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`segment`] | Sentence segmentation |
//! | [`ingest`] | File classification and text extraction |
//! | [`reveal`] | Reveal cursor state machine |
//! | [`gesture`] | Double-tap gesture recognition |
//! | [`session`] | Reading session state and transitions |
//! | [`qa`] | Provider call and response normalization |
//! | [`client`] | HTTP client for the ask proxy |
//! | [`server`] | Axum Q&A proxy |

pub mod client;
pub mod config;
pub mod gesture;
pub mod ingest;
pub mod models;
pub mod qa;
pub mod read_cmd;
pub mod reveal;
pub mod segment;
pub mod server;
pub mod session;

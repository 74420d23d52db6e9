//! # moodchat Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! A command-line chatbot that answers from a fixed set of question/answer
//! pairs. User input is embedded and matched against the stored questions by
//! nearest-neighbor search; keyword-based mood detection adds empathy lines,
//! remembered mood context and jokes.
//!
//! The library holds the whole pipeline so the binary (`main.rs`) and the
//! integration tests in `cli/tests/` share one implementation.
//!
//! ## Architecture
//!
//! Leaves first:
//! - `knowledge`: loading and normalizing `question|answer` pairs
//! - `embedding`: the `Embedder` trait, the MiniLM encoder and the offline hashing embedder
//! - `index`: exact nearest-neighbor search over question embeddings
//! - `mood`: mood taxonomy, keyword detector and persistence tracker
//! - `response`: joke bank and the reply composer
//! - `session`: `ChatSession`, owner of all per-conversation state
//! - `commands`: `chat`, `ask` and `check` command handlers
//! - `core`: configuration and error types
//!
pub mod commands;
pub mod core;
pub mod embedding;
pub mod index;
pub mod knowledge;
pub mod mood;
pub mod response;
pub mod session;

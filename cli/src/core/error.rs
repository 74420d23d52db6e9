//! # moodchat Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types shared across the moodchat crate. It
//! follows a two-level approach:
//! - `ChatError`: a `thiserror` enum for domain failures that callers may want
//!   to match on (startup-fatal load errors versus turn-level embedding errors).
//! - `Result<T>`: an alias for `anyhow::Result<T>` used by application-level
//!   code (configuration loading, command handlers) where context matters more
//!   than the exact variant.
//!
//! Component-specific errors (`EmbedError`, `IndexError`) live next to their
//! components and convert into `ChatError` via `#[from]`.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Startup: a missing knowledge file is fatal.
//! let store = knowledge::load(&path)?;
//!
//! // Per turn: embedding errors are reported and the loop continues.
//! match session.respond(line) {
//!     Ok(reply) => print_reply(&reply),
//!     Err(ChatError::Embedding(e)) => warn!("turn failed: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use crate::embedding::EmbedError;
use crate::index::IndexError;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the moodchat application.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The knowledge source is missing or unreadable. Fatal at startup.
    #[error("Failed to load knowledge source '{}'", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The knowledge source parsed, but contains no usable `question|answer` lines.
    #[error("Knowledge source '{}' contains no question|answer entries.", path.display())]
    EmptyKnowledge { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("Similarity index error: {0}")]
    Index(#[from] IndexError),
}

impl ChatError {
    /// True for errors that only affect the current turn; the conversation
    /// loop reports them and keeps going.
    pub fn is_turn_level(&self) -> bool {
        matches!(self, ChatError::Embedding(_) | ChatError::Index(_))
    }
}

/// Type alias for Result using anyhow::Error for application-level code.
pub type Result<T> = anyhow::Result<T>;

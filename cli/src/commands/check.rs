//! # moodchat Check Command
//!
//! File: cli/src/commands/check.rs
//!
//! ## Overview
//!
//! Implements `moodchat check`: loads the configured knowledge source, builds
//! the index exactly as a chat session would, and prints a short report. Lines
//! that were skipped during parsing are listed by line number so malformed
//! entries are easy to find.
//!
//! ## Examples
//!
//! ```text
//! $ moodchat check
//! Knowledge source: data/knowledge.txt
//! Entries: 24
//! Skipped lines: 0
//! Embedder: minilm
//! Embedding dimension: 384
//! Variant: mood-aware (confidence threshold 0.8)
//! OK
//! ```
//!
use crate::core::config::Config;
use crate::core::error::{ChatError, Result};
use crate::knowledge;
use crate::session::ChatSession;
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing::{info, warn};

/// # Check Arguments (`CheckArgs`)
#[derive(Parser, Debug, Default)]
pub struct CheckArgs {
    /// Also list every loaded question.
    #[arg(long)]
    pub list: bool,
}

/// # Handle Check Command (`handle_check`)
///
/// ## Returns
///
/// * `Ok(())` when the knowledge source loads, has at least one entry and
///   indexes cleanly.
/// * `Err` otherwise, with the same messages `chat` would fail with.
pub fn handle_check(args: CheckArgs, config: &Config) -> Result<()> {
    let path = Path::new(&config.knowledge.path);
    info!("Checking knowledge source {}", path.display());

    let store = knowledge::load(path)?;
    if store.is_empty() {
        return Err(ChatError::EmptyKnowledge {
            path: path.to_path_buf(),
        }
        .into());
    }
    for line in store.skipped_lines() {
        warn!("{}:{line}: not a question|answer entry", path.display());
    }

    let session = ChatSession::with_store(store, config).context("Failed to build the index")?;
    let store = session.store();

    println!("Knowledge source: {}", path.display());
    println!("Entries: {}", store.len());
    let skipped = store.skipped_lines();
    if skipped.is_empty() {
        println!("Skipped lines: 0");
    } else {
        let numbers: Vec<String> = skipped.iter().map(ToString::to_string).collect();
        println!(
            "Skipped lines: {} ({})",
            skipped.len(),
            numbers.join(", ")
        );
    }
    println!("Embedder: {}", config.embedding.backend);
    println!("Embedding dimension: {}", session.dimension());
    println!(
        "Variant: {} (confidence threshold {})",
        session.settings().variant,
        session.settings().confidence_threshold
    );
    if args.list {
        for entry in store.entries() {
            println!("  {}", entry.question);
        }
    }
    println!("OK");
    Ok(())
}

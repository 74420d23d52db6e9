//! # moodchat Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! Implements `moodchat ask <TEXT>...`: runs a single turn on a fresh session
//! and prints the reply lines without the bot-name prefix, which makes the
//! command convenient in scripts.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::session::ChatSession;
use anyhow::Context;
use clap::Parser;
use tracing::debug;

/// # Ask Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question to ask. Multiple words are joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// # Handle Ask Command (`handle_ask`)
///
/// Unlike `chat`, a turn-level failure (such as input with no words in it) is
/// reported as an error and the process exits non-zero.
pub fn handle_ask(args: AskArgs, config: &Config) -> Result<()> {
    let question = args.text.join(" ");
    debug!("Asking: {question}");

    let mut session =
        ChatSession::from_config(config).context("Failed to start chat session")?;
    let reply = session
        .respond(&question)
        .with_context(|| format!("Failed to answer '{question}'"))?;

    for line in &reply.lines {
        println!("{line}");
    }
    Ok(())
}

//! # moodchat Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! Implements `moodchat chat` (also what runs when no command is given): a
//! line-oriented conversation on stdin/stdout.
//!
//! - Each input line is one turn handled by the [`ChatSession`].
//! - The exit command (default `exit`, case-insensitive) or end of input prints
//!   the farewell and ends the session.
//! - Turn-level errors (for example an empty line, which cannot be embedded)
//!   print a short apology; the conversation continues.
//!
//! ## Examples
//!
//! ```bash
//! moodchat chat
//! moodchat --knowledge ~/kb.txt --seed 7
//! ```
//!
//! ```text
//! Bot is ready! Type 'exit' to quit.
//!
//! You: how are you
//! Bot: I am fine, thanks!
//! You: exit
//! Bot: Goodbye!
//! ```
//!
use crate::core::config::{ChatConfig, Config};
use crate::core::error::Result;
use crate::session::ChatSession;
use anyhow::Context;
use clap::Parser;
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Printed when a turn fails but the conversation can go on.
pub const TURN_FAILED: &str = "Sorry, something went wrong with that message. Please try again.";
pub const FAREWELL: &str = "Goodbye!";

/// # Chat Arguments (`ChatArgs`)
///
/// `moodchat chat` takes no arguments of its own; knowledge source, variant and
/// seed are global options.
#[derive(Parser, Debug, Default)]
pub struct ChatArgs {}

/// # Handle Chat Command (`handle_chat`)
///
/// Builds the session from `config` and runs the conversation on the process's
/// stdin/stdout.
///
/// ## Returns
///
/// * `Ok(())` once the user exits or input ends.
/// * `Err` when the knowledge source cannot be loaded or is empty (before any
///   prompt is shown), or when stdout/stdin fail.
pub fn handle_chat(_args: ChatArgs, config: &Config) -> Result<()> {
    info!("Starting chat session...");
    let mut session =
        ChatSession::from_config(config).context("Failed to start chat session")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_conversation(&mut session, &config.chat, stdin.lock(), stdout.lock())
}

/// Runs the read-respond-print loop until the exit command or end of input.
pub fn run_conversation<R, I, O>(
    session: &mut ChatSession<R>,
    chat: &ChatConfig,
    input: I,
    mut output: O,
) -> Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let name = chat.bot_name.as_str();
    let exit_command = chat.exit_command.trim().to_lowercase();

    writeln!(
        output,
        "{name} is ready! Type '{}' to quit.\n",
        chat.exit_command
    )?;

    let mut lines = input.lines();
    loop {
        write!(output, "You: ")?;
        output.flush().context("Failed to flush stdout")?;

        let line = match lines.next() {
            None => {
                writeln!(output)?;
                break;
            }
            Some(Ok(line)) => line,
            Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Ignoring unreadable input line: {e}");
                writeln!(output, "{name}: {TURN_FAILED}")?;
                continue;
            }
            Some(Err(e)) => return Err(e).context("Failed to read input"),
        };

        if line.trim().to_lowercase() == exit_command {
            break;
        }

        match session.respond(&line) {
            Ok(reply) => {
                for reply_line in &reply.lines {
                    writeln!(output, "{name}: {reply_line}")?;
                }
            }
            Err(e) if e.is_turn_level() => {
                warn!("Turn failed: {e}");
                writeln!(output, "{name}: {TURN_FAILED}")?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    writeln!(output, "{name}: {FAREWELL}")?;
    info!(
        "Chat ended after {} answered turn(s)",
        session.history().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::knowledge::KnowledgeStore;
    use crate::response::ResponseSettings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> ChatSession {
        ChatSession::new(
            KnowledgeStore::parse("hello|Hi there\nhow are you|I am fine, thanks!\n"),
            Box::new(HashingEmbedder::new(128).unwrap()),
            ResponseSettings::default(),
            StdRng::seed_from_u64(1),
        )
        .unwrap()
    }

    fn converse(input: &str, chat: &ChatConfig) -> String {
        let mut session = session();
        let mut output = Vec::new();
        run_conversation(&mut session, chat, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn answers_then_exits_case_insensitively() {
        let out = converse("how are you\nEXIT\nhello\n", &ChatConfig::default());
        assert!(out.starts_with("Bot is ready! Type 'exit' to quit."));
        assert!(out.contains("Bot: I am fine, thanks!"));
        assert!(out.trim_end().ends_with("Bot: Goodbye!"));
        assert!(!out.contains("Hi there"));
    }

    #[test]
    fn end_of_input_says_goodbye() {
        let out = converse("hello\n", &ChatConfig::default());
        assert!(out.contains("Bot: Hi there"));
        assert!(out.contains("Bot: Goodbye!"));
    }

    #[test]
    fn empty_line_reports_failure_and_continues() {
        let out = converse("\nhello\nexit\n", &ChatConfig::default());
        assert!(out.contains(&format!("Bot: {TURN_FAILED}")));
        assert!(out.contains("Bot: Hi there"));
    }

    #[test]
    fn custom_name_and_exit_command() {
        let chat = ChatConfig {
            bot_name: "Rusty".into(),
            exit_command: "bye".into(),
            ..Default::default()
        };
        let out = converse("hello\n  Bye  \nhow are you\n", &chat);
        assert!(out.contains("Rusty: Hi there"));
        assert!(out.contains("Rusty: Goodbye!"));
        assert!(!out.contains("I am fine"));
    }
}

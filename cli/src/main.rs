//! # moodchat Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point of the `moodchat` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the layered configuration and applying command-line overrides
//! - Routing execution to the command handlers in `moodchat::commands`
//!
//! ## Examples
//!
//! ```bash
//! # Start chatting with the default knowledge file (data/knowledge.txt)
//! moodchat
//!
//! # Use another knowledge file, the plain retrieval variant and a fixed seed
//! moodchat --knowledge ~/kb.txt --variant baseline --seed 7 chat
//!
//! # Run without model files
//! moodchat --embedder hashing
//!
//! # One-shot question and a knowledge file check, with info logging
//! moodchat ask how are you
//! moodchat -v check
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration (files, then flags)
//! 4. Route to the command handler, defaulting to `chat`
//! 5. Format and display any errors that occur
//!
use clap::Parser;
use moodchat::commands;
use moodchat::core::config::{self, ConfigOverrides};
use moodchat::embedding::EmbeddingBackend;
use moodchat::response::Variant;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "moodchat",
    about = "moodchat: a retrieval chatbot that notices how you feel",
    long_about = "Answers from a file of question|answer pairs using nearest-neighbor search,\n\
                  adding empathy, remembered mood context and the occasional joke.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Read configuration from this TOML file (applied after user and project files).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Knowledge file with one `question|answer` pair per line.
    #[arg(short, long, global = true, env = "MOODCHAT_KNOWLEDGE")]
    knowledge: Option<PathBuf>,
    /// Response behaviour.
    #[arg(long, value_enum, global = true)]
    variant: Option<Variant>,
    /// Maximum squared distance accepted as a confident match.
    #[arg(long, global = true)]
    threshold: Option<f32>,
    /// Seed for empathy line and joke selection.
    #[arg(long, global = true, env = "MOODCHAT_SEED")]
    seed: Option<u64>,
    /// Sentence embedder: `minilm` (needs model files) or `hashing`.
    #[arg(long, value_enum, global = true, env = "MOODCHAT_EMBEDDER")]
    embedder: Option<EmbeddingBackend>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Start an interactive conversation (default).
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Ask a single question and print the reply.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Validate the knowledge source and report what was loaded.
    Check(commands::check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let overrides = ConfigOverrides {
        knowledge: cli.knowledge,
        variant: cli.variant,
        threshold: cli.threshold,
        seed: cli.seed,
        embedder: cli.embedder,
    };

    let command_result = config::load_config(cli.config.as_deref(), &overrides).and_then(|cfg| {
        match cli.command.unwrap_or(Commands::Chat(Default::default())) {
            Commands::Chat(args) => commands::chat::handle_chat(args, &cfg),
            Commands::Ask(args) => commands::ask::handle_ask(args, &cfg),
            Commands::Check(args) => commands::check::handle_check(args, &cfg),
        }
    });

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn moodchat_cmd() -> Command {
        Command::cargo_bin("moodchat").expect("Failed to find moodchat binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        moodchat_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--knowledge"));
    }
    #[test]
    fn test_main_version_flag() {
        moodchat_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

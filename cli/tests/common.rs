//! # moodchat CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the compiled `moodchat` binary inside its own temporary directory, with
//! `HOME`/`XDG_CONFIG_HOME` pointed there and the `MOODCHAT_*` variables
//! cleared, so a developer's own configuration never leaks into a test.
//! Commands use the hashing embedder so no model files are needed.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// A small knowledge base used by most tests.
pub const KNOWLEDGE: &str = "\
hello|Hi there
how are you|I am fine, thanks!
what is your name|I'm MoodChat.
tell me a joke|Why don't scientists trust atoms? Because they make up everything!
what can you do|I answer questions and keep you company.
";

/// # Get moodchat Command (`moodchat_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `moodchat` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn moodchat_cmd() -> Command {
    Command::cargo_bin("moodchat").expect("Failed to find moodchat binary for testing")
}

/// An isolated working directory for one test.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    /// Creates the directory with a `.git` marker so the project config
    /// search never leaves it.
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
        Self { dir }
    }

    /// Writes `content` to `name` inside the test directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// A `moodchat` command running inside the test directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = moodchat_cmd();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env_remove("MOODCHAT_KNOWLEDGE")
            .env_remove("MOODCHAT_SEED")
            .env("MOODCHAT_EMBEDDER", "hashing")
            .env_remove("RUST_LOG");
        cmd
    }

    /// A command with `--knowledge` pointing at a file holding [`KNOWLEDGE`].
    pub fn cmd_with_knowledge(&self) -> Command {
        let path = self.write("knowledge.txt", KNOWLEDGE);
        let mut cmd = self.cmd();
        cmd.arg("--knowledge").arg(path).arg("--seed").arg("7");
        cmd
    }
}

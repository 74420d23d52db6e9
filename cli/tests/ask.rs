//! # moodchat CLI Ask Integration Tests
//!
//! File: cli/tests/ask.rs
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_ask_prints_answer_without_prefix() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .args(["ask", "what", "is", "your", "name"])
        .assert()
        .success()
        .stdout("I'm MoodChat.\n");
}

#[test]
fn test_ask_unknown_question_falls_back() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .args(["ask", "quantum chromodynamics lecture notes"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Sorry, I don't understand that."));
}

#[test]
fn test_ask_without_words_fails() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .args(["ask", "?!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Embedding failed"));
}

#[test]
fn test_ask_requires_text() {
    let env = TestEnv::new();
    env.cmd_with_knowledge().arg("ask").assert().failure();
}

//! # moodchat CLI Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//!
//! ## Overview
//!
//! Drives `moodchat chat` through stdin and checks the printed conversation.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_chat_answers_exact_question() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .arg("chat")
        .write_stdin("How are you?\nexit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You: ")
                .and(predicate::str::contains("Bot: I am fine, thanks!"))
                .and(predicate::str::contains("Bot: Goodbye!")),
        );
}

#[test]
fn test_chat_exit_is_case_insensitive() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .arg("chat")
        .write_stdin("  EXIT \nhello\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Bot: Goodbye!")
                .and(predicate::str::contains("Hi there").not()),
        );
}

#[test]
fn test_chat_end_of_input_says_goodbye() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .arg("chat")
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bot: Goodbye!"));
}

/// A sad message gets empathy and a joke offer; asking for the joke then
/// carries the remembered mood in front of it.
#[test]
fn test_chat_sad_user_gets_joke_offer_and_context() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .arg("chat")
        .write_stdin("I am so sad\ntell me a joke\nexit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Would you like to hear a joke?")
                .and(predicate::str::contains("Bot: I know you've been feeling down.")),
        );
}

#[test]
fn test_chat_baseline_ignores_mood() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .args(["--variant", "baseline", "chat"])
        .write_stdin("I am so sad\nexit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Bot: Sorry, I don't understand that.")
                .and(predicate::str::contains("joke").not()),
        );
}

#[test]
fn test_chat_empty_line_is_reported_and_chat_continues() {
    let env = TestEnv::new();
    env.cmd_with_knowledge()
        .arg("chat")
        .write_stdin("\nhello\nexit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Bot: Sorry, something went wrong")
                .and(predicate::str::contains("Bot: Hi there")),
        );
}

#[test]
fn test_chat_missing_knowledge_file_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--knowledge", "does-not-exist.txt", "chat"])
        .write_stdin("hello\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("You:").not())
        .stderr(predicate::str::contains("Failed to load knowledge source"));
}

#[test]
fn test_chat_knowledge_without_entries_fails() {
    let env = TestEnv::new();
    let path = env.write("empty.txt", "\nno separator here\n|missing question\n");
    env.cmd()
        .arg("--knowledge")
        .arg(path)
        .arg("chat")
        .write_stdin("hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains no question|answer entries"));
}

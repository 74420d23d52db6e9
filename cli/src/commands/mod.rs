//! # moodchat Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level commands of the `moodchat` binary. Each module defines its
//! clap arguments struct and a `handle_*` function taking those arguments and
//! the loaded configuration.
//!
//! - `chat`: interactive conversation loop (the default command)
//! - `ask`: answer a single question and exit
//! - `check`: validate the knowledge source and report what was loaded
//!

/// Interactive conversation loop.
pub mod chat;
/// One-shot question.
pub mod ask;
/// Knowledge source validation.
pub mod check;

//! # moodchat Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the rest of the crate:
//! - `config`: configuration loading, merging and validation
//! - `error`: the `ChatError` enum and the application `Result` alias
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ChatError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;

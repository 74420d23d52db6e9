//! # Knowledge Module
//!
//! File: cli/src/knowledge/mod.rs
//!
//! Question/answer pairs the chatbot answers from, plus the text normalization
//! shared with query handling.
//!
//! - `store`: loading and holding [`KnowledgeEntry`] values
//! - `normalize`: [`normalize_text`] for questions and queries
//!
pub mod normalize;
pub mod store;

pub use normalize::normalize_text;
pub use store::{load, KnowledgeEntry, KnowledgeStore, SEPARATOR};

//! # Knowledge Store
//!
//! File: cli/src/knowledge/store.rs
//!
//! ## Overview
//!
//! Loads the ordered list of question/answer pairs the chatbot can answer from.
//! The source is a UTF-8 text file with one `question|answer` pair per line:
//!
//! ```text
//! how are you|I am fine, thanks!
//! what is a pipe|The | character, as in a|b.
//! ```
//!
//! - Only the first `|` separates question from answer; later ones belong to the answer.
//! - Lines without a separator are skipped (blank lines silently, others with a `debug!` log).
//! - Lines whose question or answer ends up empty are skipped as well.
//! - Questions are normalized with [`normalize_text`]; answers are only trimmed.
//!
//! An entry's identity is its 0-based position in the store. The store is
//! immutable once loaded.
//!
use super::normalize::normalize_text;
use crate::core::error::ChatError;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Character separating the question from the answer on each line.
pub const SEPARATOR: char = '|';

/// A single stored question with its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    /// Normalized question text (see [`normalize_text`]).
    pub question: String,
    /// Answer text, trimmed but otherwise verbatim.
    pub answer: String,
}

/// Ordered, immutable collection of [`KnowledgeEntry`] values.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    source: Option<PathBuf>,
    entries: Vec<KnowledgeEntry>,
    skipped_lines: Vec<usize>,
}

/// Reads and parses the knowledge source at `path`.
///
/// # Errors
///
/// Returns [`ChatError::DataLoad`] when the file does not exist, cannot be read,
/// or is not valid UTF-8. A readable file without any valid line is *not* an
/// error here; it yields an empty store.
pub fn load(path: &Path) -> Result<KnowledgeStore, ChatError> {
    debug!("Reading knowledge source: {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| ChatError::DataLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let mut store = KnowledgeStore::parse(&content);
    store.source = Some(path.to_path_buf());
    info!(
        "Loaded {} knowledge entries from {} ({} line(s) skipped)",
        store.len(),
        path.display(),
        store.skipped_lines.len()
    );
    Ok(store)
}

impl KnowledgeStore {
    /// Parses knowledge text that has already been read into memory.
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();
        let mut skipped_lines = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some(entry) => entries.push(entry),
                None => {
                    debug!("Skipping knowledge line {}: {:?}", idx + 1, line);
                    skipped_lines.push(idx + 1);
                }
            }
        }

        Self {
            source: None,
            entries,
            skipped_lines,
        }
    }

    /// Builds a store from in-memory pairs, applying the same rules as [`KnowledgeStore::parse`].
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let entries = pairs
            .into_iter()
            .filter_map(|(q, a)| make_entry(q, a))
            .collect();
        Self {
            source: None,
            entries,
            skipped_lines: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&KnowledgeEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalized questions in entry order, ready for batch embedding.
    pub fn questions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.question.as_str()).collect()
    }

    /// 1-based line numbers that were skipped as malformed.
    pub fn skipped_lines(&self) -> &[usize] {
        &self.skipped_lines
    }

    /// The file this store was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn parse_line(line: &str) -> Option<KnowledgeEntry> {
    let (question, answer) = line.split_once(SEPARATOR)?;
    make_entry(question, answer)
}

fn make_entry(question: &str, answer: &str) -> Option<KnowledgeEntry> {
    let question = normalize_text(question);
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return None;
    }
    Some(KnowledgeEntry {
        question,
        answer: answer.to_string(),
    })
}

//! # Response Module
//!
//! File: cli/src/response/mod.rs
//!
//! ## Overview
//!
//! Everything about *what* the chatbot says once retrieval is done:
//! - `composer`: the per-turn decision between a stored answer and a fallback
//! - `jokes`: the joke bank and joke-request detection
//! - [`Variant`], [`ResponseSettings`]: thresholds and behaviour switches
//! - [`Reply`]: the composed output of one turn
//!
use crate::core::config::Config;
use crate::mood::Mood;
use serde::Deserialize;
use std::fmt;

pub mod composer;
pub mod jokes;

pub use composer::{ResponseComposer, TurnInput};
pub use jokes::JokeCategory;

/// Line used when nothing matched and no mood context is available.
pub const DIDNT_UNDERSTAND: &str = "Sorry, I don't understand that.";
/// Follows the context phrase on a fallback while a mood is active.
pub const HOW_CAN_I_HELP: &str = "How can I help you?";
/// Appended to fallbacks for moods that could use cheering up.
pub const JOKE_OFFER: &str = "Would you like to hear a joke? Just ask me to tell you one.";

/// Which of the two response behaviours to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Plain retrieval: stored answer or "didn't understand".
    Baseline,
    /// Retrieval plus mood detection, empathy, jokes and suggestions.
    #[default]
    MoodAware,
}

impl Variant {
    /// Confidence threshold used when none is configured.
    pub fn default_threshold(self) -> f32 {
        match self {
            Variant::Baseline => 1.0,
            Variant::MoodAware => 0.8,
        }
    }

    pub fn is_mood_aware(self) -> bool {
        self == Variant::MoodAware
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Baseline => "baseline",
            Variant::MoodAware => "mood-aware",
        })
    }
}

/// Thresholds and counts that drive response composition.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSettings {
    pub variant: Variant,
    /// A top match farther than this is not trusted.
    pub confidence_threshold: f32,
    /// Candidates closer than this may be suggested on a fallback.
    pub suggestion_threshold: f32,
    /// Neighbors fetched per query.
    pub candidates: usize,
    pub max_suggestions: usize,
    /// Every n-th answered turn gets the history summary.
    pub summary_interval: usize,
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl ResponseSettings {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            confidence_threshold: variant.default_threshold(),
            suggestion_threshold: 1.5,
            candidates: 3,
            max_suggestions: 2,
            summary_interval: 5,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            variant: config.retrieval.variant,
            confidence_threshold: config.confidence_threshold(),
            suggestion_threshold: config.retrieval.suggestion_threshold,
            candidates: config.retrieval.candidates,
            max_suggestions: config.retrieval.max_suggestions,
            summary_interval: config.chat.summary_interval,
        }
    }
}

/// How a reply came about.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyKind {
    /// A stored answer (or a joke in its place) was returned.
    Answer {
        entry: usize,
        distance: f32,
        joke: Option<JokeCategory>,
    },
    /// No confident match.
    Fallback { distance: f32 },
}

/// The composed output of one turn, one printable line per element.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub lines: Vec<String>,
    /// Questions offered as "did you mean" on a fallback.
    pub suggestions: Vec<String>,
}

impl Reply {
    pub fn is_answer(&self) -> bool {
        matches!(self.kind, ReplyKind::Answer { .. })
    }

    /// Distance of the best match behind this reply.
    pub fn distance(&self) -> f32 {
        match self.kind {
            ReplyKind::Answer { distance, .. } | ReplyKind::Fallback { distance } => distance,
        }
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Extra line added on the periodic summary when a mood is still active.
pub fn supportive_aside(mood: Mood) -> String {
    format!(
        "By the way, I've noticed you've been feeling {} lately. Remember, I'm always here to listen.",
        mood.adjective()
    )
}

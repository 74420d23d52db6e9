//! # Conversation History
//!
//! File: cli/src/session/history.rs
//!
//! Append-only record of the turns that produced a direct answer. Fallback
//! turns are never recorded. Every `summary_interval`-th record signals that
//! a periodic summary is due.

use crate::mood::{Mood, MoodSet};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// One answered exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub user_text: String,
    pub bot_text: String,
    pub detected_moods: MoodSet,
    pub active_mood: Option<Mood>,
    pub recorded_at: DateTime<Local>,
}

/// Aggregate view of the history, logged when a summary is due.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub turns: usize,
    /// How many recorded turns had each mood active.
    pub active_moods: BTreeMap<Mood, usize>,
}

#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
    summary_interval: usize,
}

impl ConversationHistory {
    pub fn new(summary_interval: usize) -> Self {
        Self {
            turns: Vec::new(),
            summary_interval: summary_interval.max(1),
        }
    }

    /// Appends a turn. Returns `true` when this record completes another
    /// `summary_interval` turns.
    pub fn record(&mut self, turn: ConversationTurn) -> bool {
        self.turns.push(turn);
        self.turns.len() % self.summary_interval == 0
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn summary(&self) -> HistorySummary {
        let mut active_moods = BTreeMap::new();
        for mood in self.turns.iter().filter_map(|t| t.active_mood) {
            *active_moods.entry(mood).or_insert(0) += 1;
        }
        HistorySummary {
            turns: self.turns.len(),
            active_moods,
        }
    }
}

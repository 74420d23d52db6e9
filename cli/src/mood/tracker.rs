//! # Mood State Tracker
//!
//! File: cli/src/mood/tracker.rs
//!
//! ## Overview
//!
//! Keeps one "active" mood alive for a bounded number of turns. Each turn the
//! tracker sees that turn's detected moods and applies one transition:
//!
//! 1. A negative mood (first of [`TRACKING_PRIORITY`]) sets it active with
//!    persistence [`NEGATIVE_PERSISTENCE`].
//! 2. Otherwise `Happy` sets it active with persistence [`POSITIVE_PERSISTENCE`].
//! 3. Otherwise the active mood is left as is.
//! 4. Then the counter is decremented if positive; at zero the mood is cleared.
//!
//! A sad detection therefore stays active for that turn and the four turns
//! after it, and is gone on the sixth.
//!
use super::{Mood, MoodSet, TRACKING_PRIORITY};
use tracing::debug;

/// Turns a negative mood stays active after detection.
pub const NEGATIVE_PERSISTENCE: u32 = 5;
/// Turns a happy mood stays active after detection.
pub const POSITIVE_PERSISTENCE: u32 = 3;

/// Snapshot of the tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodState {
    pub active: Option<Mood>,
    pub persistence: u32,
}

/// Per-conversation mood state machine.
#[derive(Debug, Clone, Default)]
pub struct MoodTracker {
    state: MoodState,
}

impl MoodTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MoodState {
        self.state
    }

    /// Applies one turn's detections and returns the new state.
    pub fn observe(&mut self, detected: &MoodSet) -> MoodState {
        let previous = self.state;

        if let Some(mood) = TRACKING_PRIORITY.iter().find(|m| detected.contains(*m)) {
            self.state.active = Some(*mood);
            self.state.persistence = NEGATIVE_PERSISTENCE;
        } else if detected.contains(&Mood::Happy) {
            self.state.active = Some(Mood::Happy);
            self.state.persistence = POSITIVE_PERSISTENCE;
        }

        if self.state.persistence > 0 {
            self.state.persistence -= 1;
        } else {
            self.state.active = None;
        }

        if previous.active != self.state.active {
            debug!(
                "Active mood changed: {:?} -> {:?}",
                previous.active, self.state.active
            );
        }
        self.state
    }
}

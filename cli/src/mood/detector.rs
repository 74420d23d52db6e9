//! # Mood Detector
//!
//! File: cli/src/mood/detector.rs
//!
//! Case-insensitive substring matching of every mood keyword against the raw
//! input. Presence of any keyword is a full match; there is no scoring.

use super::{Mood, MoodSet};
use tracing::trace;

/// Returns every mood with at least one keyword contained in `text`.
pub fn detect(text: &str) -> MoodSet {
    let haystack = text.to_lowercase();
    let detected: MoodSet = Mood::ALL
        .into_iter()
        .filter(|mood| mood.keywords().iter().any(|kw| haystack.contains(kw)))
        .collect();
    if !detected.is_empty() {
        trace!("Detected moods {:?} in {:?}", detected, text);
    }
    detected
}

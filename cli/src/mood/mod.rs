//! # Mood Module
//!
//! File: cli/src/mood/mod.rs
//!
//! ## Overview
//!
//! Keyword-based mood awareness for the chatbot:
//! - [`Mood`]: the closed mood taxonomy with its static keyword, empathy and
//!   context-phrase tables
//! - `detector`: finds every mood whose keywords occur in a text
//! - `tracker`: keeps one mood "active" for a few turns after it was detected
//!
//! Two fixed priority orders collapse a set of detected moods to one:
//! [`TRACKING_PRIORITY`] for the tracker and [`EMPATHY_PRIORITY`] for choosing
//! which empathy line to show.
//!
use std::collections::BTreeSet;
use std::fmt;

pub mod detector;
pub mod tracker;

pub use detector::detect;
pub use tracker::{MoodState, MoodTracker};

/// Moods detected in one input. Ordered by declaration order of [`Mood`].
pub type MoodSet = BTreeSet<Mood>;

/// The moods the chatbot recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mood {
    Sad,
    Stressed,
    Angry,
    Happy,
    Tired,
    Bored,
}

/// Negative moods take over the tracker in this order; `Happy` only applies
/// when none of them matched.
pub const TRACKING_PRIORITY: [Mood; 4] = [Mood::Sad, Mood::Stressed, Mood::Angry, Mood::Tired];

/// Order used to pick the single empathy line for a turn.
pub const EMPATHY_PRIORITY: [Mood; 6] = [
    Mood::Sad,
    Mood::Stressed,
    Mood::Angry,
    Mood::Tired,
    Mood::Bored,
    Mood::Happy,
];

impl Mood {
    /// Every mood once; [`detect`](crate::mood::detect) checks the keywords of each.
    pub const ALL: [Mood; 6] = [
        Mood::Sad,
        Mood::Stressed,
        Mood::Angry,
        Mood::Happy,
        Mood::Tired,
        Mood::Bored,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Sad => "sad",
            Mood::Stressed => "stressed",
            Mood::Angry => "angry",
            Mood::Happy => "happy",
            Mood::Tired => "tired",
            Mood::Bored => "bored",
        }
    }

    /// Trigger keywords and phrases, lower-case.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Mood::Sad => &[
                "sad",
                "unhappy",
                "depressed",
                "feeling down",
                "lonely",
                "heartbroken",
                "miserable",
                "crying",
                "upset",
            ],
            Mood::Stressed => &[
                "stressed",
                "stress",
                "anxious",
                "anxiety",
                "overwhelmed",
                "worried",
                "nervous",
                "panic",
                "too much work",
            ],
            Mood::Angry => &[
                "angry",
                "furious",
                "annoyed",
                "frustrated",
                "irritated",
                "fed up",
                "pissed off",
            ],
            Mood::Happy => &[
                "happy",
                "great",
                "awesome",
                "excited",
                "glad",
                "wonderful",
                "fantastic",
                "amazing",
            ],
            Mood::Tired => &[
                "tired",
                "exhausted",
                "sleepy",
                "worn out",
                "drained",
                "fatigued",
                "no energy",
            ],
            Mood::Bored => &["bored", "boring", "nothing to do", "dull"],
        }
    }

    /// Empathy lines shown when the mood is detected; one is picked at random.
    pub fn empathy_lines(self) -> &'static [&'static str] {
        match self {
            Mood::Sad => &[
                "I'm sorry you're feeling down. I'm here for you.",
                "That sounds hard. It's okay to feel sad sometimes.",
                "Sending you a virtual hug. Want to talk about it?",
            ],
            Mood::Stressed => &[
                "That sounds stressful. Try taking a slow, deep breath.",
                "You're handling a lot right now. One step at a time.",
                "Stress is tough. Remember to give yourself a short break.",
            ],
            Mood::Angry => &[
                "I can tell you're frustrated. That's completely valid.",
                "It sounds like something really got to you. Want to vent?",
                "Anger is a normal reaction. Let's take it one thing at a time.",
            ],
            Mood::Happy => &[
                "That's wonderful to hear!",
                "Love the good vibes! Keep it up.",
                "Yay! Your happiness is contagious.",
            ],
            Mood::Tired => &[
                "You sound tired. Make sure you get some rest.",
                "Running low on energy? A short break could help.",
                "Rest is productive too. Be kind to yourself.",
            ],
            Mood::Bored => &[
                "Bored, huh? Let's find something fun.",
                "Boredom can be a sign you need something new. Ask me anything!",
            ],
        }
    }

    /// Short phrase used while the mood persists from an earlier turn.
    pub fn context_phrase(self) -> &'static str {
        match self {
            Mood::Sad => "I know you've been feeling down.",
            Mood::Stressed => "I know things have been stressful.",
            Mood::Angry => "I know you've been frustrated.",
            Mood::Happy => "Glad you're in a good mood!",
            Mood::Tired => "I know you've been tired.",
            Mood::Bored => "Let's shake off the boredom.",
        }
    }

    /// Adjective used in the periodic supportive aside.
    pub fn adjective(self) -> &'static str {
        match self {
            Mood::Sad => "down",
            Mood::Stressed => "stressed",
            Mood::Angry => "frustrated",
            Mood::Happy => "happy",
            Mood::Tired => "tired",
            Mood::Bored => "bored",
        }
    }

    /// Moods for which the chatbot offers to tell a joke.
    pub fn wants_cheering_up(self) -> bool {
        matches!(self, Mood::Sad | Mood::Stressed | Mood::Bored)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The mood whose empathy line is shown for this set of detections.
pub fn dominant(detected: &MoodSet) -> Option<Mood> {
    EMPATHY_PRIORITY
        .iter()
        .copied()
        .find(|mood| detected.contains(mood))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mood_has_tables() {
        for mood in Mood::ALL {
            assert!(!mood.keywords().is_empty(), "{mood} has no keywords");
            assert!(!mood.empathy_lines().is_empty(), "{mood} has no empathy lines");
            assert!(!mood.context_phrase().is_empty());
            assert!(mood.keywords().iter().all(|k| *k == k.to_lowercase()));
        }
    }

    #[test]
    fn dominant_follows_empathy_priority() {
        let set: MoodSet = [Mood::Happy, Mood::Bored, Mood::Angry].into_iter().collect();
        assert_eq!(dominant(&set), Some(Mood::Angry));

        let set: MoodSet = [Mood::Happy, Mood::Bored].into_iter().collect();
        assert_eq!(dominant(&set), Some(Mood::Bored));

        assert_eq!(dominant(&MoodSet::new()), None);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Mood::Stressed.to_string(), "stressed");
    }
}

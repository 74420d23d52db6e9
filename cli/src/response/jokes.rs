//! # Joke Bank
//!
//! File: cli/src/response/jokes.rs
//!
//! Static jokes grouped by [`JokeCategory`], plus the rules deciding whether a
//! query asks for a joke and which categories fit the user's mood.

use crate::mood::{Mood, MoodSet};
use rand::seq::SliceRandom;
use rand::Rng;

/// Keywords (matched against the normalized query) that mean "tell me a joke".
pub const JOKE_KEYWORDS: &[&str] = &["joke", "funny", "make me laugh", "cheer me up"];

/// The stock joke stored in knowledge files. When it is the matched answer
/// and the user asked for a joke, a fresh one from the bank replaces it.
pub const JOKE_PLACEHOLDER: &str =
    "Why don't scientists trust atoms? Because they make up everything!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JokeCategory {
    General,
    Programmer,
    Uplifting,
    Silly,
}

impl JokeCategory {
    pub const ALL: [JokeCategory; 4] = [
        JokeCategory::General,
        JokeCategory::Programmer,
        JokeCategory::Uplifting,
        JokeCategory::Silly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JokeCategory::General => "general",
            JokeCategory::Programmer => "programmer",
            JokeCategory::Uplifting => "uplifting",
            JokeCategory::Silly => "silly",
        }
    }

    pub fn jokes(self) -> &'static [&'static str] {
        match self {
            JokeCategory::General => &[
                "I told my wife she was drawing her eyebrows too high. She looked surprised.",
                "Why did the scarecrow win an award? Because he was outstanding in his field.",
                "I'm reading a book about anti-gravity. It's impossible to put down.",
                "What do you call a fake noodle? An impasta.",
            ],
            JokeCategory::Programmer => &[
                "Why do programmers prefer dark mode? Because light attracts bugs.",
                "There are 10 kinds of people: those who understand binary and those who don't.",
                "A SQL query walks into a bar, walks up to two tables and asks: can I join you?",
                "Why did the developer go broke? Because he used up all his cache.",
            ],
            JokeCategory::Uplifting => &[
                "What did the ocean say to the beach? Nothing, it just waved. And I'm waving at you too!",
                "Why did the sun skip college? It already had a million degrees, just like your potential.",
                "What do you call a bear with no teeth? A gummy bear. Sweet, like you.",
                "Why do bees have sticky hair? Because they use honeycombs. Stay sweet!",
            ],
            JokeCategory::Silly => &[
                "Why don't eggs tell jokes? They'd crack each other up.",
                "What do you call cheese that isn't yours? Nacho cheese.",
                "Why did the banana go to the doctor? It wasn't peeling well.",
                "How does a penguin build its house? Igloos it together.",
            ],
        }
    }
}

/// True when the normalized query contains one of [`JOKE_KEYWORDS`].
pub fn wants_joke(normalized_query: &str) -> bool {
    JOKE_KEYWORDS
        .iter()
        .any(|keyword| normalized_query.contains(keyword))
}

/// True when `answer` is the stock joke placeholder.
pub fn is_placeholder(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(JOKE_PLACEHOLDER)
}

/// Categories to draw from, given this turn's detections and the mood
/// carried over by the tracker. Sad or stressed anywhere wins over bored.
pub fn categories_for(detected: &MoodSet, active: Option<Mood>) -> &'static [JokeCategory] {
    let feels = |mood: Mood| active == Some(mood) || detected.contains(&mood);
    if feels(Mood::Sad) || feels(Mood::Stressed) {
        &[JokeCategory::Uplifting]
    } else if feels(Mood::Bored) {
        &[
            JokeCategory::General,
            JokeCategory::Silly,
            JokeCategory::Programmer,
        ]
    } else {
        &[JokeCategory::General]
    }
}

/// Picks a joke suited to the user's moods, returning its category and text.
pub fn pick_joke<R: Rng + ?Sized>(
    detected: &MoodSet,
    active: Option<Mood>,
    rng: &mut R,
) -> (JokeCategory, &'static str) {
    let pool: Vec<(JokeCategory, &'static str)> = categories_for(detected, active)
        .iter()
        .flat_map(|&category| category.jokes().iter().map(move |&joke| (category, joke)))
        .collect();
    pool.choose(rng)
        .copied()
        .unwrap_or((JokeCategory::General, JOKE_PLACEHOLDER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn wants_joke_matches_keywords() {
        assert!(wants_joke("tell me a joke"));
        assert!(wants_joke("can you cheer me up"));
        assert!(!wants_joke("what time is it"));
    }

    #[test]
    fn placeholder_comparison_ignores_case_and_padding() {
        assert!(is_placeholder(&format!("  {}  ", JOKE_PLACEHOLDER.to_uppercase())));
        assert!(!is_placeholder("Knock knock."));
    }

    #[test]
    fn placeholder_is_not_in_the_bank() {
        for category in JokeCategory::ALL {
            assert!(!category.jokes().contains(&JOKE_PLACEHOLDER));
        }
    }

    #[test]
    fn sad_and_stressed_get_uplifting_jokes() {
        let mut rng = StdRng::seed_from_u64(1);
        let none = MoodSet::new();
        for _ in 0..20 {
            let (category, joke) = pick_joke(&none, Some(Mood::Sad), &mut rng);
            assert_eq!(category, JokeCategory::Uplifting);
            assert!(JokeCategory::Uplifting.jokes().contains(&joke));
            let stressed = MoodSet::from([Mood::Stressed]);
            assert_eq!(pick_joke(&stressed, None, &mut rng).0, JokeCategory::Uplifting);
        }
    }

    #[test]
    fn active_sadness_outranks_detected_boredom() {
        let bored = MoodSet::from([Mood::Bored]);
        for seed in 0..50 {
            let (category, joke) = pick_joke(&bored, Some(Mood::Sad), &mut StdRng::seed_from_u64(seed));
            assert_eq!(category, JokeCategory::Uplifting);
            assert!(!JokeCategory::General.jokes().contains(&joke));
        }
        assert_eq!(
            categories_for(&MoodSet::from([Mood::Bored, Mood::Stressed]), None),
            &[JokeCategory::Uplifting]
        );
    }

    #[test]
    fn bored_draws_from_the_mixed_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let bored = MoodSet::from([Mood::Bored]);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_joke(&bored, Some(Mood::Angry), &mut rng).0);
        }
        assert!(!seen.contains(&JokeCategory::Uplifting));
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn other_moods_get_general_jokes() {
        let mut rng = StdRng::seed_from_u64(3);
        let none = MoodSet::new();
        assert_eq!(pick_joke(&none, None, &mut rng).0, JokeCategory::General);
        assert_eq!(pick_joke(&none, Some(Mood::Happy), &mut rng).0, JokeCategory::General);
        let angry = MoodSet::from([Mood::Angry]);
        assert_eq!(pick_joke(&angry, Some(Mood::Angry), &mut rng).0, JokeCategory::General);
    }

    #[test]
    fn same_seed_same_joke() {
        let none = MoodSet::new();
        let a = pick_joke(&none, None, &mut StdRng::seed_from_u64(11));
        let b = pick_joke(&none, None, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}

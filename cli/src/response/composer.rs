//! # Response Composer
//!
//! File: cli/src/response/composer.rs
//!
//! ## Overview
//!
//! Turns one retrieval result into the lines the user sees. The decision hinges
//! on the distance of the nearest stored question:
//!
//! - **Confident match** (`distance <= confidence_threshold`): the stored
//!   answer, possibly swapped for a fresh joke, with mood awareness in front
//!   (an empathy line for a mood detected this turn, or the context phrase of a
//!   mood persisting from an earlier turn).
//! - **Fallback** (`distance > confidence_threshold`): an empathy line, a
//!   context-prefixed "how can I help", or the plain "didn't understand" line;
//!   optionally a joke offer and "did you mean" suggestions. A fallback never
//!   repeats a stored answer.
//!
//! The baseline variant only ever produces the stored answer or the plain
//! fallback line.
//!
use super::jokes;
use super::{Reply, ReplyKind, ResponseSettings, DIDNT_UNDERSTAND, HOW_CAN_I_HELP, JOKE_OFFER};
use crate::index::Neighbor;
use crate::knowledge::KnowledgeStore;
use crate::mood::{self, Mood, MoodSet, MoodState};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Everything the composer needs to know about the current turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnInput<'a> {
    /// The user's text after normalization.
    pub query: &'a str,
    /// Nearest stored questions, closest first.
    pub neighbors: &'a [Neighbor],
    /// Moods detected in this turn's input.
    pub detected: &'a MoodSet,
    /// Mood state after this turn's tracker update.
    pub mood: MoodState,
    /// The query asked for a joke.
    pub wants_joke: bool,
}

impl TurnInput<'_> {
    /// A joke is offered while the tracked mood is one that wants cheering up,
    /// or when boredom (which is never tracked) shows up in this turn.
    fn offers_joke(&self) -> bool {
        self.mood.active.is_some_and(Mood::wants_cheering_up)
            || self.detected.contains(&Mood::Bored)
    }
}

pub struct ResponseComposer<'a> {
    settings: &'a ResponseSettings,
    store: &'a KnowledgeStore,
}

impl<'a> ResponseComposer<'a> {
    pub fn new(settings: &'a ResponseSettings, store: &'a KnowledgeStore) -> Self {
        Self { settings, store }
    }

    pub fn compose<R: Rng + ?Sized>(&self, turn: &TurnInput<'_>, rng: &mut R) -> Reply {
        let best = turn.neighbors.first().copied();
        let best_distance = best.map_or(f32::INFINITY, |n| n.distance);

        match best {
            Some(top) if best_distance <= self.settings.confidence_threshold => {
                match self.store.get(top.index) {
                    Some(entry) => self.answer(turn, top, &entry.answer, rng),
                    None => self.fallback(turn, best_distance, rng),
                }
            }
            _ => self.fallback(turn, best_distance, rng),
        }
    }

    fn answer<R: Rng + ?Sized>(
        &self,
        turn: &TurnInput<'_>,
        top: Neighbor,
        stored: &str,
        rng: &mut R,
    ) -> Reply {
        let mood_aware = self.settings.variant.is_mood_aware();
        let mut answer = stored.to_string();
        let mut joke = None;

        if mood_aware
            && turn.wants_joke
            && (jokes::is_placeholder(stored) || turn.query.contains("joke"))
        {
            let (category, text) = jokes::pick_joke(turn.detected, turn.mood.active, rng);
            debug!("Replacing answer with a {} joke", category.label());
            answer = text.to_string();
            joke = Some(category);
        }

        let mut lines = Vec::with_capacity(2);
        match (mood_aware, mood::dominant(turn.detected), turn.mood.active) {
            (true, Some(detected), _) => {
                lines.push(pick_line(detected.empathy_lines(), rng).to_string());
                lines.push(answer);
            }
            (true, None, Some(active)) => {
                lines.push(format!("{} {}", active.context_phrase(), answer));
            }
            _ => lines.push(answer),
        }

        Reply {
            kind: ReplyKind::Answer {
                entry: top.index,
                distance: top.distance,
                joke,
            },
            lines,
            suggestions: Vec::new(),
        }
    }

    fn fallback<R: Rng + ?Sized>(&self, turn: &TurnInput<'_>, distance: f32, rng: &mut R) -> Reply {
        if !self.settings.variant.is_mood_aware() {
            return Reply {
                kind: ReplyKind::Fallback { distance },
                lines: vec![DIDNT_UNDERSTAND.to_string()],
                suggestions: Vec::new(),
            };
        }

        let mut lines = Vec::new();
        if let Some(detected) = mood::dominant(turn.detected) {
            lines.push(pick_line(detected.empathy_lines(), rng).to_string());
        } else if let Some(active) = turn.mood.active {
            lines.push(format!("{} {}", active.context_phrase(), HOW_CAN_I_HELP));
        } else {
            lines.push(DIDNT_UNDERSTAND.to_string());
        }

        if turn.offers_joke() {
            lines.push(JOKE_OFFER.to_string());
        }

        let suggestions = if distance < self.settings.suggestion_threshold {
            self.suggestions(turn.neighbors)
        } else {
            Vec::new()
        };
        if let Some(line) = suggestion_line(&suggestions) {
            lines.push(line);
        }

        Reply {
            kind: ReplyKind::Fallback { distance },
            lines,
            suggestions,
        }
    }

    /// Distinct questions among the candidates that are close enough, closest first.
    fn suggestions(&self, neighbors: &[Neighbor]) -> Vec<String> {
        let mut picked: Vec<String> = Vec::new();
        for neighbor in neighbors.iter().take(self.settings.candidates) {
            if picked.len() >= self.settings.max_suggestions {
                break;
            }
            if neighbor.distance >= self.settings.suggestion_threshold {
                continue;
            }
            if let Some(entry) = self.store.get(neighbor.index) {
                if !picked.contains(&entry.question) {
                    picked.push(entry.question.clone());
                }
            }
        }
        picked
    }
}

fn pick_line<R: Rng + ?Sized>(options: &'static [&'static str], rng: &mut R) -> &'static str {
    options.choose(rng).copied().unwrap_or(DIDNT_UNDERSTAND)
}

fn suggestion_line(suggestions: &[String]) -> Option<String> {
    match suggestions {
        [] => None,
        [only] => Some(format!("Did you mean: \"{only}\"?")),
        [first, rest @ ..] => {
            let rest: Vec<String> = rest.iter().map(|q| format!("\"{q}\"")).collect();
            Some(format!("Did you mean: \"{first}\" or {}?", rest.join(" or ")))
        }
    }
}

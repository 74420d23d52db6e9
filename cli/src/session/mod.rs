//! # Chat Session
//!
//! File: cli/src/session/mod.rs
//!
//! ## Overview
//!
//! `ChatSession` owns every piece of per-conversation state: the knowledge
//! store, the embedder, the similarity index built over the stored questions,
//! the mood tracker, the answered-turn history and the random source used for
//! empathy lines and jokes. One session serves one conversation; nothing is
//! global and nothing is shared.
//!
//! ## Turn pipeline
//!
//! `respond` runs, in order:
//! 1. normalize the input
//! 2. embed it (errors end the turn here, before any state changes)
//! 3. query the index for the nearest candidates
//! 4. detect moods and advance the tracker (mood-aware variant only)
//! 5. compose the reply
//! 6. record answered turns; every `summary_interval`-th record logs a summary
//!    and, if a mood is still active, appends a supportive aside
//!
//! ## Examples
//!
//! ```
//! use moodchat::embedding::HashingEmbedder;
//! use moodchat::knowledge::KnowledgeStore;
//! use moodchat::response::ResponseSettings;
//! use moodchat::session::ChatSession;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let store = KnowledgeStore::from_pairs([("how are you", "I am fine, thanks!")]);
//! let embedder = Box::new(HashingEmbedder::new(384).unwrap());
//! let mut session = ChatSession::new(
//!     store,
//!     embedder,
//!     ResponseSettings::default(),
//!     StdRng::seed_from_u64(1),
//! )
//! .unwrap();
//!
//! let reply = session.respond("How are you?").unwrap();
//! assert_eq!(reply.text(), "I am fine, thanks!");
//! ```
//!
use crate::core::config::Config;
use crate::core::error::ChatError;
use crate::embedding::{self, EmbedError, Embedder};
use crate::index::{FlatIndex, IndexError};
use crate::knowledge::{self, normalize_text, KnowledgeStore};
use crate::mood::{self, MoodSet, MoodState, MoodTracker};
use crate::response::{
    jokes, supportive_aside, Reply, ReplyKind, ResponseComposer, ResponseSettings, TurnInput,
};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod history;

pub use history::{ConversationHistory, ConversationTurn, HistorySummary};

/// A single conversation and all state it needs.
pub struct ChatSession<R: Rng = StdRng> {
    store: KnowledgeStore,
    embedder: Box<dyn Embedder>,
    index: FlatIndex,
    settings: ResponseSettings,
    tracker: MoodTracker,
    history: ConversationHistory,
    rng: R,
}

impl ChatSession<StdRng> {
    /// Loads the configured knowledge source and builds a session around the
    /// configured embedder.
    ///
    /// # Errors
    ///
    /// [`ChatError::DataLoad`] or [`ChatError::EmptyKnowledge`] for an unusable
    /// knowledge source; see [`ChatSession::with_store`] for the rest.
    pub fn from_config(config: &Config) -> Result<Self, ChatError> {
        let store = knowledge::load(&PathBuf::from(&config.knowledge.path))?;
        Self::with_store(store, config)
    }

    /// Builds a session over an already loaded `store`, using the embedder,
    /// response settings and seed from `config`.
    ///
    /// # Errors
    ///
    /// [`ChatError::Embedding`] when the embedder cannot be built (invalid
    /// dimension, missing model files), plus everything [`ChatSession::new`]
    /// reports.
    pub fn with_store(store: KnowledgeStore, config: &Config) -> Result<Self, ChatError> {
        let embedder = embedding::from_config(&config.embedding)?;
        let rng = match config.chat.seed {
            Some(seed) => {
                debug!("Seeding response randomness with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::new(store, embedder, ResponseSettings::from_config(config), rng)
    }
}

impl<R: Rng> ChatSession<R> {
    /// Embeds every stored question and builds the index.
    ///
    /// # Errors
    ///
    /// [`ChatError::EmptyKnowledge`] when `store` has no entries; embedding and
    /// index errors when the questions cannot be embedded consistently.
    pub fn new(
        store: KnowledgeStore,
        embedder: Box<dyn Embedder>,
        settings: ResponseSettings,
        rng: R,
    ) -> Result<Self, ChatError> {
        if store.is_empty() {
            return Err(ChatError::EmptyKnowledge {
                path: store
                    .source()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("<memory>")),
            });
        }

        let questions = store.questions();
        let vectors = embedder.embed(&questions)?;
        if vectors.len() != questions.len() {
            return Err(EmbedError::CountMismatch {
                requested: questions.len(),
                returned: vectors.len(),
            }
            .into());
        }
        let index = FlatIndex::build(vectors)?;
        if index.dimension() != embedder.dimension() {
            return Err(IndexError::DimensionMismatch {
                expected: embedder.dimension(),
                found: index.dimension(),
            }
            .into());
        }
        info!(
            "Indexed {} questions ({} dimensions, {} variant, threshold {})",
            store.len(),
            index.dimension(),
            settings.variant,
            settings.confidence_threshold
        );

        let history = ConversationHistory::new(settings.summary_interval);
        Ok(Self {
            store,
            embedder,
            index,
            settings,
            tracker: MoodTracker::new(),
            history,
            rng,
        })
    }

    /// Handles one user utterance.
    ///
    /// # Errors
    ///
    /// Turn-level [`ChatError::Embedding`] / [`ChatError::Index`] errors. The
    /// session is left unchanged and can take the next turn.
    pub fn respond(&mut self, input: &str) -> Result<Reply, ChatError> {
        let query = normalize_text(input);
        let vector = self.embedder.embed_one(&query)?;
        let neighbors = self.index.query(&vector, self.settings.candidates)?;

        let mood_aware = self.settings.variant.is_mood_aware();
        let detected = if mood_aware {
            mood::detect(input)
        } else {
            MoodSet::new()
        };
        let mood_state = if mood_aware {
            self.tracker.observe(&detected)
        } else {
            self.tracker.state()
        };

        let turn = TurnInput {
            query: &query,
            neighbors: &neighbors,
            detected: &detected,
            mood: mood_state,
            wants_joke: mood_aware && jokes::wants_joke(&query),
        };
        let composer = ResponseComposer::new(&self.settings, &self.store);
        let mut reply = composer.compose(&turn, &mut self.rng);

        match reply.kind {
            ReplyKind::Answer {
                entry, distance, ..
            } => {
                debug!("Answered from entry {entry} (distance {distance:.4})");
                self.record(input, &mut reply, detected, mood_state);
            }
            ReplyKind::Fallback { distance } => {
                debug!("No confident match (best distance {distance:.4})");
            }
        }
        Ok(reply)
    }

    fn record(&mut self, input: &str, reply: &mut Reply, detected: MoodSet, mood_state: MoodState) {
        let summary_due = self.history.record(ConversationTurn {
            user_text: input.trim().to_string(),
            bot_text: reply.text(),
            detected_moods: detected,
            active_mood: mood_state.active,
            recorded_at: Local::now(),
        });
        if !summary_due {
            return;
        }

        let summary = self.history.summary();
        info!(
            "Conversation summary: {} answered turn(s), active moods {:?}",
            summary.turns, summary.active_moods
        );
        if let Some(mood) = mood_state.active {
            reply.lines.push(supportive_aside(mood));
        }
    }

    pub fn mood_state(&self) -> MoodState {
        self.tracker.state()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn settings(&self) -> &ResponseSettings {
        &self.settings
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }
}

//! # Embedding Module
//!
//! File: cli/src/embedding/mod.rs
//!
//! ## Overview
//!
//! The boundary between the chatbot and whatever turns text into vectors.
//! Everything downstream (index, session) only sees the [`Embedder`] trait.
//! Two backends exist:
//!
//! - [`MiniLmEmbedder`]: a BERT sentence encoder (all-MiniLM-L6-v2 or any
//!   compatible checkpoint) run on the CPU with candle. This is the default.
//! - [`HashingEmbedder`]: feature hashing, no model files. Used offline and by
//!   the test suite.
//!
//! [`from_config`] builds the configured one. Implementations must be
//! deterministic for a given configuration and return vectors of exactly
//! [`Embedder::dimension`] elements.
//!
use crate::core::config::EmbeddingConfig;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::info;

mod hashing;
mod minilm;

pub use hashing::HashingEmbedder;
pub use minilm::MiniLmEmbedder;

/// A single embedding vector.
pub type Embedding = Vec<f32>;

/// Errors produced while embedding text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbedError {
    #[error("cannot embed empty text")]
    EmptyInput,

    #[error("invalid embedding dimension {0}")]
    InvalidDimension(usize),

    #[error("embedder returned {returned} vector(s) for {requested} input(s)")]
    CountMismatch { requested: usize, returned: usize },

    #[error("failed to load embedding model from '{path}': {reason}")]
    ModelLoad { path: String, reason: String },

    #[error("model inference failed: {0}")]
    Inference(String),
}

/// Which [`Embedder`] implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum EmbeddingBackend {
    /// BERT sentence encoder loaded from `embedding.model_dir`.
    #[default]
    #[serde(rename = "minilm")]
    #[value(name = "minilm")]
    MiniLm,
    /// Feature hashing with `embedding.dimension` slots.
    #[serde(rename = "hashing")]
    #[value(name = "hashing")]
    Hashing,
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EmbeddingBackend::MiniLm => "minilm",
            EmbeddingBackend::Hashing => "hashing",
        })
    }
}

/// Builds the embedder selected by `config.backend`.
///
/// # Errors
///
/// [`EmbedError::InvalidDimension`] for a zero hashing dimension,
/// [`EmbedError::ModelLoad`] when the MiniLM files are missing or unreadable.
pub fn from_config(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>, EmbedError> {
    let embedder: Box<dyn Embedder> = match config.backend {
        EmbeddingBackend::Hashing => Box::new(HashingEmbedder::new(config.dimension)?),
        EmbeddingBackend::MiniLm => Box::new(MiniLmEmbedder::load(Path::new(&config.model_dir))?),
    };
    info!(
        "Using {} embedder ({} dimensions)",
        config.backend,
        embedder.dimension()
    );
    Ok(embedder)
}

/// Converts text into fixed-length vectors.
pub trait Embedder {
    /// Embeds a batch of texts, one vector per input, in input order.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError>;

    /// Length of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Embeds a single text.
    fn embed_one(&self, text: &str) -> Result<Embedding, EmbedError> {
        let mut vectors = self.embed(&[text])?;
        match (vectors.pop(), vectors.is_empty()) {
            (Some(vector), true) => Ok(vector),
            (popped, _) => Err(EmbedError::CountMismatch {
                requested: 1,
                returned: vectors.len() + usize::from(popped.is_some()),
            }),
        }
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
        (**self).embed(texts)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NothingEmbedder;

    impl Embedder for NothingEmbedder {
        fn embed(&self, _texts: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
            Ok(Vec::new())
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    #[test]
    fn embed_one_rejects_missing_output() {
        assert_eq!(
            NothingEmbedder.embed_one("hi"),
            Err(EmbedError::CountMismatch {
                requested: 1,
                returned: 0
            })
        );
    }

    #[test]
    fn boxed_embedder_delegates() {
        let boxed: Box<dyn Embedder> = Box::new(HashingEmbedder::new(16).unwrap());
        assert_eq!(boxed.dimension(), 16);
        assert_eq!(boxed.embed_one("hello").unwrap().len(), 16);
    }

    #[test]
    fn hashing_backend_uses_configured_dimension() {
        let config = EmbeddingConfig {
            backend: EmbeddingBackend::Hashing,
            dimension: 48,
            ..Default::default()
        };
        let embedder = from_config(&config).unwrap();
        assert_eq!(embedder.dimension(), 48);
        assert_eq!(embedder.embed_one("hello there").unwrap().len(), 48);
    }

    #[test]
    fn minilm_backend_without_model_files_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmbeddingConfig {
            backend: EmbeddingBackend::MiniLm,
            model_dir: dir.path().join("missing").to_string_lossy().into_owned(),
            ..Default::default()
        };
        let err = from_config(&config).err().unwrap();
        assert!(matches!(err, EmbedError::ModelLoad { .. }));
        assert!(err.to_string().starts_with("failed to load embedding model from"));
    }

    #[test]
    fn backend_names_match_config_values() {
        assert_eq!(EmbeddingBackend::default(), EmbeddingBackend::MiniLm);
        assert_eq!(EmbeddingBackend::MiniLm.to_string(), "minilm");
        assert_eq!(EmbeddingBackend::Hashing.to_string(), "hashing");
    }
}

//! # Hashing Embedder
//!
//! File: cli/src/embedding/hashing.rs
//!
//! A deterministic sentence embedder based on feature hashing. It needs no
//! model files, which makes it the offline backend and the one tests rely on.
//!
//! Features per text:
//! - every word token (weight [`WORD_WEIGHT`])
//! - every pair of adjacent words (weight [`PAIR_WEIGHT`])
//! - every character trigram of the `<word>`-padded token (weight [`TRIGRAM_WEIGHT`])
//!
//! Each feature is hashed with 64-bit FNV-1a; the hash selects a slot and a
//! sign. The final vector is L2-normalized, so the squared Euclidean distance
//! between two embeddings is `2 - 2 * cosine` and lies in `[0, 4]`.
//!
use super::{EmbedError, Embedder, Embedding};

pub const WORD_WEIGHT: f32 = 1.0;
pub const PAIR_WEIGHT: f32 = 0.5;
pub const TRIGRAM_WEIGHT: f32 = 0.5;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Feature-hashing embedder producing unit-length vectors.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Creates an embedder producing vectors of length `dimension`.
    pub fn new(dimension: usize) -> Result<Self, EmbedError> {
        if dimension == 0 {
            return Err(EmbedError::InvalidDimension(dimension));
        }
        Ok(Self { dimension })
    }

    fn embed_text(&self, text: &str) -> Result<Embedding, EmbedError> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Err(EmbedError::EmptyInput);
        }

        let mut vector = vec![0.0f32; self.dimension];
        for token in &tokens {
            self.add_feature(&mut vector, token.as_bytes(), WORD_WEIGHT);

            let padded: Vec<char> = format!("<{token}>").chars().collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                self.add_feature(&mut vector, trigram.as_bytes(), TRIGRAM_WEIGHT);
            }
        }
        for pair in tokens.windows(2) {
            let joined = format!("{} {}", pair[0], pair[1]);
            self.add_feature(&mut vector, joined.as_bytes(), PAIR_WEIGHT);
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut vector {
            *x /= norm;
        }
        Ok(vector)
    }

    fn add_feature(&self, vector: &mut [f32], feature: &[u8], weight: f32) {
        let hash = fnv1a(feature);
        let slot = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[slot] += sign * weight;
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
        texts.iter().map(|text| self.embed_text(text)).collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Lower-cased alphanumeric runs; apostrophes inside words are dropped
/// (`what's` -> `whats`).
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
    }

    #[test]
    fn rejects_zero_dimension() {
        assert_eq!(
            HashingEmbedder::new(0).unwrap_err(),
            EmbedError::InvalidDimension(0)
        );
    }

    #[test]
    fn empty_text_is_an_error() {
        let embedder = HashingEmbedder::new(64).unwrap();
        assert_eq!(embedder.embed_one("").unwrap_err(), EmbedError::EmptyInput);
        assert_eq!(embedder.embed_one(" ?! ").unwrap_err(), EmbedError::EmptyInput);
    }

    #[test]
    fn vectors_are_unit_length_with_requested_dimension() {
        let embedder = HashingEmbedder::new(128).unwrap();
        let v = embedder.embed_one("how are you today").unwrap();
        assert_eq!(v.len(), 128);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn deterministic_and_punctuation_insensitive() {
        let embedder = HashingEmbedder::new(384).unwrap();
        let a = embedder.embed_one("how are you").unwrap();
        let b = embedder.embed_one("How are you?").unwrap();
        let c = embedder.embed_one("how are you").unwrap();
        assert_eq!(a, c);
        assert!(squared_distance(&a, &b) < 1e-6);
    }

    #[test]
    fn related_text_is_closer_than_unrelated_text() {
        let embedder = HashingEmbedder::new(384).unwrap();
        let query = embedder.embed_one("what is your name").unwrap();
        let related = embedder.embed_one("what's your name").unwrap();
        let unrelated = embedder.embed_one("the weather is rainy").unwrap();
        assert!(squared_distance(&query, &related) < squared_distance(&query, &unrelated));
    }

    #[test]
    fn batch_preserves_order() {
        let embedder = HashingEmbedder::new(32).unwrap();
        let batch = embedder.embed(&["alpha", "beta"]).unwrap();
        assert_eq!(batch[0], embedder.embed_one("alpha").unwrap());
        assert_eq!(batch[1], embedder.embed_one("beta").unwrap());
    }

    #[test]
    fn batch_fails_if_any_text_is_empty() {
        let embedder = HashingEmbedder::new(32).unwrap();
        assert!(embedder.embed(&["alpha", ""]).is_err());
    }

    #[test]
    fn tokenize_drops_inner_apostrophes() {
        assert_eq!(tokenize("What's UP, doc"), vec!["whats", "up", "doc"]);
    }
}

//! # MiniLM Embedder
//!
//! File: cli/src/embedding/minilm.rs
//!
//! ## Overview
//!
//! Sentence embeddings from a BERT-family encoder (all-MiniLM-L6-v2 by
//! default) run on the CPU with candle. The model directory must hold:
//!
//! - `config.json`: the BERT configuration
//! - `tokenizer.json`: a Hugging Face tokenizer
//! - one or more `*.safetensors` weight files (loaded in name order)
//!
//! Each text is tokenized, run through the encoder and mean-pooled over its
//! tokens. The pooled vector is L2-normalized, so squared distances between
//! embeddings fall in `[0, 4]` exactly as with the hashing backend.
//!
//! ## Examples
//!
//! ```bash
//! huggingface-cli download sentence-transformers/all-MiniLM-L6-v2 \
//!     config.json tokenizer.json model.safetensors --local-dir models/all-MiniLM-L6-v2
//! moodchat --embedder minilm
//! ```
//!
use super::{EmbedError, Embedder, Embedding};
use candle::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

/// Longest token sequence fed to the encoder; longer input is truncated.
const MAX_TOKENS: usize = 256;

/// The one field of `config.json` the embedder reads itself.
#[derive(Deserialize)]
struct HiddenSize {
    hidden_size: usize,
}

/// BERT encoder plus tokenizer, loaded once and reused for every text.
pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl MiniLmEmbedder {
    /// Loads tokenizer, configuration and weights from `dir`.
    ///
    /// # Errors
    ///
    /// [`EmbedError::ModelLoad`] naming the file that could not be read or
    /// parsed.
    pub fn load(dir: &Path) -> Result<Self, EmbedError> {
        let device = Device::Cpu;
        let load_err = |reason: String| EmbedError::ModelLoad {
            path: dir.display().to_string(),
            reason,
        };

        let tokenizer_path = dir.join("tokenizer.json");
        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| load_err(format!("tokenizer.json: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| load_err(format!("tokenizer.json: {e}")))?;

        let config_bytes =
            fs::read(dir.join("config.json")).map_err(|e| load_err(format!("config.json: {e}")))?;
        let config: BertConfig = serde_json::from_slice(&config_bytes)
            .map_err(|e| load_err(format!("config.json: {e}")))?;
        let HiddenSize { hidden_size } = serde_json::from_slice(&config_bytes)
            .map_err(|e| load_err(format!("config.json: {e}")))?;

        let weights = safetensor_paths(dir).map_err(load_err)?;
        debug!("Loading weights from {:?}", weights);
        // SAFETY: the weight files are memory-mapped read-only and must not be
        // modified while the embedder is alive.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&weights, DType::F32, &device) }
            .map_err(|e| load_err(format!("weights: {e}")))?;
        let model = BertModel::load(vb, &config).map_err(|e| load_err(format!("weights: {e}")))?;

        info!(
            "Loaded MiniLM model from {} ({hidden_size} dimensions)",
            dir.display()
        );
        Ok(Self {
            model,
            tokenizer,
            device,
            dimension: hidden_size,
        })
    }

    fn embed_text(&self, text: &str) -> Result<Embedding, EmbedError> {
        if text.trim().is_empty() {
            return Err(EmbedError::EmptyInput);
        }
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbedError::Inference(format!("tokenization: {e}")))?;

        let mut vector = self
            .forward(encoding.get_ids(), encoding.get_type_ids())
            .map_err(|e| EmbedError::Inference(e.to_string()))?;
        if vector.len() != self.dimension {
            return Err(EmbedError::Inference(format!(
                "model produced {} values, expected {}",
                vector.len(),
                self.dimension
            )));
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        Ok(vector)
    }

    /// Runs the encoder and mean-pools the last hidden state over all tokens.
    fn forward(&self, ids: &[u32], type_ids: &[u32]) -> candle::Result<Vec<f32>> {
        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        let token_types = Tensor::new(type_ids, &self.device)?.unsqueeze(0)?;
        let hidden = self.model.forward(&input_ids, &token_types, None)?;
        hidden.squeeze(0)?.mean(0)?.to_vec1::<f32>()
    }
}

impl Embedder for MiniLmEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedError> {
        texts.iter().map(|text| self.embed_text(text)).collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Every `*.safetensors` file in `dir`, sorted so sharded weights load in order.
fn safetensor_paths(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir).map_err(|e| e.to_string())?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| e.to_string())?.path();
        if path.extension().is_some_and(|ext| ext == "safetensors") {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err("no .safetensors files found".to_string());
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_tokenizer_is_a_load_error() {
        let dir = tempdir().unwrap();
        let err = MiniLmEmbedder::load(dir.path()).err().unwrap();
        match err {
            EmbedError::ModelLoad { path, reason } => {
                assert_eq!(path, dir.path().display().to_string());
                assert!(reason.contains("tokenizer.json"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn weights_are_listed_in_name_order() {
        let dir = tempdir().unwrap();
        for name in ["model-00002.safetensors", "model-00001.safetensors", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let files = safetensor_paths(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("model-00001.safetensors"),
                dir.path().join("model-00002.safetensors"),
            ]
        );
    }

    #[test]
    fn directory_without_weights_is_rejected() {
        let dir = tempdir().unwrap();
        let err = safetensor_paths(dir.path()).unwrap_err();
        assert!(err.contains("no .safetensors"));
    }

    /// Needs a downloaded model: `MOODCHAT_MODEL_DIR=models/all-MiniLM-L6-v2
    /// cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn related_sentences_are_closer_than_unrelated_ones() {
        let Ok(dir) = std::env::var("MOODCHAT_MODEL_DIR") else {
            return;
        };
        let embedder = MiniLmEmbedder::load(Path::new(&dir)).unwrap();
        let vectors = embedder
            .embed(&["how are you", "how are you doing", "the stock market fell"])
            .unwrap();
        let distance = |a: &[f32], b: &[f32]| -> f32 {
            a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
        };
        assert_eq!(vectors[0].len(), embedder.dimension());
        assert!(distance(&vectors[0], &vectors[1]) < distance(&vectors[0], &vectors[2]));
        assert_eq!(embedder.embed_one("  ").unwrap_err(), EmbedError::EmptyInput);
    }
}

//! # moodchat Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, expands and validates the moodchat configuration.
//! Configuration is layered, each layer overriding the previous one:
//!
//! 1. Default values defined in the code
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/moodchat/config.toml` on Linux)
//! 3. Project-specific `.moodchat.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 4. An explicit file passed with `--config`
//! 5. Command-line flags and their environment variables (`ConfigOverrides`)
//!
//! Files are read as [`ConfigLayer`]s whose fields are all optional, so a
//! higher layer can restore a built-in default that a lower layer changed.
//!
//! ## Examples
//!
//! ```toml
//! [knowledge]
//! path = "~/chat/knowledge.txt"
//!
//! [retrieval]
//! variant = "mood-aware"
//! confidence_threshold = 0.8
//!
//! [embedding]
//! backend = "minilm"
//! model_dir = "~/models/all-MiniLM-L6-v2"
//!
//! [chat]
//! bot_name = "Bot"
//! seed = 7
//! ```
//!
//! ```rust,ignore
//! let cfg = config::load_config(None, &ConfigOverrides::default())?;
//! let store = knowledge::load(&cfg.knowledge.path)?;
//! ```
//!
use crate::core::error::{ChatError, Result};
use crate::embedding::EmbeddingBackend;
use crate::response::Variant;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// The fully merged configuration every command works from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub knowledge: KnowledgeConfig,
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub chat: ChatConfig,
}

/// Where the question/answer pairs come from.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeConfig {
    /// Path to the `question|answer` file (can use ~). Will be expanded.
    pub path: String,
}

/// Nearest-neighbor thresholds and candidate counts.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalConfig {
    /// Response behaviour: `mood-aware` (default) or `baseline`.
    pub variant: Variant,
    /// Maximum squared distance for a confident match. When unset the
    /// variant's own default is used (0.8 mood-aware, 1.0 baseline).
    pub confidence_threshold: Option<f32>,
    /// Candidates closer than this are offered as suggestions on a fallback.
    pub suggestion_threshold: f32,
    /// How many neighbors to fetch per query.
    pub candidates: usize,
    /// Maximum number of suggestions listed on a fallback.
    pub max_suggestions: usize,
}

/// Which sentence embedder to use and how to set it up.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    /// Vector length of the hashing backend. MiniLM reports its own.
    pub dimension: usize,
    /// Directory holding `config.json`, `tokenizer.json` and `*.safetensors`
    /// for the MiniLM backend (can use ~). Will be expanded.
    pub model_dir: String,
}

/// Conversation loop settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Name printed in front of every reply line.
    pub bot_name: String,
    /// Input that ends the session (compared case-insensitively).
    pub exit_command: String,
    /// Every n-th answered turn triggers the history summary.
    pub summary_interval: usize,
    /// Seed for the response random source. Entropy is used when unset.
    pub seed: Option<u64>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: "data/knowledge.txt".to_string(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            confidence_threshold: None,
            suggestion_threshold: 1.5,
            candidates: 3,
            max_suggestions: 2,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            dimension: 384,
            model_dir: "models/all-MiniLM-L6-v2".to_string(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: "Bot".to_string(),
            exit_command: "exit".to_string(),
            summary_interval: 5,
            seed: None,
        }
    }
}

/// One configuration file as written. Every field is optional; a field that
/// is present overrides lower layers even when it equals the built-in default.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ConfigLayer {
    pub knowledge: KnowledgeLayer,
    pub retrieval: RetrievalLayer,
    pub embedding: EmbeddingLayer,
    pub chat: ChatLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeLayer {
    pub path: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RetrievalLayer {
    pub variant: Option<Variant>,
    pub confidence_threshold: Option<f32>,
    pub suggestion_threshold: Option<f32>,
    pub candidates: Option<usize>,
    pub max_suggestions: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingLayer {
    pub backend: Option<EmbeddingBackend>,
    pub dimension: Option<usize>,
    pub model_dir: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatLayer {
    pub bot_name: Option<String>,
    pub exit_command: Option<String>,
    pub summary_interval: Option<usize>,
    pub seed: Option<u64>,
}

/// Values given on the command line (or through their environment variables).
/// `None` leaves the file-based value untouched.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub knowledge: Option<PathBuf>,
    pub variant: Option<Variant>,
    pub threshold: Option<f32>,
    pub seed: Option<u64>,
    pub embedder: Option<EmbeddingBackend>,
}

impl Config {
    /// The confidence threshold in effect: explicit setting, else the variant default.
    pub fn confidence_threshold(&self) -> f32 {
        self.retrieval
            .confidence_threshold
            .unwrap_or_else(|| self.retrieval.variant.default_threshold())
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.knowledge {
            self.knowledge.path = path.to_string_lossy().into_owned();
        }
        if let Some(variant) = overrides.variant {
            self.retrieval.variant = variant;
        }
        if let Some(threshold) = overrides.threshold {
            self.retrieval.confidence_threshold = Some(threshold);
        }
        if let Some(seed) = overrides.seed {
            self.chat.seed = Some(seed);
        }
        if let Some(backend) = overrides.embedder {
            self.embedding.backend = backend;
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".moodchat.toml";

/// Loads the fully merged, expanded and validated configuration.
pub fn load_config(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
    let mut merged = Config::default();
    if let Some(user) = load_user_config()? {
        merged = merge_configs(merged, user);
    }
    if let Some(project) = load_project_config()? {
        merged = merge_configs(merged, project);
    }
    if let Some(path) = explicit {
        info!("Loading configuration from: {}", path.display());
        let explicit_cfg = load_config_from_path(path)?;
        merged = merge_configs(merged, explicit_cfg);
    }
    merged.apply_overrides(overrides);
    expand_config_paths(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "MoodChat", "moodchat") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigLayer>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Overlays the fields present in `overlay` on `base`.
fn merge_configs(base: Config, overlay: ConfigLayer) -> Config {
    let mut merged = base;
    let ConfigLayer {
        knowledge,
        retrieval,
        embedding,
        chat,
    } = overlay;

    if let Some(path) = knowledge.path {
        merged.knowledge.path = path;
    }

    if let Some(variant) = retrieval.variant {
        merged.retrieval.variant = variant;
    }
    if let Some(threshold) = retrieval.confidence_threshold {
        merged.retrieval.confidence_threshold = Some(threshold);
    }
    if let Some(threshold) = retrieval.suggestion_threshold {
        merged.retrieval.suggestion_threshold = threshold;
    }
    if let Some(candidates) = retrieval.candidates {
        merged.retrieval.candidates = candidates;
    }
    if let Some(max) = retrieval.max_suggestions {
        merged.retrieval.max_suggestions = max;
    }

    if let Some(backend) = embedding.backend {
        merged.embedding.backend = backend;
    }
    if let Some(dimension) = embedding.dimension {
        merged.embedding.dimension = dimension;
    }
    if let Some(dir) = embedding.model_dir {
        merged.embedding.model_dir = dir;
    }

    if let Some(name) = chat.bot_name {
        merged.chat.bot_name = name;
    }
    if let Some(command) = chat.exit_command {
        merged.chat.exit_command = command;
    }
    if let Some(interval) = chat.summary_interval {
        merged.chat.summary_interval = interval;
    }
    if let Some(seed) = chat.seed {
        merged.chat.seed = Some(seed);
    }
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.knowledge.path = shellexpand::tilde(&config.knowledge.path).into_owned();
    config.embedding.model_dir = shellexpand::tilde(&config.embedding.model_dir).into_owned();
    debug!(
        "Expanded paths: knowledge {}, model {}",
        config.knowledge.path, config.embedding.model_dir
    );
}

fn validate_config(config: &Config) -> Result<()> {
    let invalid = |msg: String| -> Result<()> { Err(anyhow!(ChatError::Config(msg))) };

    if config.knowledge.path.trim().is_empty() {
        return invalid("Knowledge path cannot be empty.".into());
    }
    if let Some(threshold) = config.retrieval.confidence_threshold {
        if !threshold.is_finite() || threshold <= 0.0 {
            return invalid(format!(
                "Invalid confidence_threshold {threshold}: expected a positive number."
            ));
        }
    }
    let suggestion = config.retrieval.suggestion_threshold;
    if !suggestion.is_finite() || suggestion <= 0.0 {
        return invalid(format!(
            "Invalid suggestion_threshold {suggestion}: expected a positive number."
        ));
    }
    if config.retrieval.candidates == 0 {
        return invalid("retrieval.candidates must be at least 1.".into());
    }
    if config.embedding.dimension == 0 {
        return invalid("embedding.dimension must be at least 1.".into());
    }
    if config.embedding.backend == EmbeddingBackend::MiniLm
        && config.embedding.model_dir.trim().is_empty()
    {
        return invalid("embedding.model_dir cannot be empty for the minilm backend.".into());
    }
    if config.chat.summary_interval == 0 {
        return invalid("chat.summary_interval must be at least 1.".into());
    }
    if config.chat.bot_name.trim().is_empty() {
        return invalid("chat.bot_name cannot be empty.".into());
    }
    if config.chat.exit_command.trim().is_empty() {
        return invalid("chat.exit_command cannot be empty.".into());
    }
    Ok(())
}

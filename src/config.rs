//! Wrapper configuration: capability name patterns, aliases, defaults.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Read-only configuration loaded once at session construction.
///
/// The pattern lists drive capability detection; they are configuration
/// rather than constants because the heuristic depends entirely on the
/// naming conventions of deployed models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WrapperConfig {
    pub vision_models: Vec<String>,
    pub thinking_models: Vec<String>,
    pub model_aliases: HashMap<String, String>,
    pub default_model: String,
    pub base_url: String,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            vision_models: vec![
                "llava".to_string(),
                "bakllava".to_string(),
                "moondream".to_string(),
                "vision".to_string(),
            ],
            thinking_models: vec![
                "o1".to_string(),
                "reasoning".to_string(),
                "thinking".to_string(),
            ],
            model_aliases: HashMap::new(),
            default_model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl WrapperConfig {
    /// Load from a JSON file. A missing file falls back to the built-in
    /// defaults; an unreadable one does too, with a warning.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Load `path` with `.env` support and environment overrides applied
    /// (`OLLAMA_BASE_URL` wins over the file, as with the base-URL env
    /// mappings elsewhere in the ecosystem).
    pub fn load_with_env(path: impl AsRef<Path>) -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::load(path);
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            config.base_url = url;
        }
        config
    }

    /// Load `config.json` from the working directory with env overrides.
    pub fn from_env() -> Self {
        Self::load_with_env("config.json")
    }

    /// Resolve a configured alias to its canonical model name.
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.model_aliases
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }
}

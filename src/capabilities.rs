//! Model capabilities descriptor and name-pattern classification.

use serde::{Deserialize, Serialize};

use crate::config::WrapperConfig;

/// What the currently selected model can do.
///
/// Derived, never persisted: recomputed at session construction and on
/// every model switch, so it always describes the active model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelCapabilities {
    pub supports_vision: bool,
    pub supports_thinking: bool,
    pub supports_streaming: bool,
    pub max_tokens: u32,
    /// Exact catalog name of the matched model, empty when unresolved.
    pub model_name: String,
}

impl Default for ModelCapabilities {
    fn default() -> Self {
        Self {
            supports_vision: false,
            supports_thinking: false,
            // the chat protocol streams for every model
            supports_streaming: true,
            max_tokens: 4096,
            model_name: String::new(),
        }
    }
}

/// Classify a catalog model name against the configured pattern lists.
///
/// Substring matching on the lower-cased name. A heuristic, not a protocol
/// guarantee; its accuracy depends on deployment naming conventions.
pub fn classify(name: &str, config: &WrapperConfig) -> ModelCapabilities {
    let lower = name.to_lowercase();
    ModelCapabilities {
        supports_vision: config
            .vision_models
            .iter()
            .any(|pattern| lower.contains(pattern.as_str())),
        supports_thinking: config
            .thinking_models
            .iter()
            .any(|pattern| lower.contains(pattern.as_str())),
        model_name: name.to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vision_pattern_matches_case_insensitively() {
        let config = WrapperConfig::default();

        let caps = classify("LLaVA:13b", &config);
        assert!(caps.supports_vision);
        assert!(!caps.supports_thinking);
        assert_eq!(caps.model_name, "LLaVA:13b");
    }

    #[test]
    fn thinking_pattern_matches() {
        let config = WrapperConfig::default();

        let caps = classify("deepseek-reasoning:7b", &config);
        assert!(caps.supports_thinking);
        assert!(!caps.supports_vision);
    }

    #[test]
    fn unmatched_name_gets_neutral_capabilities() {
        let config = WrapperConfig::default();

        let caps = classify("qwen3:8b", &config);
        assert!(!caps.supports_vision);
        assert!(!caps.supports_thinking);
        assert!(caps.supports_streaming);
        assert_eq!(caps.max_tokens, 4096);
    }

    #[test]
    fn custom_patterns_are_honored() {
        let config = WrapperConfig {
            vision_models: vec!["pixtral".to_string()],
            ..Default::default()
        };

        assert!(classify("Pixtral-12B", &config).supports_vision);
        assert!(!classify("llava:13b", &config).supports_vision);
    }
}

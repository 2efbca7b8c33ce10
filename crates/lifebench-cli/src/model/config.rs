use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util;

/// Contents of the JSON configuration file.
///
/// ```json
/// {
///   "openrouter": {
///     "api_key": "sk-or-...",
///     "model": "anthropic/claude-3.5-sonnet",
///     "temperature": 0.0,
///     "max_tokens": 1000,
///     "reasoning_effort": null
///   }
/// }
/// ```
///
/// Every field is optional and falls back to the defaults shown above (the API key
/// defaults to empty).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

impl BenchConfig {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("config", path)
    }

    /// Replaces the configured model when `model` is given.
    #[must_use]
    pub fn with_model(mut self, model: Option<&str>) -> Self {
        if let Some(model) = model {
            model.clone_into(&mut self.openrouter.model);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Reasoning effort requested from models that support it.
    pub reasoning_effort: Option<ReasoningEffort>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: Self::DEFAULT_MODEL.to_owned(),
            temperature: 0.0,
            max_tokens: 1000,
            reasoning_effort: None,
        }
    }
}

impl OpenRouterConfig {
    pub const DEFAULT_MODEL: &'static str = "anthropic/claude-3.5-sonnet";

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// API key suitable for display: 20 `*` followed by the last 4 characters.
    ///
    /// Returns `None` when no key is set.
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        if !self.has_api_key() {
            return None;
        }
        let chars = self.api_key.chars().collect::<Vec<_>>();
        let tail = &chars[chars.len().saturating_sub(4)..];
        Some("*".repeat(20) + &tail.iter().collect::<String>())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    #[display("minimal")]
    Minimal,
    #[display("low")]
    Low,
    #[display("medium")]
    Medium,
    #[display("high")]
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: BenchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.openrouter.model, "anthropic/claude-3.5-sonnet");
        assert_eq!(config.openrouter.max_tokens, 1000);
        assert!(!config.openrouter.has_api_key());
    }

    #[test]
    fn test_partial_config() {
        let config: BenchConfig = serde_json::from_str(
            r#"{"openrouter": {"api_key": "sk-or-abcdef", "reasoning_effort": "high"}}"#,
        )
        .unwrap();
        let openrouter = &config.openrouter;
        assert_eq!(openrouter.api_key, "sk-or-abcdef");
        assert_eq!(openrouter.model, OpenRouterConfig::DEFAULT_MODEL);
        assert_eq!(openrouter.temperature, 0.0);
        assert_eq!(openrouter.reasoning_effort, Some(ReasoningEffort::High));
    }

    #[test]
    fn test_unknown_reasoning_effort_is_rejected() {
        let result = serde_json::from_str::<BenchConfig>(
            r#"{"openrouter": {"reasoning_effort": "extreme"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_model_override() {
        let config = BenchConfig::default().with_model(Some("openai/gpt-4o"));
        assert_eq!(config.openrouter.model, "openai/gpt-4o");

        let config = BenchConfig::default().with_model(None);
        assert_eq!(config.openrouter.model, OpenRouterConfig::DEFAULT_MODEL);
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = OpenRouterConfig {
            api_key: "sk-or-v1-1234abcd".to_owned(),
            ..OpenRouterConfig::default()
        };
        assert_eq!(
            config.masked_api_key().as_deref(),
            Some("********************abcd")
        );

        config.api_key = "xy".to_owned();
        assert_eq!(
            config.masked_api_key().as_deref(),
            Some("********************xy")
        );

        config.api_key = "  ".to_owned();
        assert_eq!(config.masked_api_key(), None);
    }
}

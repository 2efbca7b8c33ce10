use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat model that can answer benchmark prompts.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Model identifier recorded in reports.
    fn model(&self) -> &str;

    /// Sends `prompt` as a single user message and waits for the answer.
    async fn query(&self, prompt: &str) -> anyhow::Result<ModelResponse>;

    /// Lists the model identifiers available from this provider.
    async fn list_models(&self) -> anyhow::Result<Vec<String>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub content: String,
    /// Model that actually answered, which may differ from the requested one.
    pub model: String,
    pub response_time: Duration,
    pub usage: Option<Usage>,
}

/// Token usage and cost reported for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    /// Cost in credits, when the provider reports it.
    #[serde(default)]
    pub cost: Option<f64>,
}

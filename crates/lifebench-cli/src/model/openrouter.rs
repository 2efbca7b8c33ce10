use std::time::{Duration, Instant};

use anyhow::{Context as _, anyhow, bail};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    config::{OpenRouterConfig, ReasoningEffort},
    provider::{ModelProvider, ModelResponse, Usage},
};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// [`ModelProvider`] backed by the OpenRouter chat completions API.
///
/// Requests are sent once; failed requests are not retried.
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    http: reqwest::Client,
}

impl OpenRouterProvider {
    pub fn new(config: OpenRouterConfig) -> anyhow::Result<Self> {
        if !config.has_api_key() {
            bail!("API key is required for OpenRouter (set `openrouter.api_key` in the config file)");
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { config, http })
    }

    fn headers(&self) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
                .context("API key is not a valid header value")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl ModelProvider for OpenRouterProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn query(&self, prompt: &str) -> anyhow::Result<ModelResponse> {
        let url = format!("{OPENROUTER_API_URL}/chat/completions");
        let request = ChatRequest::new(&self.config, prompt);

        debug!(model = %request.model, "OpenRouter chat request");

        let start = Instant::now();
        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .context("Failed to send OpenRouter chat request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("OpenRouter API error ({status}): {error_text}");
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenRouter chat response")?;
        chat_response.into_model_response(&self.config.model, start.elapsed())
    }

    async fn list_models(&self) -> anyhow::Result<Vec<String>> {
        let url = format!("{OPENROUTER_API_URL}/models");

        debug!("OpenRouter model list request");

        let response = self
            .http
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .context("Failed to send OpenRouter model list request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("OpenRouter model list error ({status}): {error_text}");
        }

        let models: ModelList = response
            .json()
            .await
            .context("Failed to parse OpenRouter model list")?;
        Ok(models.data.into_iter().map(|model| model.id).collect())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    max_tokens: u32,
    usage: UsageOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<ReasoningOptions>,
}

impl<'a> ChatRequest<'a> {
    fn new(config: &'a OpenRouterConfig, prompt: &'a str) -> Self {
        Self {
            model: &config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            usage: UsageOptions { include: true },
            reasoning: config
                .reasoning_effort
                .map(|effort| ReasoningOptions { effort }),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct UsageOptions {
    include: bool,
}

#[derive(Debug, Serialize)]
struct ReasoningOptions {
    effort: ReasoningEffort,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_model_response(
        self,
        requested_model: &str,
        response_time: Duration,
    ) -> anyhow::Result<ModelResponse> {
        let content = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Invalid response format: no choices in OpenRouter response"))?
            .message
            .content
            .unwrap_or_default();
        Ok(ModelResponse {
            content,
            model: self.model.unwrap_or_else(|| requested_model.to_owned()),
            response_time,
            usage: self.usage,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_requires_api_key() {
        let Err(err) = OpenRouterProvider::new(OpenRouterConfig::default()) else {
            panic!("provider without an API key should be rejected");
        };
        assert!(err.to_string().contains("API key is required"));
    }

    #[test]
    fn test_chat_request_body() {
        let config = OpenRouterConfig {
            api_key: "key".to_owned(),
            model: "openai/gpt-4o".to_owned(),
            ..OpenRouterConfig::default()
        };
        let body = serde_json::to_value(ChatRequest::new(&config, "hello")).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "openai/gpt-4o",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0.0,
                "max_tokens": 1000,
                "usage": {"include": true},
            })
        );
    }

    #[test]
    fn test_chat_request_with_reasoning() {
        let config = OpenRouterConfig {
            reasoning_effort: Some(ReasoningEffort::Medium),
            ..OpenRouterConfig::default()
        };
        let body = serde_json::to_value(ChatRequest::new(&config, "hello")).unwrap();
        assert_eq!(body["reasoning"], json!({"effort": "medium"}));
    }

    #[test]
    fn test_chat_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "gen-1",
            "model": "openai/gpt-4o-2024-08-06",
            "choices": [{"message": {"role": "assistant", "content": "```\n#.\n```"}}],
            "usage": {
                "prompt_tokens": 120,
                "completion_tokens": 30,
                "total_tokens": 150,
                "cost": 0.0012
            }
        }))
        .unwrap();
        let response = response
            .into_model_response("openai/gpt-4o", Duration::from_millis(1500))
            .unwrap();
        assert_eq!(response.content, "```\n#.\n```");
        assert_eq!(response.model, "openai/gpt-4o-2024-08-06");
        assert_eq!(response.response_time, Duration::from_millis(1500));
        assert_eq!(
            response.usage,
            Some(Usage {
                prompt_tokens: 120,
                completion_tokens: 30,
                total_tokens: 150,
                cost: Some(0.0012),
            })
        );
    }

    #[test]
    fn test_chat_response_without_choices() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        let err = response
            .into_model_response("m", Duration::ZERO)
            .unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn test_chat_response_null_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": null}}]
        }))
        .unwrap();
        let response = response.into_model_response("m", Duration::ZERO).unwrap();
        assert_eq!(response.content, "");
        assert_eq!(response.model, "m");
        assert_eq!(response.usage, None);
    }

    #[test]
    fn test_model_list() {
        let models: ModelList = serde_json::from_value(json!({
            "data": [{"id": "a/one", "name": "One"}, {"id": "b/two"}]
        }))
        .unwrap();
        let ids = models.data.into_iter().map(|m| m.id).collect::<Vec<_>>();
        assert_eq!(ids, ["a/one", "b/two"]);
    }
}

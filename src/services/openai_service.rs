//! Chat-completions client for the upstream text-generation service.
//!
//! Works against api.openai.com or any OpenAI-compatible endpoint
//! (`OPENAI_BASE_URL`). One request per plan, no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{ConfigError, OpenAiConfig};
use crate::services::trip_planner_service::PlannerError;

/// Seam between the planner and whatever produces free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, PlannerError>;

    fn model_id(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiChatModel {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f64,
}

impl OpenAiChatModel {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f64,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            temperature,
        })
    }

    pub fn from_config(config: &OpenAiConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        Self::new(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
            config.temperature,
            config.timeout,
        )
        .map_err(|e| ConfigError::Client(e.to_string()))
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiChatModel {
    async fn generate(&self, prompt: &str) -> Result<String, PlannerError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PlannerError::Upstream(format!(
                "OpenAI API error (status {}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PlannerError::Upstream("OpenAI API response missing content".to_string()))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_from_config_requires_api_key() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let result = OpenAiChatModel::from_config(&config.openai);
        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn test_completions_url_joins_base() {
        let model = OpenAiChatModel::new(
            "sk-test",
            "http://localhost:9000/v1",
            "gpt-3.5-turbo-0125",
            0.7,
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            model.completions_url(),
            "http://localhost:9000/v1/chat/completions"
        );
        assert_eq!(model.model_id(), "gpt-3.5-turbo-0125");
    }
}

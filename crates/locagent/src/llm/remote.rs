//! Remote language model using OpenAI-compatible APIs
//!
//! Supports any OpenAI-compatible endpoint with configurable URL, model,
//! and API key via environment variable.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::llm::types::{ChatMessage, LlmError};
use crate::llm::LanguageModel;

/// Language model reached over an OpenAI-compatible HTTP API
#[derive(Debug)]
pub struct RemoteLlm {
    client: Client,
    config: LlmConfig,
    api_key: String,
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl RemoteLlm {
    /// Create a client, reading the API key from `config.api_key_env`
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = env::var(&config.api_key_env).map_err(|_| {
            LlmError::ConfigError(format!("API key env var '{}' not set", config.api_key_env))
        })?;
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        if config.api_url.is_empty() {
            return Err(LlmError::ConfigError("llm.api_url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::ConfigError(e.to_string()))?;

        info!(
            "RemoteLlm initialized with model: {}, api_url: {}",
            config.model, config.api_url
        );

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// POST a chat completion, backing off exponentially on 429
    async fn call_api(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'));
        debug!("Calling remote API at: {}", url);

        let max_retries = self.config.max_retries.max(1);
        let mut delay = Duration::from_secs(1);

        for attempt in 0..max_retries {
            match self
                .client
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();

                    if status == 429 {
                        warn!(
                            "Rate limited on attempt {}/{}, waiting {:?}",
                            attempt + 1,
                            max_retries,
                            delay
                        );
                        if attempt < max_retries - 1 {
                            tokio::time::sleep(delay).await;
                            delay *= 2;
                        }
                        continue;
                    }

                    if !status.is_success() {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(LlmError::ApiError(format!(
                            "API returned {status}: {error_text}"
                        )));
                    }

                    let completion: ChatCompletionResponse = response
                        .json()
                        .await
                        .map_err(|e| LlmError::ParseError(e.to_string()))?;

                    return completion
                        .choices
                        .into_iter()
                        .next()
                        .map(|c| c.message.content)
                        .ok_or_else(|| LlmError::ApiError("Empty response".to_string()));
                }
                Err(e) => return Err(LlmError::RequestFailed(e.to_string())),
            }
        }

        Err(LlmError::RequestFailed(format!(
            "Still rate limited after {max_retries} attempts"
        )))
    }
}

#[async_trait]
impl LanguageModel for RemoteLlm {
    async fn send_text_request(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let response = self.call_api(messages).await?;
        debug!("Model response: {}", response);
        Ok(response)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

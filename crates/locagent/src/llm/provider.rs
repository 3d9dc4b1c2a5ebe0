//! Language model provider trait
//!
//! Abstracts the text-completion backend the agent talks to (remote API,
//! scripted mock in tests).

use async_trait::async_trait;

use crate::llm::types::{ChatMessage, LlmError};

/// Trait for language model backends
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a chat and return the raw text of the reply
    ///
    /// One call per invocation from the agent's side; transport-level
    /// retries, if any, are the implementation's business.
    async fn send_text_request(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

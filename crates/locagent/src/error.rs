//! Error types for locagent

use thiserror::Error;

use crate::llm::LlmError;
use crate::toolbox::ToolboxError;

/// Main error type for agent operations
#[derive(Error, Debug)]
pub enum AgentError {
    /// Task context carried an unknown or missing `target`
    #[error("Unknown task type: {0}")]
    InvalidTask(String),

    /// Task context was missing a required key or had the wrong shape
    #[error("Malformed task context: {0}")]
    MalformedTask(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Toolbox (record access) errors
    #[error("Toolbox error: {0}")]
    Toolbox(#[from] ToolboxError),

    /// Language model errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Sentiment lexicon errors
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AgentError {
    fn from(e: serde_json::Error) -> Self {
        AgentError::Serialization(e.to_string())
    }
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AgentError, Result};

/// Main configuration structure for locagent
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Language model client configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Prompt construction settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// Sentiment lexicon bootstrap settings
    #[serde(default)]
    pub lexicon: LexiconConfig,
    /// Record source settings
    #[serde(default)]
    pub toolbox: ToolboxConfig,
}

impl Config {
    /// Load configuration from an explicit path, or from the first default
    /// location that exists, falling back to built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::from_file(path);
        }

        let default_paths = [
            dirs::home_dir().map(|h| h.join(".locagent").join("config.toml")),
            dirs::config_dir().map(|c| c.join("locagent").join("config.toml")),
            Some(PathBuf::from("config.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| AgentError::Config(format!("Failed to parse config: {e}")))
    }
}

/// OpenAI-compatible language model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API base URL (the client appends `/chat/completions`)
    #[serde(default)]
    pub api_url: String,
    /// Environment variable name for API key
    #[serde(default = "default_llm_api_key_env")]
    pub api_key_env: String,
    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
    /// Sampling temperature
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    /// Completion token limit
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,
    /// Attempts made on HTTP 429 before giving up
    #[serde(default = "default_llm_max_retries")]
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key_env: default_llm_api_key_env(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout_secs(),
            temperature: default_llm_temperature(),
            max_tokens: default_llm_max_tokens(),
            max_retries: default_llm_max_retries(),
        }
    }
}

fn default_llm_api_key_env() -> String {
    "LLM_API_KEY".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    30
}

fn default_llm_temperature() -> f32 {
    0.2
}

fn default_llm_max_tokens() -> u32 {
    1024
}

fn default_llm_max_retries() -> u32 {
    3
}

/// Prompt construction settings
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Candidate type used when a task omits `candidate_category`
    /// and the item record has no category
    #[serde(default = "default_candidate_category")]
    pub default_candidate_category: String,
    /// Number of the resident's own reviews quoted in review prompts
    #[serde(default = "default_user_history_limit")]
    pub user_history_limit: usize,
    /// Number of the location's reviews quoted in review prompts
    #[serde(default = "default_location_history_limit")]
    pub location_history_limit: usize,
    /// Characters kept from each quoted resident review
    #[serde(default = "default_user_snippet_chars")]
    pub user_snippet_chars: usize,
    /// Characters kept from each quoted location review
    #[serde(default = "default_location_snippet_chars")]
    pub location_snippet_chars: usize,
    /// Characters kept from a location description
    #[serde(default = "default_description_chars")]
    pub description_chars: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            default_candidate_category: default_candidate_category(),
            user_history_limit: default_user_history_limit(),
            location_history_limit: default_location_history_limit(),
            user_snippet_chars: default_user_snippet_chars(),
            location_snippet_chars: default_location_snippet_chars(),
            description_chars: default_description_chars(),
        }
    }
}

fn default_candidate_category() -> String {
    "location".to_string()
}

fn default_user_history_limit() -> usize {
    3
}

fn default_location_history_limit() -> usize {
    5
}

fn default_user_snippet_chars() -> usize {
    50
}

fn default_location_snippet_chars() -> usize {
    100
}

fn default_description_chars() -> usize {
    100
}

/// Sentiment lexicon bootstrap settings
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
    /// Where the lexicon file lives (or will be downloaded to)
    #[serde(default = "default_lexicon_path")]
    pub path: PathBuf,
    /// Download source used when the file is missing
    #[serde(default)]
    pub source_url: Option<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            path: default_lexicon_path(),
            source_url: None,
        }
    }
}

fn default_lexicon_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".locagent").join("vader_lexicon.txt"))
        .unwrap_or_else(|| PathBuf::from(".locagent/vader_lexicon.txt"))
}

/// Record source settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ToolboxConfig {
    /// JSON dataset with `users`, `items` and `reviews` arrays
    #[serde(default)]
    pub dataset: Option<PathBuf>,
}

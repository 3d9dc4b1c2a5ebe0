//! Task inputs and outputs exchanged with the simulation framework

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AgentError, Result};

/// A unit of work handed to the agent
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Task {
    /// Rank candidate locations by predicted interest
    Recommendation {
        user_id: String,
        candidate_list: Vec<String>,
        #[serde(default)]
        candidate_category: Option<String>,
    },
    /// Rate and review a visited location
    ReviewWriting { user_id: String, item_id: String },
}

impl Task {
    /// Known `target` tags
    pub const TARGETS: [&'static str; 2] = ["recommendation", "review_writing"];

    /// Build a task from a raw task-context mapping.
    ///
    /// An unknown `target` is reported as [`AgentError::InvalidTask`];
    /// missing task keys as [`AgentError::MalformedTask`].
    pub fn from_context(context: Value) -> Result<Self> {
        let target = context
            .get("target")
            .and_then(Value::as_str)
            .ok_or_else(|| AgentError::InvalidTask("<missing target>".to_string()))?;

        if !Self::TARGETS.contains(&target) {
            return Err(AgentError::InvalidTask(target.to_string()));
        }

        serde_json::from_value(context).map_err(|e| AgentError::MalformedTask(e.to_string()))
    }

    pub fn user_id(&self) -> &str {
        match self {
            Task::Recommendation { user_id, .. } | Task::ReviewWriting { user_id, .. } => user_id,
        }
    }

    pub fn target(&self) -> &'static str {
        match self {
            Task::Recommendation { .. } => "recommendation",
            Task::ReviewWriting { .. } => "review_writing",
        }
    }
}

/// Ranked candidate ids; always a permutation of the candidate list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub item_list: Vec<String>,
}

/// Star rating and review text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub stars: u8,
    pub review: String,
}

impl ReviewResult {
    pub fn new(stars: u8, review: impl Into<String>) -> Self {
        Self {
            stars,
            review: review.into(),
        }
    }
}

/// Result of a task, serialized without a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskOutput {
    Recommendation(RecommendationResult),
    Review(ReviewResult),
}

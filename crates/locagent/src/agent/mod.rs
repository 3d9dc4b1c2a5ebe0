//! City resident agent: location ranking and review writing
//!
//! Each task fetches records from the toolbox, renders a prompt, makes one
//! language model call and parses the reply. A failed model call is logged
//! and answered with a deterministic fallback, so callers always get a
//! well-formed result.

pub mod format;
pub mod prompts;
pub mod types;

pub use types::{RecommendationResult, ReviewResult, Task, TaskOutput};

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::analyzer::analyze_preferences;
use crate::config::AgentConfig;
use crate::error::Result;
use crate::llm::{ChatMessage, LanguageModel};
use crate::parser::{DEFAULT_STARS, parse_recommendation, parse_review};
use crate::toolbox::InteractionTool;
use format::{
    CandidateLocation, format_location_history, format_location_info, format_location_list,
    format_location_ratings, format_user_history, location_average_rating,
};
use prompts::{
    RECOMMENDATION_PROMPT, RECOMMENDATION_SYSTEM_PROMPT, REVIEW_PROMPT, REVIEW_SYSTEM_PROMPT,
    fill,
};

/// Review returned when the model call fails
pub const FALLBACK_REVIEW: &str = "体验良好，推荐尝试";

/// Behavioral agent for one simulated resident population.
///
/// Holds no per-task state; a single instance can serve concurrent tasks.
pub struct LocationBehaviorAgent {
    toolbox: Arc<dyn InteractionTool>,
    llm: Arc<dyn LanguageModel>,
    config: AgentConfig,
}

impl LocationBehaviorAgent {
    pub fn new(
        toolbox: Arc<dyn InteractionTool>,
        llm: Arc<dyn LanguageModel>,
        config: AgentConfig,
    ) -> Self {
        info!("LocationBehaviorAgent initialized with model: {}", llm.name());
        Self {
            toolbox,
            llm,
            config,
        }
    }

    /// Run a raw task context. Unknown `target` values are the only error.
    pub async fn forward_context(&self, context: Value) -> Result<TaskOutput> {
        let task = Task::from_context(context)?;
        Ok(self.forward(&task).await)
    }

    /// Dispatch a typed task
    pub async fn forward(&self, task: &Task) -> TaskOutput {
        debug!("Handling {} task for user {}", task.target(), task.user_id());
        match task {
            Task::Recommendation {
                user_id,
                candidate_list,
                candidate_category,
            } => TaskOutput::Recommendation(
                self.handle_recommendation(user_id, candidate_list, candidate_category.as_deref())
                    .await,
            ),
            Task::ReviewWriting { user_id, item_id } => {
                TaskOutput::Review(self.handle_review_writing(user_id, item_id).await)
            }
        }
    }

    pub async fn handle_recommendation(
        &self,
        user_id: &str,
        candidates: &[String],
        candidate_category: Option<&str>,
    ) -> RecommendationResult {
        let messages = self.recommendation_messages(user_id, candidates, candidate_category);

        match self.llm.send_text_request(&messages).await {
            Ok(response) => {
                debug!("Recommendation response: {}", response);
                parse_recommendation(&response, candidates)
            }
            Err(e) => {
                error!("Recommendation failed for user {}: {}", user_id, e);
                RecommendationResult {
                    item_list: candidates.to_vec(),
                }
            }
        }
    }

    pub async fn handle_review_writing(&self, user_id: &str, item_id: &str) -> ReviewResult {
        let messages = self.review_messages(user_id, item_id);

        match self.llm.send_text_request(&messages).await {
            Ok(response) => {
                debug!("Review response: {}", response);
                parse_review(&response)
            }
            Err(e) => {
                error!("Review writing failed for user {} at {}: {}", user_id, item_id, e);
                ReviewResult::new(DEFAULT_STARS, FALLBACK_REVIEW)
            }
        }
    }

    /// System + user chat for a recommendation task
    pub fn recommendation_messages(
        &self,
        user_id: &str,
        candidates: &[String],
        candidate_category: Option<&str>,
    ) -> Vec<ChatMessage> {
        self.note_missing_user(user_id);
        let default_kind =
            candidate_category.unwrap_or(self.config.default_candidate_category.as_str());

        let user_reviews = self.toolbox.get_reviews(Some(user_id), None);
        let locations: Vec<CandidateLocation> = candidates
            .iter()
            .map(|id| {
                let record = self.toolbox.get_item(id);
                CandidateLocation::from_record(id, record.as_ref(), default_kind)
            })
            .collect();

        let ratings: Vec<(&CandidateLocation, f64)> = locations
            .iter()
            .map(|l| {
                let reviews = self.toolbox.get_reviews(None, Some(&l.id));
                (l, location_average_rating(&reviews))
            })
            .collect();

        let preferences = analyze_preferences(&user_reviews);
        let candidates_text = format_location_list(&locations);
        let ratings_text = format_location_ratings(&ratings);

        let prompt = fill(
            RECOMMENDATION_PROMPT,
            &[
                ("user_id", user_id),
                ("preferences", &preferences),
                ("candidates", &candidates_text),
                ("ratings", &ratings_text),
            ],
        );
        debug!("Recommendation prompt length: {} chars", prompt.chars().count());

        vec![
            ChatMessage::system(RECOMMENDATION_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ]
    }

    /// System + user chat for a review-writing task
    pub fn review_messages(&self, user_id: &str, item_id: &str) -> Vec<ChatMessage> {
        self.note_missing_user(user_id);
        let location = self.toolbox.get_item(item_id);
        let user_reviews = self.toolbox.get_reviews(Some(user_id), None);
        let location_reviews = self.toolbox.get_reviews(None, Some(item_id));

        let user_history = format_user_history(
            &user_reviews,
            self.config.user_history_limit,
            self.config.user_snippet_chars,
        );
        let preferences = analyze_preferences(&user_reviews);
        let location_info = format_location_info(location.as_ref(), self.config.description_chars);
        let location_history = format_location_history(
            &location_reviews,
            self.config.location_history_limit,
            self.config.location_snippet_chars,
        );

        let prompt = fill(
            REVIEW_PROMPT,
            &[
                ("user_id", user_id),
                ("user_history", &user_history),
                ("preferences", &preferences),
                ("location_info", &location_info),
                ("location_history", &location_history),
            ],
        );
        debug!("Review prompt length: {} chars", prompt.chars().count());

        vec![ChatMessage::system(REVIEW_SYSTEM_PROMPT), ChatMessage::user(prompt)]
    }

    fn note_missing_user(&self, user_id: &str) {
        if self.toolbox.get_user(user_id).is_none() {
            debug!("No resident record for {}, continuing with reviews only", user_id);
        }
    }
}

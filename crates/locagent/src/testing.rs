//! Test utilities for locagent - scripted models and fixtures
//!
//! This module provides utilities for fast, deterministic tests:
//! - A scripted language model that records the prompts it receives
//! - A small city dataset for toolbox-backed tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::{ChatMessage, LanguageModel, LlmError};
use crate::toolbox::{Dataset, InMemoryToolbox, Location, Review, User};

/// Language model that replays canned replies in order.
///
/// An exhausted script (or one built with [`MockLlm::failing`]) returns an
/// error, which exercises the agent's fallback path.
#[derive(Debug, Default)]
pub struct MockLlm {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlm {
    /// A model that answers with each of `replies` in turn
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A model whose every call fails
    pub fn failing() -> Self {
        Self::default()
    }

    /// Chats received so far
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for MockLlm {
    async fn send_text_request(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(messages.to_vec());
        }

        self.replies
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .ok_or_else(|| LlmError::RequestFailed("mock model has no reply".into()))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Small dataset: resident `u1` with a nature/food history, three locations,
/// and a few reviews by other residents.
pub fn sample_dataset() -> Dataset {
    Dataset {
        users: vec![User {
            id: "u1".to_string(),
            name: Some("Lin".to_string()),
        }],
        items: vec![
            Location::new("loc1", "中山公园", "park").with_description("城市中心的大型公园"),
            Location::new("loc2", "老街咖啡", "cafe"),
            Location::new("loc3", "城市博物馆", "museum"),
        ],
        reviews: vec![
            Review::new("u1", "loc1", Some(5), "公园绿化很好，适合散步").with_timestamp(100.0),
            Review::new("u1", "loc2", Some(4), "咖啡香浓").with_timestamp(200.0),
            Review::new("u1", "loc9", None, "排队太久").with_timestamp(50.0),
            Review::new("u2", "loc1", Some(3), "人有点多").with_timestamp(150.0),
            Review::new("u3", "loc1", Some(4), "湖边风景不错").with_timestamp(300.0),
        ],
    }
}

pub fn sample_toolbox() -> InMemoryToolbox {
    InMemoryToolbox::new(sample_dataset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbox::InteractionTool;

    #[tokio::test]
    async fn mock_llm_replays_then_fails() {
        let llm = MockLlm::replying(["first"]);
        let msgs = vec![ChatMessage::user("hi")];
        assert_eq!(llm.send_text_request(&msgs).await.unwrap(), "first");
        assert!(llm.send_text_request(&msgs).await.is_err());
        assert_eq!(llm.requests().len(), 2);
    }

    #[test]
    fn sample_toolbox_has_history() {
        let toolbox = sample_toolbox();
        assert_eq!(toolbox.get_reviews(Some("u1"), None).len(), 3);
        assert_eq!(toolbox.get_reviews(None, Some("loc1")).len(), 3);
    }
}

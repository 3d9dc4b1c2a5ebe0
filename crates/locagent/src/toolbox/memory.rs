//! In-memory toolbox backed by a JSON dataset

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::toolbox::types::{Location, Review, User};
use crate::toolbox::{InteractionTool, ToolboxError};

/// On-disk dataset layout: `{ "users": [...], "items": [...], "reviews": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub items: Vec<Location>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Toolbox holding every record in memory, indexed by id
#[derive(Debug, Default)]
pub struct InMemoryToolbox {
    users: HashMap<String, User>,
    items: HashMap<String, Location>,
    reviews: Vec<Review>,
}

impl InMemoryToolbox {
    pub fn new(dataset: Dataset) -> Self {
        let users = dataset
            .users
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();
        let items = dataset
            .items
            .into_iter()
            .map(|i| (i.id.clone(), i))
            .collect();

        Self {
            users,
            items,
            reviews: dataset.reviews,
        }
    }

    /// Load a dataset file
    pub fn from_file(path: &Path) -> Result<Self, ToolboxError> {
        let content = std::fs::read_to_string(path).map_err(|source| ToolboxError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let dataset: Dataset =
            serde_json::from_str(&content).map_err(|e| ToolboxError::Parse(e.to_string()))?;

        info!(
            "Loaded dataset {}: {} users, {} items, {} reviews",
            path.display(),
            dataset.users.len(),
            dataset.items.len(),
            dataset.reviews.len()
        );

        Ok(Self::new(dataset))
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

impl InteractionTool for InMemoryToolbox {
    fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).cloned()
    }

    fn get_reviews(&self, user_id: Option<&str>, item_id: Option<&str>) -> Vec<Review> {
        self.reviews
            .iter()
            .filter(|r| user_id.is_none_or(|id| r.author_id == id))
            .filter(|r| item_id.is_none_or(|id| r.location_id == id))
            .cloned()
            .collect()
    }

    fn get_item(&self, item_id: &str) -> Option<Location> {
        self.items.get(item_id).cloned()
    }
}

//! Toolbox interface for user, item and review records
//!
//! The agent only consumes this interface; record storage belongs to the
//! surrounding simulation. `InMemoryToolbox` is a dataset-file backed
//! implementation for the CLI and tests.

pub mod memory;
pub mod types;

pub use memory::{Dataset, InMemoryToolbox};
pub use types::{Location, Review, User};

/// Record access consumed by the agent.
///
/// Missing records are `None` or empty, never errors: the agent degrades to
/// default text when data is absent.
pub trait InteractionTool: Send + Sync {
    /// Look up a resident record
    fn get_user(&self, user_id: &str) -> Option<User>;

    /// Reviews matching every filter given; no filters returns all reviews
    fn get_reviews(&self, user_id: Option<&str>, item_id: Option<&str>) -> Vec<Review>;

    /// Look up a location record
    fn get_item(&self, item_id: &str) -> Option<Location>;
}

/// Errors raised while building a toolbox
#[derive(Debug, thiserror::Error)]
pub enum ToolboxError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset: {0}")]
    Parse(String),
}

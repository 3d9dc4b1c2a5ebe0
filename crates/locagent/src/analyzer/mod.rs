//! Keyword-based preference analysis of review histories

pub mod categories;
pub mod preferences;

pub use categories::Category;
pub use preferences::{NO_HISTORY, PreferenceSummary, analyze_preferences};

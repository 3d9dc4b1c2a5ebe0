//! Language model collaborator
//!
//! The agent sends a system + user chat and receives free-form text back.

pub mod provider;
pub mod remote;
pub mod types;

pub use provider::LanguageModel;
pub use remote::RemoteLlm;
pub use types::{ChatMessage, LlmError, Role};

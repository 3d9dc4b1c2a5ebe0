//! locagent - LLM-driven city resident agent
//!
//! This crate provides an agent that ranks candidate locations by a
//! resident's predicted interest and writes star ratings with reviews,
//! using keyword-based preference analysis and tolerant parsing of
//! language model output.

pub mod agent;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod llm;
pub mod parser;
pub mod testing;
pub mod toolbox;

pub use agent::LocationBehaviorAgent;
pub use error::AgentError;

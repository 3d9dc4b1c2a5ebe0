//! Best-effort parsing of model responses
//!
//! Each parser walks an ordered list of strategies and always ends in a
//! well-formed result; parse failures are logged, never returned.

pub mod recommendation;
pub mod review;

pub use recommendation::{parse_recommendation, validate_recommendation};
pub use review::{DEFAULT_STARS, parse_review};

//! Ranking extraction from free-form model output
//!
//! Strategies are tried in order and the first applicable one supplies the
//! ids. Whatever they find, [`validate_recommendation`] turns it into a
//! permutation of the candidate list.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::agent::types::RecommendationResult;

/// A parsing strategy: `None` when it does not apply to the text
type Strategy = fn(&str) -> Option<Vec<String>>;

const STRATEGIES: [(&str, Strategy); 3] = [
    ("json_list", json_list),
    ("comma_separated", comma_separated),
    ("id_pattern", id_pattern),
];

static ID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_-]{4,}").ok());

/// Parse a model response into a ranking of `candidates`
pub fn parse_recommendation(response: &str, candidates: &[String]) -> RecommendationResult {
    let found_ids = STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            strategy(response).inspect(|ids| {
                debug!("Recommendation strategy {} found {} ids", name, ids.len());
            })
        })
        .unwrap_or_default();

    validate_recommendation(&found_ids, candidates)
}

/// Keep known ids in first-seen order, then append the candidates the model
/// left out in their original order.
pub fn validate_recommendation(found_ids: &[String], candidates: &[String]) -> RecommendationResult {
    let known: HashSet<&str> = candidates.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    let mut item_list = Vec::with_capacity(candidates.len());

    let ranked = found_ids.iter().filter(|id| known.contains(id.as_str()));
    for id in ranked.chain(candidates.iter()) {
        if seen.insert(id.as_str()) {
            item_list.push(id.clone());
        }
    }

    RecommendationResult { item_list }
}

/// `[...]` decoded as a JSON array of strings. Applies to any bracketed text;
/// text that fails to decode yields no ids rather than falling through.
fn json_list(response: &str) -> Option<Vec<String>> {
    let trimmed = response.trim();
    if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return None;
    }

    match serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
        Ok(values) => Some(
            values
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        Err(e) => {
            warn!("Recommendation list is not valid JSON: {}", e);
            Some(Vec::new())
        }
    }
}

fn comma_separated(response: &str) -> Option<Vec<String>> {
    if !response.contains(',') {
        return None;
    }
    Some(response.split(',').map(|s| s.trim().to_string()).collect())
}

/// Any run of 4+ id-like characters
fn id_pattern(response: &str) -> Option<Vec<String>> {
    let pattern = ID_PATTERN.as_ref()?;
    Some(
        pattern
            .find_iter(response)
            .map(|m| m.as_str().to_string())
            .collect(),
    )
}

//! Integration tests for response parsing and preference analysis
//!
//! Covers the documented parsing examples plus invariant checks over a
//! spread of messy model outputs.

use locagent::agent::ReviewResult;
use locagent::analyzer::{NO_HISTORY, PreferenceSummary, analyze_preferences};
use locagent::parser::{parse_recommendation, parse_review};
use locagent::toolbox::Review;

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn assert_permutation(result: &[String], candidates: &[String]) {
    let mut got = result.to_vec();
    let mut want = candidates.to_vec();
    got.sort();
    want.sort();
    assert_eq!(got, want, "not a permutation: {result:?} vs {candidates:?}");
}

/// Deterministic pseudo-random text built from id fragments and noise
fn noisy_responses(candidates: &[String], count: usize) -> Vec<String> {
    const NOISE: [&str; 12] = [
        ",", " ", "[", "]", "\"", "\n", "推荐", "ID", "null", "1234", "-", "，",
    ];
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    (0..count)
        .map(|_| {
            let parts = (next() % 12) as usize;
            (0..parts)
                .map(|_| {
                    if next() % 2 == 0 {
                        candidates[(next() % candidates.len() as u64) as usize].clone()
                    } else {
                        NOISE[(next() % NOISE.len() as u64) as usize].to_string()
                    }
                })
                .collect::<String>()
        })
        .collect()
}

// =============================================================================
// Recommendation parsing
// =============================================================================

#[test]
fn test_bracketed_list_appends_missing_candidate() {
    let candidates = ids(&["locA", "locB", "locC", "locD"]);
    let result = parse_recommendation("[locA, locB, locC]", &candidates);
    assert_eq!(result.item_list, ids(&["locA", "locB", "locC", "locD"]));
}

#[test]
fn test_json_list_with_surrounding_whitespace() {
    let candidates = ids(&["locA", "locB", "locC"]);
    let result = parse_recommendation("  [\"locC\", \"locA\"]\n", &candidates);
    assert_eq!(result.item_list, ids(&["locC", "locA", "locB"]));
}

#[test]
fn test_permutation_over_noisy_responses() {
    let candidates = ids(&["loc_001", "loc-002", "Loc003", "p4x9"]);
    for response in noisy_responses(&candidates, 500) {
        let result = parse_recommendation(&response, &candidates);
        assert_permutation(&result.item_list, &candidates);
    }
}

#[test]
fn test_permutation_over_edge_inputs() {
    let candidates = ids(&["aaaa", "bbbb", "cccc"]);
    let inputs = [
        "",
        "[",
        "]",
        "[]",
        "[\"aaaa\"",
        "{\"item_list\": [\"cccc\"]}",
        ",,,,",
        "cccc,cccc,bbbb,bbbb",
        "[\"dddd\", \"eeee\"]",
        "🙂 bbbb 🙂",
        "aaaa\u{0}cccc",
    ];
    for input in inputs {
        let result = parse_recommendation(input, &candidates);
        assert_permutation(&result.item_list, &candidates);
    }
}

#[test]
fn test_single_candidate() {
    let candidates = ids(&["only"]);
    assert_eq!(parse_recommendation("nothing", &candidates).item_list, candidates);
}

// =============================================================================
// Review parsing
// =============================================================================

#[test]
fn test_review_documented_examples() {
    assert_eq!(
        parse_review("评分: 4, 评价: 很好的地方"),
        ReviewResult::new(4, "很好的地方")
    );
    assert_eq!(parse_review("Great spot!"), ReviewResult::new(4, "Great spot!"));
}

#[test]
fn test_review_reparse_is_stable() {
    let first = parse_review("评分: 3, 评价: 不错");
    let again = parse_review(&format!("评分: {}, 评价: {}", first.stars, first.review));
    assert_eq!(first, again);
}

#[test]
fn test_review_stars_always_in_range() {
    let inputs = [
        "评分: 0, 评价: 差",
        "评分: 7",
        "10/10 would visit",
        "rated 5/5",
        "٣ stars",
        "",
        "评价: 只有评价",
    ];
    for input in inputs {
        let result = parse_review(input);
        assert!((1..=5).contains(&result.stars), "{input:?} -> {result:?}");
    }
}

#[test]
fn test_review_with_preamble() {
    let response = "好的，以下是我的评价：\n评分: 2，评价: 服务很慢，菜也凉了。";
    assert_eq!(
        parse_review(response),
        ReviewResult::new(2, "服务很慢，菜也凉了。")
    );
}

// =============================================================================
// Preference analysis
// =============================================================================

#[test]
fn test_average_and_ratio_formulas() {
    let histories: Vec<Vec<Option<u8>>> = vec![
        vec![Some(1)],
        vec![Some(5), Some(5), Some(4)],
        vec![Some(2), None, Some(4), None],
        vec![None, None, None],
        vec![Some(3), Some(4), Some(5), Some(1), Some(2)],
    ];

    for stars in histories {
        let reviews: Vec<Review> = stars
            .iter()
            .map(|s| Review::new("u", "l", *s, "text"))
            .collect();
        let summary = PreferenceSummary::from_reviews(&reviews).unwrap();

        let n = stars.len() as f64;
        let mean = stars.iter().map(|s| f64::from(s.unwrap_or(3))).sum::<f64>() / n;
        let ratio = stars.iter().filter(|s| s.unwrap_or(0) >= 4).count() as f64 / n;

        assert!((summary.average_rating - mean).abs() < 1e-9);
        assert!((summary.positive_ratio - ratio).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&summary.positive_ratio));
    }
}

#[test]
fn test_all_missing_stars() {
    let reviews = vec![Review::new("u", "l", None, "博物馆"); 4];
    let summary = PreferenceSummary::from_reviews(&reviews).unwrap();
    assert_eq!(summary.average_rating, 3.0);
    assert_eq!(summary.positive_ratio, 0.0);
    assert_eq!(summary.top_categories(5).len(), 1);
}

#[test]
fn test_no_history_text() {
    assert_eq!(analyze_preferences(&[]), NO_HISTORY);
}

#[test]
fn test_keyword_match_is_case_insensitive_for_text() {
    // review text is lower-cased before matching; the table itself is lower-case
    let reviews = vec![Review::new("u", "l", Some(5), "LOVED the 咖啡 here")];
    let text = analyze_preferences(&reviews);
    assert!(text.contains("偏好类型：餐饮美食"));
    assert!(text.contains("高频访问类型：餐饮美食(1)"));
}

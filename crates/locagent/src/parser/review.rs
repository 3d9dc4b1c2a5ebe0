//! Star rating and review extraction from free-form model output

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::agent::types::ReviewResult;

/// Rating used when the response carries none
pub const DEFAULT_STARS: u8 = 4;

type Strategy = fn(&str) -> Option<ReviewResult>;

const STRATEGIES: [(&str, Strategy); 2] = [
    ("labelled", labelled),
    ("standalone_digit", standalone_digit),
];

/// `评分: X, 评价: Y`, with either colon width and loose separators
static LABELLED: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?s)评分\s*[:：]\s*(\d)[\s,;，；]*评价\s*[:：]\s*(.+)").ok()
});

/// Parse a model response into a rating and review
pub fn parse_review(response: &str) -> ReviewResult {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            strategy(response).inspect(|_| debug!("Review strategy {} matched", name))
        })
        .unwrap_or_else(|| {
            warn!("No rating found in review response, defaulting to {} stars", DEFAULT_STARS);
            ReviewResult::new(DEFAULT_STARS, response)
        })
}

fn valid_stars(digit: &str) -> Option<u8> {
    digit.parse::<u8>().ok().filter(|s| (1..=5).contains(s))
}

fn labelled(response: &str) -> Option<ReviewResult> {
    let captures = LABELLED.as_ref()?.captures(response)?;
    // \d also matches non-ASCII digits, which fail to parse and fall through
    let stars = valid_stars(captures.get(1)?.as_str())?;
    let review = captures.get(2)?.as_str().trim();
    Some(ReviewResult::new(stars, review))
}

/// First digit 1-5 with no digit directly before or after it; that single
/// digit is cut out of the text to form the review.
fn standalone_digit(response: &str) -> Option<ReviewResult> {
    let chars: Vec<(usize, char)> = response.char_indices().collect();

    chars.iter().enumerate().find_map(|(i, &(offset, c))| {
        if !('1'..='5').contains(&c) {
            return None;
        }
        let digit_before = i > 0 && chars[i - 1].1.is_ascii_digit();
        let digit_after = chars.get(i + 1).is_some_and(|(_, next)| next.is_ascii_digit());
        if digit_before || digit_after {
            return None;
        }

        let stars = valid_stars(&c.to_string())?;
        let review = format!("{}{}", &response[..offset], &response[offset + 1..]);
        Some(ReviewResult::new(stars, review.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_format() {
        assert_eq!(
            parse_review("评分: 4, 评价: 很好的地方"),
            ReviewResult::new(4, "很好的地方")
        );
    }

    #[test]
    fn test_labelled_full_width_and_multiline() {
        let response = "评分：5；\n评价：环境优美。\n服务周到。\n";
        assert_eq!(
            parse_review(response),
            ReviewResult::new(5, "环境优美。\n服务周到。")
        );
    }

    #[test]
    fn test_labelled_out_of_range_falls_back_to_digit() {
        // 9 is rejected by the labelled strategy; the first standalone 1-5 is the 3
        let result = parse_review("评分: 9, 评价: 住了3晚");
        assert_eq!(result, ReviewResult::new(3, "评分: 9, 评价: 住了晚"));
    }

    #[test]
    fn test_non_ascii_digit_falls_through() {
        let result = parse_review("评分: ٤, 评价: 不错");
        assert_eq!(result, ReviewResult::new(DEFAULT_STARS, "评分: ٤, 评价: 不错"));
    }

    #[test]
    fn test_standalone_digit() {
        assert_eq!(
            parse_review("I'd give it 5 stars, lovely park"),
            ReviewResult::new(5, "I'd give it  stars, lovely park")
        );
    }

    #[test]
    fn test_digit_inside_number_ignored() {
        assert_eq!(
            parse_review("Open since 1987, rating 2"),
            ReviewResult::new(2, "Open since 1987, rating")
        );
        assert_eq!(
            parse_review("Room 404 was fine"),
            ReviewResult::new(DEFAULT_STARS, "Room 404 was fine")
        );
    }

    #[test]
    fn test_final_fallback() {
        assert_eq!(
            parse_review("Great spot!"),
            ReviewResult::new(4, "Great spot!")
        );
        assert_eq!(parse_review(""), ReviewResult::new(4, ""));
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let first = parse_review("评分: 3, 评价: 不错");
        let rendered = format!("评分: {}, 评价: {}", first.stars, first.review);
        assert_eq!(parse_review(&rendered), first);
        assert_eq!(first, ReviewResult::new(3, "不错"));
    }
}

//! Text blocks embedded in prompts

use crate::toolbox::{Location, Review};

pub const UNKNOWN_LOCATION: &str = "未知地点";
pub const NO_USER_HISTORY: &str = "该居民暂无历史评价";
pub const NO_LOCATION_HISTORY: &str = "该地点暂无历史评价";
pub const MISSING_LOCATION_INFO: &str = "地点信息缺失";

/// A candidate enriched with its item record
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLocation {
    pub id: String,
    pub name: String,
    pub kind: String,
}

impl CandidateLocation {
    /// Fill name and type from the item record, if any
    pub fn from_record(id: &str, record: Option<&Location>, default_kind: &str) -> Self {
        Self {
            id: id.to_string(),
            name: record
                .and_then(|r| r.name.clone())
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            kind: record
                .and_then(|r| r.category.clone())
                .unwrap_or_else(|| default_kind.to_string()),
        }
    }
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn format_location_list(locations: &[CandidateLocation]) -> String {
    locations
        .iter()
        .map(|l| format!("- {} ({}, ID: {})", l.name, l.kind, l.id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mean star rating of a location's reviews, rounded to one decimal with
/// ties to even (`2.25` gives `2.2`). Unrated reviews count as 0; no reviews
/// gives 0.0.
pub fn location_average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: f64 = reviews.iter().map(|r| f64::from(r.stars.unwrap_or(0))).sum();
    let mean = total / reviews.len() as f64;
    format!("{mean:.1}").parse().unwrap_or(0.0)
}

/// One line per candidate: its average rating, or a no-rating marker
pub fn format_location_ratings(ratings: &[(&CandidateLocation, f64)]) -> String {
    ratings
        .iter()
        .map(|(location, avg)| {
            if *avg > 0.0 {
                format!("- {}: {:.1}星", location.name, avg)
            } else {
                format!("- {}: 暂无评分", location.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The resident's most recent reviews, for tone imitation
pub fn format_user_history(reviews: &[Review], limit: usize, snippet_chars: usize) -> String {
    format_recent(reviews, limit, snippet_chars, NO_USER_HISTORY)
}

/// The location's most recent reviews
pub fn format_location_history(reviews: &[Review], limit: usize, snippet_chars: usize) -> String {
    format_recent(reviews, limit, snippet_chars, NO_LOCATION_HISTORY)
}

fn format_recent(reviews: &[Review], limit: usize, snippet_chars: usize, empty: &str) -> String {
    if reviews.is_empty() {
        return empty.to_string();
    }

    let mut recent: Vec<&Review> = reviews.iter().collect();
    recent.sort_by(|a, b| {
        b.timestamp
            .unwrap_or(0.0)
            .total_cmp(&a.timestamp.unwrap_or(0.0))
    });
    recent.truncate(limit);

    let lines = recent
        .iter()
        .map(|r| {
            let location = if r.location_id.is_empty() {
                UNKNOWN_LOCATION
            } else {
                r.location_id.as_str()
            };
            let stars = r
                .stars
                .map(|s| s.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "  - {}: {}星, {}...",
                location,
                stars,
                truncate_chars(&r.text, snippet_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("近期评价：\n{lines}")
}

pub fn format_location_info(location: Option<&Location>, description_chars: usize) -> String {
    let Some(location) = location else {
        return MISSING_LOCATION_INFO.to_string();
    };

    let description = location.description.as_deref().unwrap_or("无描述信息");
    [
        format!(
            "名称: {}",
            location.name.as_deref().unwrap_or(UNKNOWN_LOCATION)
        ),
        format!(
            "类型: {}",
            location.category.as_deref().unwrap_or("未知类型")
        ),
        format!("描述: {}...", truncate_chars(description, description_chars)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("城市公园很美", 2), "城市");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_candidate_defaults() {
        let missing = CandidateLocation::from_record("loc9", None, "location");
        assert_eq!(missing.name, UNKNOWN_LOCATION);
        assert_eq!(missing.kind, "location");

        let record = Location::new("loc1", "外滩", "landmark");
        let found = CandidateLocation::from_record("loc1", Some(&record), "location");
        assert_eq!(format_location_list(&[found]), "- 外滩 (landmark, ID: loc1)");
    }

    #[test]
    fn test_location_average_rating() {
        assert_eq!(location_average_rating(&[]), 0.0);
        let reviews = vec![
            Review::new("u1", "loc1", Some(5), ""),
            Review::new("u2", "loc1", Some(4), ""),
            Review::new("u3", "loc1", None, ""),
        ];
        assert_eq!(location_average_rating(&reviews), 3.0);
    }

    #[test]
    fn test_location_average_rating_ties_round_to_even() {
        let rated = |stars: &[u8]| -> Vec<Review> {
            stars
                .iter()
                .map(|s| Review::new("u", "loc", Some(*s), ""))
                .collect()
        };
        assert_eq!(location_average_rating(&rated(&[2, 2, 2, 3])), 2.2);
        assert_eq!(location_average_rating(&rated(&[5, 4, 4, 4])), 4.2);

        let a = CandidateLocation::from_record("a", Some(&Location::new("a", "甲", "park")), "x");
        let avg = location_average_rating(&rated(&[2, 2, 2, 3]));
        assert_eq!(format_location_ratings(&[(&a, avg)]), "- 甲: 2.2星");
    }

    #[test]
    fn test_tiny_average_renders_as_unrated() {
        let mut reviews = vec![Review::new("u", "loc", None, ""); 29];
        reviews.push(Review::new("u", "loc", Some(1), ""));
        let avg = location_average_rating(&reviews);
        assert_eq!(avg, 0.0);

        let a = CandidateLocation::from_record("a", Some(&Location::new("a", "甲", "park")), "x");
        assert_eq!(format_location_ratings(&[(&a, avg)]), "- 甲: 暂无评分");
    }

    #[test]
    fn test_format_location_ratings() {
        let a = CandidateLocation::from_record("a", Some(&Location::new("a", "甲", "park")), "x");
        let b = CandidateLocation::from_record("b", Some(&Location::new("b", "乙", "park")), "x");
        assert_eq!(
            format_location_ratings(&[(&a, 4.0), (&b, 0.0)]),
            "- 甲: 4.0星\n- 乙: 暂无评分"
        );
    }

    #[test]
    fn test_format_user_history_most_recent_first() {
        let reviews = vec![
            Review::new("u1", "old", Some(2), "旧评价").with_timestamp(1.0),
            Review::new("u1", "new", Some(5), "新评价").with_timestamp(3.0),
            Review::new("u1", "mid", None, "中间").with_timestamp(2.0),
            Review::new("u1", "", Some(4), "无时间"),
        ];
        assert_eq!(
            format_user_history(&reviews, 3, 50),
            "近期评价：\n  - new: 5星, 新评价...\n  - mid: ?星, 中间...\n  - old: 2星, 旧评价..."
        );
        assert_eq!(format_user_history(&[], 3, 50), NO_USER_HISTORY);
    }

    #[test]
    fn test_format_location_history_truncates_text() {
        let reviews = vec![Review::new("u1", "", Some(3), "一二三四五六")];
        assert_eq!(
            format_location_history(&reviews, 5, 3),
            "近期评价：\n  - 未知地点: 3星, 一二三..."
        );
        assert_eq!(format_location_history(&[], 5, 100), NO_LOCATION_HISTORY);
    }

    #[test]
    fn test_format_location_info() {
        assert_eq!(format_location_info(None, 100), MISSING_LOCATION_INFO);

        let location = Location::new("loc1", "西湖", "scenic").with_description("湖光山色");
        assert_eq!(
            format_location_info(Some(&location), 100),
            "名称: 西湖\n类型: scenic\n描述: 湖光山色..."
        );

        let bare = Location {
            id: "loc2".to_string(),
            name: None,
            category: None,
            description: None,
        };
        assert_eq!(
            format_location_info(Some(&bare), 100),
            "名称: 未知地点\n类型: 未知类型\n描述: 无描述信息..."
        );
    }
}

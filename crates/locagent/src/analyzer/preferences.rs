//! Preference summary derived from a resident's review history

use crate::analyzer::categories::Category;
use crate::toolbox::Review;

/// Text used in place of a summary when the resident has no reviews
pub const NO_HISTORY: &str = "该居民暂无历史评价数据";

/// Rating assumed for the average when a review has no stars
const AVERAGE_DEFAULT_STARS: u8 = 3;
/// Rating assumed for the positive-ratio check when a review has no stars.
/// Missing stars never count as positive.
const POSITIVE_DEFAULT_STARS: u8 = 0;
const POSITIVE_THRESHOLD: u8 = 4;
const TOP_CATEGORIES: usize = 5;

/// Structured view of a resident's review history
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceSummary {
    pub review_count: usize,
    pub average_rating: f64,
    /// Fraction of reviews rated 4 stars or more, in [0, 1]
    pub positive_ratio: f64,
    /// Categories matched at least once, in order of first match
    pub matched_categories: Vec<Category>,
    /// Hit count per category, in order of first match
    pub category_frequency: Vec<(Category, usize)>,
}

impl PreferenceSummary {
    /// Summarize a review history. Returns `None` for an empty history.
    pub fn from_reviews(reviews: &[Review]) -> Option<Self> {
        if reviews.is_empty() {
            return None;
        }

        let count = reviews.len() as f64;
        let star_total: f64 = reviews
            .iter()
            .map(|r| f64::from(r.stars.unwrap_or(AVERAGE_DEFAULT_STARS)))
            .sum();
        let positive = reviews
            .iter()
            .filter(|r| r.stars.unwrap_or(POSITIVE_DEFAULT_STARS) >= POSITIVE_THRESHOLD)
            .count();

        let mut matched_categories = Vec::new();
        let mut category_frequency: Vec<(Category, usize)> = Vec::new();

        for review in reviews {
            for category in Category::classify(&review.text) {
                match category_frequency.iter_mut().find(|(c, _)| *c == category) {
                    Some((_, hits)) => *hits += 1,
                    None => {
                        matched_categories.push(category);
                        category_frequency.push((category, 1));
                    }
                }
            }
        }

        Some(Self {
            review_count: reviews.len(),
            average_rating: star_total / count,
            positive_ratio: positive as f64 / count,
            matched_categories,
            category_frequency,
        })
    }

    /// The `n` most frequent categories, ties kept in first-match order
    pub fn top_categories(&self, n: usize) -> Vec<(Category, usize)> {
        let mut ranked = self.category_frequency.clone();
        // stable sort keeps first-match order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Three-line text block embedded in prompts
    pub fn render(&self) -> String {
        let pref_text = if self.matched_categories.is_empty() {
            "无明显偏好".to_string()
        } else {
            self.matched_categories
                .iter()
                .map(Category::label)
                .collect::<Vec<_>>()
                .join("、")
        };

        let top = self.top_categories(TOP_CATEGORIES);
        let type_text = if top.is_empty() {
            "无类型数据".to_string()
        } else {
            top.iter()
                .map(|(c, hits)| format!("{}({})", c.label(), hits))
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "历史行为分析：平均评分{:.1}星，{:.0}%评价为积极\n偏好类型：{}\n高频访问类型：{}",
            self.average_rating,
            self.positive_ratio * 100.0,
            pref_text,
            type_text
        )
    }
}

/// Render a resident's preference text, or [`NO_HISTORY`] when there are no reviews
pub fn analyze_preferences(reviews: &[Review]) -> String {
    match PreferenceSummary::from_reviews(reviews) {
        Some(summary) => summary.render(),
        None => NO_HISTORY.to_string(),
    }
}

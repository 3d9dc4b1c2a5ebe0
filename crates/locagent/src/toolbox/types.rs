//! Record types supplied by the toolbox
//!
//! Field names on the wire follow the simulation toolbox's record format
//! (`user_id`, `item_id`, `item_name`, `review`), while the Rust fields use
//! the agent's own vocabulary.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A resident's review of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Resident who wrote the review
    #[serde(rename = "user_id", default)]
    pub author_id: String,
    /// Location being reviewed
    #[serde(rename = "item_id", default)]
    pub location_id: String,
    /// Star rating 1-5, absent in some records
    #[serde(default, deserialize_with = "deserialize_stars")]
    pub stars: Option<u8>,
    /// Free-text body
    #[serde(rename = "review", default)]
    pub text: String,
    /// Seconds since epoch, absent in some records
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl Review {
    pub fn new(author_id: &str, location_id: &str, stars: Option<u8>, text: &str) -> Self {
        Self {
            author_id: author_id.to_string(),
            location_id: location_id.to_string(),
            stars,
            text: text.to_string(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A location (toolbox "item").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "item_id")]
    pub id: String,
    #[serde(rename = "item_name", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Location {
    pub fn new(id: &str, name: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// A resident record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Accepts `4`, `4.0` or `null`; datasets exported from review sites often
/// store ratings as floats. Fractional or negative ratings are rejected.
fn deserialize_stars<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if value.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&value) {
        return Err(D::Error::custom(format!(
            "stars must be a whole number, got {value}"
        )));
    }
    Ok(Some(value as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_from_toolbox_json() {
        let review: Review = serde_json::from_str(
            r#"{"user_id": "u1", "item_id": "loc1", "stars": 5, "review": "很棒的公园", "timestamp": 1700000000}"#,
        )
        .unwrap();

        assert_eq!(review.author_id, "u1");
        assert_eq!(review.location_id, "loc1");
        assert_eq!(review.stars, Some(5));
        assert_eq!(review.text, "很棒的公园");
        assert_eq!(review.timestamp, Some(1_700_000_000.0));
    }

    #[test]
    fn test_review_float_stars_and_missing_fields() {
        let review: Review = serde_json::from_str(r#"{"stars": 4.0}"#).unwrap();
        assert_eq!(review.stars, Some(4));
        assert_eq!(review.text, "");
        assert!(review.timestamp.is_none());

        let review: Review = serde_json::from_str(r#"{"review": "no rating"}"#).unwrap();
        assert!(review.stars.is_none());

        let review: Review = serde_json::from_str(r#"{"stars": null}"#).unwrap();
        assert!(review.stars.is_none());
    }

    #[test]
    fn test_review_fractional_stars_rejected() {
        for json in [r#"{"stars": 3.5}"#, r#"{"stars": -1}"#, r#"{"stars": 4.01}"#] {
            let err = serde_json::from_str::<Review>(json).unwrap_err();
            assert!(err.to_string().contains("whole number"), "{json}: {err}");
        }
    }

    #[test]
    fn test_location_from_toolbox_json() {
        let location: Location = serde_json::from_str(
            r#"{"item_id": "loc1", "item_name": "中山公园", "category": "park"}"#,
        )
        .unwrap();

        assert_eq!(location.id, "loc1");
        assert_eq!(location.name.as_deref(), Some("中山公园"));
        assert_eq!(location.category.as_deref(), Some("park"));
        assert!(location.description.is_none());
    }
}

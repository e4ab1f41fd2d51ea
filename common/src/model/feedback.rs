use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Record;

pub type FeedbackId = u64;

/// Fixed set of categories an alumnus can file feedback under.
///
/// Serialized with the human-readable label, which is also what the
/// category filter dropdown shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackCategory {
    #[serde(rename = "General Feedback")]
    General,
    #[serde(rename = "Events & Programs")]
    EventsAndPrograms,
    #[serde(rename = "Platform Experience")]
    PlatformExperience,
    #[serde(rename = "Mentorship")]
    Mentorship,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 4] = [
        FeedbackCategory::General,
        FeedbackCategory::EventsAndPrograms,
        FeedbackCategory::PlatformExperience,
        FeedbackCategory::Mentorship,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FeedbackCategory::General => "General Feedback",
            FeedbackCategory::EventsAndPrograms => "Events & Programs",
            FeedbackCategory::PlatformExperience => "Platform Experience",
            FeedbackCategory::Mentorship => "Mentorship",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Star rating in `1..=5`. Out-of-range values are rejected when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Rating(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn sentiment(self) -> Sentiment {
        match self.0 {
            4.. => Sentiment::Positive,
            3 => Sentiment::Neutral,
            _ => Sentiment::Negative,
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating {} outside 1..=5", value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

/// A single piece of alumni feedback as shown on the triage screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    /// Display name of the author.
    pub user: String,
    pub email: String,
    pub category: FeedbackCategory,
    pub rating: Rating,
    pub comment: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_flagged: bool,
}

impl Record for FeedbackRecord {
    type Id = FeedbackId;

    fn id(&self) -> FeedbackId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_rejects_out_of_range_values() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert_eq!(Rating::new(5).map(Rating::value), Some(5));
    }

    #[test]
    fn sentiment_follows_rating_bands() {
        let sentiment = |v| Rating::new(v).unwrap().sentiment();
        assert_eq!(sentiment(5), Sentiment::Positive);
        assert_eq!(sentiment(4), Sentiment::Positive);
        assert_eq!(sentiment(3), Sentiment::Neutral);
        assert_eq!(sentiment(2), Sentiment::Negative);
        assert_eq!(sentiment(1), Sentiment::Negative);
    }

    #[test]
    fn record_parses_labelled_category() {
        let json = r#"{
            "id": 3,
            "user": "Alex Brown",
            "email": "alex.brown@example.com",
            "category": "Platform Experience",
            "rating": 3,
            "comment": "Navigation could be improved.",
            "date": "2025-05-23",
            "is_flagged": true
        }"#;
        let record: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, FeedbackCategory::PlatformExperience);
        assert!(!record.is_read);
        assert!(record.is_flagged);
    }

    #[test]
    fn record_with_bad_rating_is_rejected() {
        let json = r#"{"id":1,"user":"a","email":"b","category":"Mentorship",
            "rating":9,"comment":"","date":"2025-05-01"}"#;
        assert!(serde_json::from_str::<FeedbackRecord>(json).is_err());
    }
}

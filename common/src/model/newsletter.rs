//! Newsletter records as returned by `GET /newsletters/`.
//!
//! The backend response shape is validated here: required fields must be
//! present and typed, optional text fields collapse blank strings to `None`
//! so the views never have to distinguish `""` from a missing value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Record;

pub type NewsletterId = u64;
pub type ImageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterStatus {
    Draft,
    Published,
}

impl NewsletterStatus {
    /// Value sent in the `status` multipart field.
    pub fn as_str(self) -> &'static str {
        match self {
            NewsletterStatus::Draft => "draft",
            NewsletterStatus::Published => "published",
        }
    }
}

impl fmt::Display for NewsletterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image already stored by the backend for a newsletter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterImage {
    pub id: ImageId,
    /// Absolute or backend-relative URL of the stored file.
    #[serde(alias = "url")]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Newsletter {
    pub id: NewsletterId,
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub subtitle: Option<String>,
    /// HTML fragment.
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub url: Option<String>,
    pub status: NewsletterStatus,
    /// Ordered as the backend stores them.
    #[serde(default)]
    pub images: Vec<NewsletterImage>,
    pub created_at: DateTime<Utc>,
}

impl Newsletter {
    pub fn is_draft(&self) -> bool {
        self.status == NewsletterStatus::Draft
    }

    /// First image, used as the card cover.
    pub fn cover(&self) -> Option<&NewsletterImage> {
        self.images.first()
    }
}

impl Record for Newsletter {
    type Id = NewsletterId;

    fn id(&self) -> NewsletterId {
        self.id
    }
}

pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use super::newsletter::blank_as_none;

pub type StoryId = u64;

/// An alumni success story listed on the success-stories screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessStory {
    pub id: StoryId,
    /// Alumnus the story is about.
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub title: Option<String>,
    pub story: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for SuccessStory {
    type Id = StoryId;

    fn id(&self) -> StoryId {
        self.id
    }
}

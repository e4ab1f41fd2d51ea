#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::{NaiveDate, TimeZone, Utc};
use common::editor::{NewsletterPayload, StagedFile};
use common::error::ApiError;
use common::model::feedback::{FeedbackCategory, FeedbackRecord, Rating};
use common::model::newsletter::{ImageId, Newsletter, NewsletterId, NewsletterImage, NewsletterStatus};
use common::sync::NewsletterApi;

#[derive(Debug, Clone, PartialEq)]
pub struct TestFile {
    pub name: String,
    pub size: u64,
}

impl TestFile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            size: 2048,
        }
    }

    pub fn sized(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

impl StagedFile for TestFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn byte_len(&self) -> u64 {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(NewsletterPayload<TestFile>),
    Update(NewsletterId, NewsletterPayload<TestFile>),
    Delete(NewsletterId),
    DeleteAll,
    DeleteAttachment(NewsletterId, ImageId),
}

/// Records every call. Mutations echo the payload back as a stored
/// newsletter unless a failure was queued.
#[derive(Default)]
pub struct RecordingApi {
    pub calls: RefCell<Vec<Call>>,
    failures: RefCell<VecDeque<ApiError>>,
    pub listing: RefCell<Vec<Newsletter>>,
}

impl RecordingApi {
    pub fn fail_next(&self, err: ApiError) {
        self.failures.borrow_mut().push_back(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn echo(id: NewsletterId, payload: &NewsletterPayload<TestFile>) -> Newsletter {
    Newsletter {
        id,
        title: payload.title.clone(),
        subtitle: Some(payload.subtitle.clone()).filter(|s| !s.is_empty()),
        description: payload.description.clone(),
        url: Some(payload.url.clone()).filter(|s| !s.is_empty()),
        status: payload.status,
        images: payload
            .images
            .iter()
            .enumerate()
            .map(|(i, _)| NewsletterImage {
                id: 100 + i as u64,
                image: format!("/media/{}.png", 100 + i),
            })
            .collect(),
        created_at: Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap(),
    }
}

impl NewsletterApi for RecordingApi {
    type File = TestFile;

    async fn list(&self) -> Result<Vec<Newsletter>, ApiError> {
        self.record(Call::List)?;
        Ok(self.listing.borrow().clone())
    }

    async fn create(&self, payload: NewsletterPayload<TestFile>) -> Result<Newsletter, ApiError> {
        let stored = echo(1, &payload);
        self.record(Call::Create(payload))?;
        Ok(stored)
    }

    async fn update(
        &self,
        id: NewsletterId,
        payload: NewsletterPayload<TestFile>,
    ) -> Result<Newsletter, ApiError> {
        let stored = echo(id, &payload);
        self.record(Call::Update(id, payload))?;
        Ok(stored)
    }

    async fn delete(&self, id: NewsletterId) -> Result<(), ApiError> {
        self.record(Call::Delete(id))
    }

    async fn delete_all(&self) -> Result<(), ApiError> {
        self.record(Call::DeleteAll)
    }

    async fn delete_attachment(
        &self,
        newsletter_id: NewsletterId,
        image_id: ImageId,
    ) -> Result<(), ApiError> {
        self.record(Call::DeleteAttachment(newsletter_id, image_id))
    }
}

pub fn stored_newsletter(id: NewsletterId, status: NewsletterStatus, images: &[ImageId]) -> Newsletter {
    Newsletter {
        id,
        title: "Homecoming".into(),
        subtitle: None,
        description: "<p>Join us</p>".into(),
        url: None,
        status,
        images: images
            .iter()
            .map(|id| NewsletterImage {
                id: *id,
                image: format!("/media/{}.png", id),
            })
            .collect(),
        created_at: Utc.with_ymd_and_hms(2025, 2, 14, 12, 0, 0).unwrap(),
    }
}

pub fn feedback(id: u64, rating: u8, day: u32) -> FeedbackRecord {
    FeedbackRecord {
        id,
        user: format!("User {}", id),
        email: format!("user{}@alumni.edu", id),
        category: FeedbackCategory::ALL[id as usize % 4],
        rating: Rating::new(rating).unwrap(),
        comment: format!("Comment number {}", id),
        date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        is_read: false,
        is_flagged: false,
    }
}

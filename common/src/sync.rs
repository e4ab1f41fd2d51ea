//! Boundary to the REST backend.
//!
//! The traits here are what the screens depend on; the frontend implements
//! them over HTTP and tests implement them with recording fakes. The helpers
//! build endpoint URLs and turn raw responses into typed results, rejecting
//! bodies that do not match the record schemas instead of passing partial
//! data along.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::editor::{NewsletterPayload, StagedFile, Submission, SubmitTarget};
use crate::error::ApiError;
use crate::model::newsletter::{ImageId, Newsletter, NewsletterId};
use crate::model::story::{StoryId, SuccessStory};

/// Newsletter CRUD as the editor and the newsletter list consume it.
#[allow(async_fn_in_trait)]
pub trait NewsletterApi {
    type File: StagedFile;

    async fn list(&self) -> Result<Vec<Newsletter>, ApiError>;
    async fn create(&self, payload: NewsletterPayload<Self::File>) -> Result<Newsletter, ApiError>;
    async fn update(
        &self,
        id: NewsletterId,
        payload: NewsletterPayload<Self::File>,
    ) -> Result<Newsletter, ApiError>;
    async fn delete(&self, id: NewsletterId) -> Result<(), ApiError>;
    async fn delete_all(&self) -> Result<(), ApiError>;
    async fn delete_attachment(
        &self,
        newsletter_id: NewsletterId,
        image_id: ImageId,
    ) -> Result<(), ApiError>;
}

/// Sends an editor submission as a create or an update.
pub async fn send<A: NewsletterApi>(
    api: &A,
    submission: Submission<A::File>,
) -> Result<Newsletter, ApiError> {
    match submission.target {
        SubmitTarget::Create => api.create(submission.payload).await,
        SubmitTarget::Update(id) => api.update(id, submission.payload).await,
    }
}

#[allow(async_fn_in_trait)]
pub trait StoryApi {
    async fn list_stories(&self) -> Result<Vec<SuccessStory>, ApiError>;
    async fn delete_story(&self, id: StoryId) -> Result<(), ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait AdminApi {
    async fn check_admin_exists(&self) -> Result<bool, ApiError>;
}

/// Where the app goes first, decided once at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRoute {
    Login,
    SetAdmin,
}

impl EntryRoute {
    /// No admin yet means the first visitor must create one. If the check
    /// fails the app falls back to the login screen.
    pub fn from_check(result: Result<bool, ApiError>) -> Self {
        match result {
            Ok(false) => EntryRoute::SetAdmin,
            Ok(true) => EntryRoute::Login,
            Err(err) => {
                log::warn!("bootstrap: admin check failed: {}", err);
                EntryRoute::Login
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminExists {
    pub exists: bool,
}

/// Endpoint paths under a base URL such as `http://localhost:8000/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn newsletters(&self) -> String {
        format!("{}/newsletters/", self.base)
    }

    pub fn newsletter(&self, id: NewsletterId) -> String {
        format!("{}/newsletters/{}/", self.base, id)
    }

    pub fn newsletter_image(&self, id: NewsletterId, image_id: ImageId) -> String {
        format!("{}/newsletters/{}/images/{}/", self.base, id, image_id)
    }

    pub fn newsletters_delete_all(&self) -> String {
        format!("{}/newsletters/delete-all/", self.base)
    }

    pub fn success_stories(&self) -> String {
        format!("{}/success-stories/", self.base)
    }

    pub fn success_story(&self, id: StoryId) -> String {
        format!("{}/success-stories/{}/", self.base, id)
    }

    pub fn check_admin_exists(&self) -> String {
        format!("{}/check-admin-exists/", self.base)
    }

    /// Absolute URL of a stored image. The backend may answer with a path
    /// relative to its origin.
    pub fn media_url(&self, path: &str) -> String {
        if ["http://", "https://", "data:", "blob:"]
            .iter()
            .any(|scheme| path.starts_with(scheme))
        {
            return path.to_string();
        }
        let origin = match self.base.find("://") {
            Some(scheme_end) => {
                let host_start = scheme_end + 3;
                match self.base[host_start..].find('/') {
                    Some(slash) => &self.base[..host_start + slash],
                    None => self.base.as_str(),
                }
            }
            None => "",
        };
        format!("{}/{}", origin, path.trim_start_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<String>,
    error: Option<String>,
}

/// Human-readable message from an error body, if the backend sent one.
pub fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.detail)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

/// Maps a non-2xx status to an [`ApiError`]; passes 2xx through.
pub fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status {
            status,
            message: error_message(body),
        })
    }
}

/// Checks the status and decodes the body as `T`.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    check_status(status, body)?;
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

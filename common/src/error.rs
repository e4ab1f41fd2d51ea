//! Error types shared by the core and the frontend.
//!
//! Three families exist:
//! - [`ValidationError`]: client-side form checks that never reach the network.
//! - [`StagingRejection`]: one file of an image batch refused by the editor.
//! - [`ApiError`]: a failed request to the backend collaborator.
//!
//! None of them is fatal; the frontend turns each into a toast and leaves
//! the screen in the state it was in before the action.

use num_format::{Locale, ToFormattedString};
use thiserror::Error;

use crate::limits::{MAX_ATTACHMENTS, MAX_IMAGE_BYTES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Description is required")]
    MissingDescription,
    #[error("URL must start with http:// or https:// (got \"{0}\")")]
    InvalidUrl(String),
}

impl ValidationError {
    /// Name of the form field the message belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingTitle => "title",
            ValidationError::MissingDescription => "description",
            ValidationError::InvalidUrl(_) => "url",
        }
    }
}

/// Why a single staged image was refused. The rest of its batch is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagingRejection {
    #[error("{file_name} is {} bytes; images may be at most {} bytes", .size.to_formatted_string(&Locale::en), MAX_IMAGE_BYTES.to_formatted_string(&Locale::en))]
    TooLarge { file_name: String, size: u64 },
    #[error("{file_name} was not added: a newsletter holds at most {} images", MAX_ATTACHMENTS)]
    TooMany { file_name: String },
}

impl StagingRejection {
    pub fn file_name(&self) -> &str {
        match self {
            StagingRejection::TooLarge { file_name, .. } => file_name,
            StagingRejection::TooMany { file_name } => file_name,
        }
    }
}

/// Failure reported by the remote sync boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("unexpected response from server: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Message for the user: the server's own wording when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a save is already in progress")]
    Busy,
    #[error("no attachment at position {0}")]
    NoSuchAttachment(usize),
    #[error("image {0} is already being deleted")]
    AlreadyPendingDelete(u64),
    #[error("nothing is being submitted")]
    NotSubmitting,
    #[error("wait for the image delete to finish before saving")]
    DeletePending,
}

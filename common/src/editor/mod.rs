//! Newsletter composition state machine.
//!
//! ```text
//! Empty --input--> Editing --submit--> Submitting --ok(create)--> Empty
//!                     ^                    |  \----ok(update)--> Editing (reloaded)
//!                     |                    |
//!                     +------failure-------+
//! ```
//!
//! The editor never talks to the network itself. [`NewsletterEditor::submit`]
//! validates and hands back a [`Submission`] for the caller to send through
//! a [`crate::sync::NewsletterApi`]; the response comes back through
//! [`NewsletterEditor::complete`]. Validation failures return before a
//! submission exists, so an invalid form can never reach the backend.

pub mod attachments;
pub mod description;
pub mod history;

pub use attachments::{
    Attachment, AttachmentList, AttachmentSource, LocalHandle, Removal, StagedFile, StagingReport,
};

use crate::error::{ApiError, EditorError, ValidationError};
use crate::limits::SAVE_FALLBACK_MESSAGE;
use crate::model::newsletter::{ImageId, Newsletter, NewsletterId, NewsletterStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Empty,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(NewsletterId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Subtitle,
    Body,
    Url,
}

/// Text the user typed. `body` is Markdown source; raw HTML is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFields {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub url: String,
}

/// Multipart body of a create or update request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsletterPayload<F> {
    pub title: String,
    pub subtitle: String,
    /// Rendered HTML.
    pub description: String,
    pub url: String,
    pub status: NewsletterStatus,
    /// Staged files, in attachment order. Sent as repeated `images` parts.
    pub images: Vec<F>,
}

impl<F> NewsletterPayload<F> {
    /// Scalar form fields in the order they are appended.
    pub fn text_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("description", &self.description),
            ("url", &self.url),
            ("status", self.status.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(NewsletterId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission<F> {
    pub target: SubmitTarget,
    pub payload: NewsletterPayload<F>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// New newsletter saved; the editor is empty again.
    Created(Newsletter),
    /// Existing newsletter saved; the editor holds the server's copy.
    Updated(Newsletter),
    /// Save failed; everything typed is still there.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct NewsletterEditor<F> {
    phase: EditorPhase,
    mode: EditorMode,
    fields: DraftFields,
    attachments: AttachmentList<F>,
    requested_status: Option<NewsletterStatus>,
    baseline: String,
}

impl<F: StagedFile> Default for NewsletterEditor<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: StagedFile> NewsletterEditor<F> {
    pub fn new() -> Self {
        let mut editor = Self {
            phase: EditorPhase::Empty,
            mode: EditorMode::Create,
            fields: DraftFields::default(),
            attachments: AttachmentList::default(),
            requested_status: None,
            baseline: String::new(),
        };
        editor.baseline = editor.fingerprint();
        editor
    }

    /// Opens an existing newsletter for editing. Its stored images become
    /// existing attachments, tagged with their server ids.
    pub fn load(&mut self, newsletter: &Newsletter) {
        log::debug!("editor: loading newsletter {}", newsletter.id);
        self.phase = EditorPhase::Editing;
        self.mode = EditorMode::Edit(newsletter.id);
        self.fields = DraftFields {
            title: newsletter.title.clone(),
            subtitle: newsletter.subtitle.clone().unwrap_or_default(),
            body: newsletter.description.clone(),
            url: newsletter.url.clone().unwrap_or_default(),
        };
        self.attachments = AttachmentList::from_existing(&newsletter.images);
        self.requested_status = None;
        self.baseline = self.fingerprint();
    }

    /// Back to an empty create form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn fields(&self) -> &DraftFields {
        &self.fields
    }

    pub fn attachments(&self) -> &AttachmentList<F> {
        &self.attachments
    }

    /// Status of the save in flight, if any.
    pub fn requested_status(&self) -> Option<NewsletterStatus> {
        self.requested_status
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == EditorPhase::Submitting
    }

    /// Whether anything changed since the form was loaded or reset.
    pub fn is_dirty(&self) -> bool {
        self.fingerprint() != self.baseline
    }

    /// Updates one text field. Ignored while a save is in flight.
    pub fn set_field(&mut self, field: Field, value: String) -> bool {
        if self.is_submitting() {
            return false;
        }
        let slot = match field {
            Field::Title => &mut self.fields.title,
            Field::Subtitle => &mut self.fields.subtitle,
            Field::Body => &mut self.fields.body,
            Field::Url => &mut self.fields.url,
        };
        *slot = value;
        self.touch();
        true
    }

    /// Stages picked files. Files over the size limit or beyond the
    /// attachment limit are rejected one by one; the rest are kept.
    pub fn stage_files(
        &mut self,
        files: impl IntoIterator<Item = F>,
    ) -> Result<StagingReport, EditorError> {
        self.ensure_idle()?;
        let report = self.attachments.stage(files);
        if !report.accepted.is_empty() {
            self.touch();
        }
        Ok(report)
    }

    pub fn move_attachment(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.attachments.move_item(from, to)
    }

    /// First phase of removing an attachment. A [`Removal::Remote`] result
    /// means the caller must send the delete request and then call
    /// [`Self::confirm_attachment_delete`] or [`Self::restore_attachment`].
    pub fn remove_attachment(&mut self, index: usize) -> Result<Removal, EditorError> {
        self.ensure_idle()?;
        self.attachments.remove(index)
    }

    pub fn confirm_attachment_delete(&mut self, id: ImageId) -> bool {
        let dropped = self.attachments.confirm_delete(id);
        if dropped {
            self.forget_in_baseline(id);
        }
        dropped
    }

    pub fn restore_attachment(&mut self, id: ImageId) -> bool {
        let restored = self.attachments.restore(id);
        if restored {
            log::warn!("editor: restored image {} after failed delete", id);
        }
        restored
    }

    /// Validates the form and moves to `Submitting`. On a validation error
    /// the phase is unchanged and nothing is sent. Refused while an image
    /// delete is still in flight.
    pub fn submit(&mut self, status: NewsletterStatus) -> Result<Submission<F>, EditorError> {
        self.ensure_idle()?;
        if self.attachments.has_pending_delete() {
            return Err(EditorError::DeletePending);
        }
        let payload = self.build_payload(status)?;
        let target = match self.mode {
            EditorMode::Create => SubmitTarget::Create,
            EditorMode::Edit(id) => SubmitTarget::Update(id),
        };
        log::debug!("editor: submitting {:?} as {}", target, status);
        self.phase = EditorPhase::Submitting;
        self.requested_status = Some(status);
        Ok(Submission { target, payload })
    }

    /// Feeds the backend's answer to the submission back in.
    pub fn complete(
        &mut self,
        result: Result<Newsletter, ApiError>,
    ) -> Result<SubmitOutcome, EditorError> {
        if !self.is_submitting() {
            return Err(EditorError::NotSubmitting);
        }
        let outcome = match (result, self.mode) {
            (Ok(newsletter), EditorMode::Create) => {
                self.reset();
                SubmitOutcome::Created(newsletter)
            }
            (Ok(newsletter), EditorMode::Edit(_)) => {
                self.load(&newsletter);
                SubmitOutcome::Updated(newsletter)
            }
            (Err(err), _) => {
                log::warn!("editor: save failed: {}", err);
                self.phase = EditorPhase::Editing;
                self.requested_status = None;
                SubmitOutcome::Failed(err.user_message(SAVE_FALLBACK_MESSAGE))
            }
        };
        Ok(outcome)
    }

    fn build_payload(
        &self,
        status: NewsletterStatus,
    ) -> Result<NewsletterPayload<F>, ValidationError> {
        let title = self.fields.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        let description = description::render_html(&self.fields.body);
        if !description::has_content(&description) {
            return Err(ValidationError::MissingDescription);
        }
        let url = self.fields.url.trim();
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ValidationError::InvalidUrl(url.to_string()));
        }
        Ok(NewsletterPayload {
            title: title.to_string(),
            subtitle: self.fields.subtitle.trim().to_string(),
            description,
            url: url.to_string(),
            status,
            images: self.attachments.uploads(),
        })
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        if self.is_submitting() {
            Err(EditorError::Busy)
        } else {
            Ok(())
        }
    }

    fn touch(&mut self) {
        if self.phase == EditorPhase::Empty {
            self.phase = EditorPhase::Editing;
        }
    }

    /// The backend already dropped image `id`, so the saved state no longer
    /// contains it either.
    fn forget_in_baseline(&mut self, id: ImageId) {
        let (attachments, fields) = self.baseline.split_once('|').unwrap_or(("", ""));
        let gone = format!("e{}", id);
        let kept: Vec<&str> = attachments
            .split(',')
            .filter(|part| !part.is_empty() && *part != gone)
            .collect();
        self.baseline = format!("{}|{}", kept.join(","), fields);
    }

    fn fingerprint(&self) -> String {
        let fields = &self.fields;
        let fields_digest = md5::compute(format!(
            "{}\u{1f}{}\u{1f}{}\u{1f}{}",
            fields.title, fields.subtitle, fields.body, fields.url
        ));
        format!("{}|{:x}", self.attachments.fingerprint(), fields_digest)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::newsletter::NewsletterImage;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile(&'static str);

    impl StagedFile for FakeFile {
        fn file_name(&self) -> String {
            self.0.to_string()
        }

        fn byte_len(&self) -> u64 {
            1024
        }
    }

    fn stored(id: u64, status: NewsletterStatus, images: &[u64]) -> Newsletter {
        Newsletter {
            id,
            title: "Alumni Meetup".into(),
            subtitle: Some("June edition".into()),
            description: "<p>See you there</p>".into(),
            url: None,
            status,
            images: images
                .iter()
                .map(|id| NewsletterImage {
                    id: *id,
                    image: format!("/media/{}.jpg", id),
                })
                .collect(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn typing_leaves_empty_state() {
        let mut editor = NewsletterEditor::<FakeFile>::new();
        assert_eq!(editor.phase(), EditorPhase::Empty);
        editor.set_field(Field::Title, "Hello".into());
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert!(editor.is_dirty());
    }

    #[test]
    fn missing_description_is_reported_after_title() {
        let mut editor = NewsletterEditor::<FakeFile>::new();
        assert_eq!(
            editor.submit(NewsletterStatus::Draft),
            Err(EditorError::Invalid(ValidationError::MissingTitle))
        );
        editor.set_field(Field::Title, "Hello".into());
        editor.set_field(Field::Body, "<p></p>".into());
        assert_eq!(
            editor.submit(NewsletterStatus::Draft),
            Err(EditorError::Invalid(ValidationError::MissingDescription))
        );
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let mut editor = NewsletterEditor::<FakeFile>::new();
        editor.set_field(Field::Title, "Hello".into());
        editor.set_field(Field::Body, "Body".into());
        editor.set_field(Field::Url, "alumni.example.edu".into());
        let err = editor.submit(NewsletterStatus::Published).unwrap_err();
        assert_eq!(
            err,
            EditorError::Invalid(ValidationError::InvalidUrl("alumni.example.edu".into()))
        );
    }

    #[test]
    fn edits_are_ignored_while_submitting() {
        let mut editor = NewsletterEditor::<FakeFile>::new();
        editor.set_field(Field::Title, "Hello".into());
        editor.set_field(Field::Body, "Body".into());
        editor.submit(NewsletterStatus::Draft).unwrap();

        assert!(!editor.set_field(Field::Title, "Changed".into()));
        assert_eq!(editor.submit(NewsletterStatus::Draft), Err(EditorError::Busy));
        assert_eq!(editor.fields().title, "Hello");
    }

    #[test]
    fn failure_returns_to_editing_with_input_preserved() {
        let mut editor = NewsletterEditor::new();
        editor.set_field(Field::Title, "Hello".into());
        editor.set_field(Field::Body, "Body".into());
        editor.stage_files(vec![FakeFile("a.png")]).unwrap();
        editor.submit(NewsletterStatus::Published).unwrap();

        let outcome = editor
            .complete(Err(ApiError::Status {
                status: 500,
                message: None,
            }))
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Failed(SAVE_FALLBACK_MESSAGE.into()));
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.fields().title, "Hello");
        assert_eq!(editor.attachments().uploads(), vec![FakeFile("a.png")]);
    }

    #[test]
    fn editing_loads_existing_images_and_updates() {
        let mut editor = NewsletterEditor::<FakeFile>::new();
        editor.load(&stored(9, NewsletterStatus::Published, &[3, 4]));
        assert!(!editor.is_dirty());
        assert_eq!(editor.mode(), EditorMode::Edit(9));
        assert!(editor.attachments().iter().all(|a| !a.is_staged()));

        let submission = editor.submit(NewsletterStatus::Published).unwrap();
        assert_eq!(submission.target, SubmitTarget::Update(9));
        assert!(submission.payload.images.is_empty());
        assert_eq!(submission.payload.subtitle, "June edition");

        let saved = stored(9, NewsletterStatus::Published, &[3, 4]);
        let outcome = editor.complete(Ok(saved.clone())).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated(saved));
        assert_eq!(editor.phase(), EditorPhase::Editing);
    }

    #[test]
    fn confirmed_image_delete_is_not_a_pending_change() {
        let mut editor = NewsletterEditor::<FakeFile>::new();
        editor.load(&stored(9, NewsletterStatus::Draft, &[3, 4]));
        assert_eq!(editor.remove_attachment(0), Ok(Removal::Remote(3)));
        assert!(editor.confirm_attachment_delete(3));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn complete_without_submission_is_an_error() {
        let mut editor = NewsletterEditor::<FakeFile>::new();
        assert_eq!(
            editor.complete(Err(ApiError::Transport("x".into()))),
            Err(EditorError::NotSubmitting)
        );
    }
}

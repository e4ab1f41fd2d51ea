mod support;

use common::editor::{
    AttachmentSource, EditorMode, EditorPhase, Field, NewsletterEditor, Removal, SubmitOutcome,
};
use common::error::{ApiError, EditorError, StagingRejection, ValidationError};
use common::model::newsletter::NewsletterStatus;
use common::newsletters::NewsletterDesk;
use common::store::RefreshOutcome;
use common::sync::{self, NewsletterApi};
use futures::executor::block_on;

use support::{Call, RecordingApi, TestFile, stored_newsletter};

/// Validates, sends and completes one save the way the newsletter screen
/// does.
fn save(
    editor: &mut NewsletterEditor<TestFile>,
    api: &RecordingApi,
    status: NewsletterStatus,
) -> Result<SubmitOutcome, EditorError> {
    let submission = editor.submit(status)?;
    let result = block_on(sync::send(api, submission));
    editor.complete(result)
}

/// Both phases of removing the attachment at `index`.
fn remove(editor: &mut NewsletterEditor<TestFile>, api: &RecordingApi, index: usize) {
    let EditorMode::Edit(newsletter_id) = editor.mode() else {
        panic!("remote removal needs an edit session");
    };
    if let Removal::Remote(image_id) = editor.remove_attachment(index).unwrap() {
        match block_on(api.delete_attachment(newsletter_id, image_id)) {
            Ok(()) => assert!(editor.confirm_attachment_delete(image_id)),
            Err(_) => assert!(editor.restore_attachment(image_id)),
        }
    }
}

#[test]
fn empty_title_never_reaches_the_backend() {
    let api = RecordingApi::default();
    let mut editor = NewsletterEditor::new();
    editor.set_field(Field::Body, "<p>Body only</p>".into());

    let err = save(&mut editor, &api, NewsletterStatus::Draft).unwrap_err();

    assert_eq!(err, EditorError::Invalid(ValidationError::MissingTitle));
    assert_eq!(err.to_string(), "Title is required");
    assert!(api.calls().is_empty());
    assert_eq!(editor.phase(), EditorPhase::Editing);
}

#[test]
fn whitespace_title_is_missing() {
    let api = RecordingApi::default();
    let mut editor = NewsletterEditor::new();
    editor.set_field(Field::Title, "   ".into());
    editor.set_field(Field::Body, "Body".into());
    assert_eq!(
        save(&mut editor, &api, NewsletterStatus::Published),
        Err(EditorError::Invalid(ValidationError::MissingTitle))
    );
    assert!(api.calls().is_empty());
}

#[test]
fn staging_beyond_five_rejects_the_overflow() {
    let mut editor = NewsletterEditor::new();
    editor.load(&stored_newsletter(3, NewsletterStatus::Draft, &[1, 2, 3]));

    let report = editor
        .stage_files(vec![
            TestFile::new("a.png"),
            TestFile::new("b.png"),
            TestFile::new("c.png"),
            TestFile::new("d.png"),
        ])
        .unwrap();

    assert_eq!(report.accepted.len(), 2);
    assert_eq!(
        report.rejected,
        vec![
            StagingRejection::TooMany {
                file_name: "c.png".into()
            },
            StagingRejection::TooMany {
                file_name: "d.png".into()
            },
        ]
    );
    assert!(report.rejected[0].to_string().contains("c.png"));
    assert_eq!(editor.attachments().len(), 5);
}

#[test]
fn oversized_file_message_names_the_file() {
    let mut editor = NewsletterEditor::new();
    let report = editor
        .stage_files(vec![TestFile::sized("poster.png", 6 * 1024 * 1024)])
        .unwrap();
    assert!(report.accepted.is_empty());
    assert!(report.rejected[0].to_string().starts_with("poster.png"));
}

#[test]
fn reorder_and_remove_upload_only_staged_in_order() {
    let api = RecordingApi::default();
    let mut editor = NewsletterEditor::new();
    editor.load(&stored_newsletter(12, NewsletterStatus::Draft, &[7]));
    // [B(7)] -> [A, B(7), C]
    editor.stage_files(vec![TestFile::new("A.png")]).unwrap();
    editor.move_attachment(1, 0).unwrap();
    editor.stage_files(vec![TestFile::new("C.png")]).unwrap();

    editor.move_attachment(2, 0).unwrap();
    remove(&mut editor, &api, 2);

    let submission = editor.submit(NewsletterStatus::Draft).unwrap();
    let names: Vec<_> = submission
        .payload
        .images
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["C.png", "A.png"]);

    let deletes: Vec<_> = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::DeleteAttachment(..)))
        .collect();
    assert_eq!(deletes, vec![Call::DeleteAttachment(12, 7)]);
}

#[test]
fn failed_attachment_delete_restores_in_place() {
    let api = RecordingApi::default();
    let mut editor = NewsletterEditor::<TestFile>::new();
    editor.load(&stored_newsletter(4, NewsletterStatus::Published, &[20, 21, 22]));

    api.fail_next(ApiError::Status {
        status: 500,
        message: None,
    });
    remove(&mut editor, &api, 1);

    let order: Vec<_> = editor
        .attachments()
        .iter()
        .map(|a| match &a.source {
            AttachmentSource::Existing { id, .. } => *id,
            AttachmentSource::Staged { .. } => unreachable!(),
        })
        .collect();
    assert_eq!(order, vec![20, 21, 22]);
    assert!(editor.attachments().iter().all(|a| !a.pending_delete));
    assert!(!editor.is_dirty());
}

#[test]
fn pending_delete_still_counts_toward_the_limit() {
    let mut editor = NewsletterEditor::new();
    editor.load(&stored_newsletter(4, NewsletterStatus::Draft, &[1, 2, 3, 4, 5]));
    assert_eq!(editor.remove_attachment(0), Ok(Removal::Remote(1)));

    let report = editor.stage_files(vec![TestFile::new("late.png")]).unwrap();
    assert!(report.accepted.is_empty());
    assert_eq!(editor.remove_attachment(0), Err(EditorError::AlreadyPendingDelete(1)));
}

#[test]
fn save_waits_for_pending_image_delete() {
    let api = RecordingApi::default();
    let mut editor = NewsletterEditor::<TestFile>::new();
    editor.load(&stored_newsletter(6, NewsletterStatus::Draft, &[7]));
    assert_eq!(editor.remove_attachment(0), Ok(Removal::Remote(7)));

    assert_eq!(
        editor.submit(NewsletterStatus::Published),
        Err(EditorError::DeletePending)
    );
    assert_eq!(editor.phase(), EditorPhase::Editing);
    assert!(api.calls().is_empty());

    block_on(api.delete_attachment(6, 7)).unwrap();
    assert!(editor.confirm_attachment_delete(7));
    assert_eq!(editor.attachments().len(), 0);
    assert!(save(&mut editor, &api, NewsletterStatus::Published).is_ok());
}

#[test]
fn delete_confirmed_after_reload_still_drops_the_image() {
    let mut editor = NewsletterEditor::<TestFile>::new();
    editor.load(&stored_newsletter(6, NewsletterStatus::Draft, &[7, 8]));
    assert_eq!(editor.remove_attachment(0), Ok(Removal::Remote(7)));

    editor.load(&stored_newsletter(6, NewsletterStatus::Draft, &[7, 8]));
    assert!(editor.confirm_attachment_delete(7));

    let ids: Vec<_> = editor
        .attachments()
        .iter()
        .filter_map(|a| a.server_id())
        .collect();
    assert_eq!(ids, vec![8]);
}

#[test]
fn create_sends_fields_and_resets() {
    let api = RecordingApi::default();
    let mut editor = NewsletterEditor::new();
    editor.set_field(Field::Title, "Spring Update".into());
    editor.set_field(Field::Body, "<p>hi</p>".into());

    let outcome = save(&mut editor, &api, NewsletterStatus::Draft).unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    let Call::Create(payload) = &calls[0] else {
        panic!("expected a create call, got {:?}", calls[0]);
    };
    assert_eq!(payload.title, "Spring Update");
    assert_eq!(payload.description, "<p>hi</p>");
    assert_eq!(payload.status, NewsletterStatus::Draft);
    assert!(payload.images.is_empty());
    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    assert_eq!(editor.phase(), EditorPhase::Empty);
    assert_eq!(editor.fields().title, "");
}

#[test]
fn publishing_an_edit_sends_an_update() {
    let api = RecordingApi::default();
    let mut editor = NewsletterEditor::new();
    editor.load(&stored_newsletter(8, NewsletterStatus::Draft, &[]));
    editor.set_field(Field::Subtitle, "Class of 2015".into());

    let outcome = save(&mut editor, &api, NewsletterStatus::Published).unwrap();

    assert!(matches!(&api.calls()[0], Call::Update(8, p) if p.status == NewsletterStatus::Published));
    assert!(matches!(outcome, SubmitOutcome::Updated(ref n) if n.subtitle.as_deref() == Some("Class of 2015")));
    assert_eq!(editor.mode(), EditorMode::Edit(8));
    assert!(!editor.is_dirty());
}

#[test]
fn server_message_is_surfaced_on_failure() {
    let api = RecordingApi::default();
    api.fail_next(ApiError::Status {
        status: 400,
        message: Some("Title already used".into()),
    });
    let mut editor = NewsletterEditor::new();
    editor.set_field(Field::Title, "Spring Update".into());
    editor.set_field(Field::Body, "hi".into());

    let outcome = save(&mut editor, &api, NewsletterStatus::Draft).unwrap();

    assert_eq!(outcome, SubmitOutcome::Failed("Title already used".into()));
    assert_eq!(editor.phase(), EditorPhase::Editing);
    assert_eq!(editor.fields().title, "Spring Update");
}

#[test]
fn refresh_after_save_lands_in_the_desk() {
    let api = RecordingApi::default();
    *api.listing.borrow_mut() = vec![
        stored_newsletter(1, NewsletterStatus::Published, &[]),
        stored_newsletter(2, NewsletterStatus::Draft, &[]),
    ];
    let mut desk = NewsletterDesk::<TestFile>::new();

    let first = desk.begin_refresh();
    let second = desk.begin_refresh();
    let late = block_on(api.list());
    assert_eq!(desk.finish_refresh(second, late), Ok(RefreshOutcome::Applied));
    assert_eq!(desk.finish_refresh(first, Ok(Vec::new())), Ok(RefreshOutcome::Stale));
    assert_eq!(desk.records().len(), 2);
    assert_eq!(desk.draft_count(), 1);
}

//! State of the newsletter screen: the list of stored newsletters, the
//! read-only modal and the editor above the list.

use crate::detail::{DetailController, DetailMode};
use crate::editor::{EditorMode, NewsletterEditor, StagedFile};
use crate::error::ApiError;
use crate::limits::LOAD_FALLBACK_MESSAGE;
use crate::model::newsletter::{Newsletter, NewsletterId};
use crate::store::{RecordStore, RefreshOutcome, RefreshTicket};

#[derive(Debug, Clone)]
pub struct NewsletterDesk<F> {
    store: RecordStore<Newsletter>,
    detail: DetailController<NewsletterId>,
    pub editor: NewsletterEditor<F>,
}

impl<F: StagedFile> Default for NewsletterDesk<F> {
    fn default() -> Self {
        Self {
            store: RecordStore::new(),
            detail: DetailController::new(),
            editor: NewsletterEditor::new(),
        }
    }
}

impl<F: StagedFile> NewsletterDesk<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Newsletter] {
        self.store.records()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.store.begin_refresh()
    }

    /// Hands a list response to the store. On failure the current list is
    /// kept and the message to show is returned.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Newsletter>, ApiError>,
    ) -> Result<RefreshOutcome, String> {
        match result {
            Ok(records) => {
                let outcome = self.store.apply_refresh(ticket, records);
                if outcome == RefreshOutcome::Applied {
                    self.drop_vanished();
                }
                Ok(outcome)
            }
            Err(err) => {
                log::warn!("newsletters: refresh failed: {}", err);
                self.store.fail_refresh(ticket);
                Err(err.user_message(LOAD_FALLBACK_MESSAGE))
            }
        }
    }

    /// Card click. Drafts go straight into the editor, published
    /// newsletters open the read-only modal.
    pub fn open(&mut self, id: NewsletterId) -> Option<DetailMode> {
        let record = self.store.get(&id)?;
        let mode = self.detail.open(record);
        if mode == DetailMode::Edit {
            self.editor.load(record);
            self.detail.close();
        }
        Some(mode)
    }

    /// "Edit" from the read-only modal of a published newsletter.
    pub fn edit(&mut self, id: NewsletterId) -> bool {
        match self.store.get(&id) {
            Some(record) => {
                self.editor.load(record);
                self.detail.close();
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.detail.close();
    }

    /// Newsletter shown in the read-only modal.
    pub fn opened(&self) -> Option<&Newsletter> {
        self.detail.selected().and_then(|id| self.store.get(id))
    }

    /// Leaves any edit session for an empty create form.
    pub fn start_new(&mut self) {
        self.editor.reset();
    }

    /// The backend deleted `id`. The modal closes if it showed it and an
    /// edit session for it is abandoned.
    pub fn deleted(&mut self, id: NewsletterId) {
        self.detail.forget(&id);
        if self.editor.mode() == EditorMode::Edit(id) && !self.editor.is_submitting() {
            self.editor.reset();
        }
    }

    pub fn deleted_all(&mut self) {
        self.detail.close();
        if matches!(self.editor.mode(), EditorMode::Edit(_)) && !self.editor.is_submitting() {
            self.editor.reset();
        }
    }

    pub fn draft_count(&self) -> usize {
        self.store.records().iter().filter(|n| n.is_draft()).count()
    }

    fn drop_vanished(&mut self) {
        if let Some(id) = self.detail.selected().copied() {
            if !self.store.contains(&id) {
                self.detail.close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::editor::EditorPhase;
    use crate::model::newsletter::NewsletterStatus;

    #[derive(Debug, Clone)]
    struct NoFile;

    impl StagedFile for NoFile {
        fn file_name(&self) -> String {
            String::new()
        }

        fn byte_len(&self) -> u64 {
            0
        }
    }

    fn newsletter(id: u64, status: NewsletterStatus) -> Newsletter {
        Newsletter {
            id,
            title: format!("Issue {}", id),
            subtitle: None,
            description: "<p>News</p>".into(),
            url: None,
            status,
            images: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2025, 3, id as u32, 9, 0, 0).unwrap(),
        }
    }

    fn loaded() -> NewsletterDesk<NoFile> {
        let mut desk = NewsletterDesk::new();
        let ticket = desk.begin_refresh();
        desk.finish_refresh(
            ticket,
            Ok(vec![
                newsletter(1, NewsletterStatus::Draft),
                newsletter(2, NewsletterStatus::Published),
            ]),
        )
        .unwrap();
        desk
    }

    #[test]
    fn draft_opens_in_editor() {
        let mut desk = loaded();
        assert_eq!(desk.open(1), Some(DetailMode::Edit));
        assert_eq!(desk.editor.mode(), EditorMode::Edit(1));
        assert!(desk.opened().is_none());
    }

    #[test]
    fn published_opens_read_only_until_edit() {
        let mut desk = loaded();
        assert_eq!(desk.open(2), Some(DetailMode::View));
        assert_eq!(desk.opened().map(|n| n.id), Some(2));
        assert_eq!(desk.editor.phase(), EditorPhase::Empty);

        assert!(desk.edit(2));
        assert_eq!(desk.editor.mode(), EditorMode::Edit(2));
        assert!(desk.opened().is_none());
    }

    #[test]
    fn failed_refresh_keeps_list_and_reports() {
        let mut desk = loaded();
        let ticket = desk.begin_refresh();
        let err = desk
            .finish_refresh(ticket, Err(ApiError::Transport("offline".into())))
            .unwrap_err();
        assert_eq!(err, LOAD_FALLBACK_MESSAGE);
        assert_eq!(desk.records().len(), 2);
        assert!(!desk.is_loading());
    }

    #[test]
    fn refresh_without_opened_record_closes_modal() {
        let mut desk = loaded();
        desk.open(2);
        let ticket = desk.begin_refresh();
        desk.finish_refresh(ticket, Ok(vec![newsletter(1, NewsletterStatus::Draft)]))
            .unwrap();
        assert!(desk.opened().is_none());
        assert_eq!(desk.draft_count(), 1);
    }

    #[test]
    fn deleting_the_edited_newsletter_resets_editor() {
        let mut desk = loaded();
        desk.open(1);
        desk.deleted(1);
        assert_eq!(desk.editor.mode(), EditorMode::Create);
        assert_eq!(desk.editor.phase(), EditorPhase::Empty);
    }
}

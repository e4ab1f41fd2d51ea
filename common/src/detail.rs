//! Single-record focus state: the modal or editor a screen has open.

use crate::model::Record;
use crate::model::newsletter::Newsletter;

/// How a record is shown when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    /// Read-only modal.
    View,
    /// Routed into the editor instead of a modal.
    Edit,
}

/// Decides where opening a record leads. Most records only have a
/// read-only view.
pub trait DetailRouting {
    fn detail_mode(&self) -> DetailMode {
        DetailMode::View
    }
}

impl DetailRouting for Newsletter {
    /// Drafts open in the editor; published newsletters open read only.
    fn detail_mode(&self) -> DetailMode {
        if self.is_draft() {
            DetailMode::Edit
        } else {
            DetailMode::View
        }
    }
}

impl DetailRouting for crate::model::feedback::FeedbackRecord {}
impl DetailRouting for crate::model::student::StudentRecord {}
impl DetailRouting for crate::model::story::SuccessStory {}

/// Holds at most one opened record id. Closing never touches the store.
#[derive(Debug, Clone)]
pub struct DetailController<Id> {
    current: Option<(Id, DetailMode)>,
}

impl<Id> Default for DetailController<Id> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<Id: Clone + PartialEq> DetailController<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `record` in the mode its routing asks for, replacing whatever
    /// was open before.
    pub fn open<R>(&mut self, record: &R) -> DetailMode
    where
        R: Record<Id = Id> + DetailRouting,
    {
        let mode = record.detail_mode();
        self.current = Some((record.id(), mode));
        mode
    }

    /// Opens `id` in an explicit mode, e.g. "Edit" on a published record.
    pub fn open_as(&mut self, id: Id, mode: DetailMode) {
        self.current = Some((id, mode));
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn selected(&self) -> Option<&Id> {
        self.current.as_ref().map(|(id, _)| id)
    }

    pub fn mode(&self) -> Option<DetailMode> {
        self.current.as_ref().map(|(_, mode)| *mode)
    }

    pub fn is_open(&self, id: &Id) -> bool {
        self.selected() == Some(id)
    }

    /// Closes the view if it shows `id`, which has just been deleted.
    pub fn forget(&mut self, id: &Id) {
        if self.is_open(id) {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::newsletter::NewsletterStatus;

    fn newsletter(id: u64, status: NewsletterStatus) -> Newsletter {
        Newsletter {
            id,
            title: format!("Issue {}", id),
            subtitle: None,
            description: "<p>body</p>".into(),
            url: None,
            status,
            images: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn draft_routes_to_editor_and_published_to_modal() {
        let mut detail = DetailController::new();
        assert_eq!(detail.open(&newsletter(1, NewsletterStatus::Draft)), DetailMode::Edit);
        assert_eq!(
            detail.open(&newsletter(2, NewsletterStatus::Published)),
            DetailMode::View
        );
        assert_eq!(detail.selected(), Some(&2));
    }

    #[test]
    fn forget_only_closes_matching_record() {
        let mut detail = DetailController::new();
        detail.open_as(5u64, DetailMode::View);
        detail.forget(&4);
        assert!(detail.is_open(&5));
        detail.forget(&5);
        assert_eq!(detail.selected(), None);
    }
}

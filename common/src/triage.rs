//! State of the feedback triage screen.
//!
//! Feedback has no live backend; every action mutates the screen's own
//! store. The board ties together the store, the current query, the bulk
//! selection and the detail modal so their interactions (deleting the open
//! record, bulk actions over hidden records) live in one place.

use crate::detail::DetailController;
use crate::model::feedback::{FeedbackId, FeedbackRecord};
use crate::pipeline::FeedbackQuery;
use crate::selection::Selection;
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    MarkRead,
    Delete,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackBoard {
    store: RecordStore<FeedbackRecord>,
    pub query: FeedbackQuery,
    selection: Selection<FeedbackId>,
    detail: DetailController<FeedbackId>,
}

impl FeedbackBoard {
    pub fn new(records: Vec<FeedbackRecord>) -> Self {
        Self {
            store: RecordStore::from_records(records),
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        self.store.records()
    }

    /// Records passing the current query, in display order.
    pub fn visible(&self) -> Vec<&FeedbackRecord> {
        self.query.apply(self.store.records())
    }

    pub fn unread_count(&self) -> usize {
        self.store.records().iter().filter(|r| !r.is_read).count()
    }

    pub fn toggle_read(&mut self, id: FeedbackId) -> bool {
        self.store.update(&id, |r| r.is_read = !r.is_read)
    }

    pub fn toggle_flag(&mut self, id: FeedbackId) -> bool {
        self.store.update(&id, |r| r.is_flagged = !r.is_flagged)
    }

    /// Deletes one record. It also leaves the selection, and the detail
    /// modal closes if it was showing it.
    pub fn delete(&mut self, id: FeedbackId) -> Option<FeedbackRecord> {
        let removed = self.store.remove(&id)?;
        self.selection.forget(&id);
        self.detail.forget(&id);
        log::debug!("triage: deleted feedback {}", id);
        Some(removed)
    }

    pub fn selection(&self) -> &Selection<FeedbackId> {
        &self.selection
    }

    pub fn toggle_select(&mut self, id: FeedbackId) -> bool {
        self.selection.toggle(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Applies `action` to the selected records that still exist and clears
    /// the selection. Returns how many records were affected.
    pub fn bulk(&mut self, action: BulkAction) -> usize {
        match action {
            BulkAction::MarkRead => self
                .selection
                .bulk_apply(&mut self.store, |r| r.is_read = true)
                .len(),
            BulkAction::Delete => {
                let removed = self.selection.bulk_remove(&mut self.store);
                for record in &removed {
                    self.detail.forget(&record.id);
                }
                removed.len()
            }
        }
    }

    pub fn open(&mut self, id: FeedbackId) -> bool {
        match self.store.get(&id) {
            Some(record) => {
                self.detail.open(record);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.detail.close();
    }

    /// The record shown in the detail modal, if any.
    pub fn opened(&self) -> Option<&FeedbackRecord> {
        self.detail.selected().and_then(|id| self.store.get(id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::feedback::{FeedbackCategory, Rating};
    use crate::pipeline::RatingFilter;

    fn board() -> FeedbackBoard {
        let records = [5u8, 3, 2]
            .into_iter()
            .enumerate()
            .map(|(i, rating)| FeedbackRecord {
                id: i as u64 + 1,
                user: format!("User {}", i + 1),
                email: format!("user{}@example.com", i + 1),
                category: FeedbackCategory::Mentorship,
                rating: Rating::new(rating).unwrap(),
                comment: String::new(),
                date: NaiveDate::from_ymd_opt(2025, 5, 20 - i as u32).unwrap(),
                is_read: false,
                is_flagged: false,
            })
            .collect();
        FeedbackBoard::new(records)
    }

    #[test]
    fn deleting_open_record_closes_modal_and_selection() {
        let mut board = board();
        board.toggle_select(2);
        assert!(board.open(2));

        board.delete(2);

        assert!(board.opened().is_none());
        assert!(board.selection().is_empty());
    }

    #[test]
    fn bulk_read_reaches_records_hidden_by_filter() {
        let mut board = board();
        board.toggle_select(1);
        board.query.rating = RatingFilter::from_option("2");
        assert_eq!(board.visible().len(), 1);

        assert_eq!(board.bulk(BulkAction::MarkRead), 1);

        assert!(board.records().iter().find(|r| r.id == 1).unwrap().is_read);
        assert_eq!(board.unread_count(), 2);
        assert!(board.selection().is_empty());
    }

    #[test]
    fn bulk_delete_closes_modal_of_deleted_record() {
        let mut board = board();
        board.toggle_select(1);
        board.toggle_select(3);
        board.open(3);

        assert_eq!(board.bulk(BulkAction::Delete), 2);

        assert_eq!(board.records().len(), 1);
        assert!(board.opened().is_none());
    }

    #[test]
    fn toggles_flip_flags_in_place() {
        let mut board = board();
        assert!(board.toggle_flag(1));
        assert!(board.toggle_read(1));
        assert!(!board.toggle_read(99));
        let first = &board.records()[0];
        assert!(first.is_flagged && first.is_read);
    }
}

//! State of the success-stories screen: a fenced list, a search box and a
//! read-only modal.

use crate::detail::DetailController;
use crate::error::ApiError;
use crate::model::story::{StoryId, SuccessStory};
use crate::store::{RecordStore, RefreshOutcome, RefreshTicket};

pub const STORIES_FALLBACK_MESSAGE: &str = "Failed to load success stories";

#[derive(Debug, Clone, Default)]
pub struct StoryBoard {
    store: RecordStore<SuccessStory>,
    detail: DetailController<StoryId>,
    pub search: String,
}

impl StoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.store.begin_refresh()
    }

    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<SuccessStory>, ApiError>,
    ) -> Result<RefreshOutcome, String> {
        match result {
            Ok(stories) => {
                let outcome = self.store.apply_refresh(ticket, stories);
                if outcome == RefreshOutcome::Applied {
                    if let Some(id) = self.detail.selected().copied() {
                        if !self.store.contains(&id) {
                            self.detail.close();
                        }
                    }
                }
                Ok(outcome)
            }
            Err(err) => {
                log::warn!("stories: refresh failed: {}", err);
                self.store.fail_refresh(ticket);
                Err(err.user_message(STORIES_FALLBACK_MESSAGE))
            }
        }
    }

    /// Stories whose name, title or text contain the search, case
    /// insensitive, in backend order.
    pub fn visible(&self) -> Vec<&SuccessStory> {
        let needle = self.search.to_lowercase();
        self.store
            .records()
            .iter()
            .filter(|story| {
                needle.is_empty()
                    || story.name.to_lowercase().contains(&needle)
                    || story.story.to_lowercase().contains(&needle)
                    || story
                        .title
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn open(&mut self, id: StoryId) -> bool {
        match self.store.get(&id) {
            Some(story) => {
                self.detail.open(story);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.detail.close();
    }

    pub fn opened(&self) -> Option<&SuccessStory> {
        self.detail.selected().and_then(|id| self.store.get(id))
    }

    /// The backend confirmed the delete. The record leaves the list right
    /// away; the follow-up refresh reconciles the rest.
    pub fn deleted(&mut self, id: StoryId) {
        self.detail.forget(&id);
        self.store.remove(&id);
    }
}

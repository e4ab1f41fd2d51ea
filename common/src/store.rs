//! Per-screen record store and list-refresh fencing.
//!
//! A screen never patches its list after a mutation; it asks the backend for
//! the whole list again. Refreshes can overlap (a manual refresh racing the
//! automatic one after a save), so each refresh takes a [`RefreshTicket`] and
//! its response is applied only if no newer response was applied before it.

use crate::model::Record;

/// Ordering token for one list refresh. Tickets only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Default, Clone)]
pub struct RefreshFence {
    issued: u64,
    applied: u64,
}

impl RefreshFence {
    pub fn issue(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Records `ticket` as applied if it is newer than anything applied so
    /// far. Returns `false` for a stale response, which must be dropped.
    pub fn admit(&mut self, ticket: RefreshTicket) -> bool {
        if ticket.0 > self.applied {
            self.applied = ticket.0;
            true
        } else {
            false
        }
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.issued
    }
}

/// What happened to a refresh response handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer response already landed; this one was discarded.
    Stale,
}

/// Ordered, in-memory collection of the records one screen shows.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
    fence: RefreshFence,
    loading: bool,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            fence: RefreshFence::default(),
            loading: false,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<R>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|r| &r.id() == id)
    }

    pub fn contains(&self, id: &R::Id) -> bool {
        self.get(id).is_some()
    }

    /// Applies `f` to the record with `id` in place. Returns `false` if no
    /// such record exists.
    pub fn update(&mut self, id: &R::Id, f: impl FnOnce(&mut R)) -> bool {
        match self.records.iter_mut().find(|r| &r.id() == id) {
            Some(record) => {
                f(record);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &R::Id) -> Option<R> {
        let index = self.records.iter().position(|r| &r.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Starts a refresh and marks the store as loading.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.loading = true;
        self.fence.issue()
    }

    /// Replaces the whole list with a refresh response, unless a newer
    /// response was already applied.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, records: Vec<R>) -> RefreshOutcome {
        if self.fence.is_latest(ticket) {
            self.loading = false;
        }
        if self.fence.admit(ticket) {
            self.records = records;
            RefreshOutcome::Applied
        } else {
            log::debug!("store: dropping stale refresh {:?}", ticket);
            RefreshOutcome::Stale
        }
    }

    /// A refresh failed; the current list stays as it is.
    pub fn fail_refresh(&mut self, ticket: RefreshTicket) {
        if self.fence.is_latest(ticket) {
            self.loading = false;
        }
    }
}

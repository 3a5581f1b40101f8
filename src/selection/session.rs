use crate::advisory::AdvisoryCache;
use crate::models::{ListingRecord, RecordId};
use crate::selection::{MissPolicy, SelectionBinder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unselected,
    Selected(RecordId),
}

/// Result of feeding one click to a [`Session`].
#[derive(Debug, PartialEq)]
pub enum ClickOutcome<'a> {
    /// The payload resolved to this listing, which is now selected.
    Selected(&'a ListingRecord),
    /// Nothing matched; the previous selection is still shown.
    Kept(&'a ListingRecord),
    /// Nothing is selected; the caller shows a placeholder.
    Unselected,
}

/// State for one user session: the current selection, the no-match
/// policy, and the advisory texts already fetched.
pub struct Session {
    state: SelectionState,
    on_miss: MissPolicy,
    pub advisories: AdvisoryCache,
}

impl Session {
    pub fn new(on_miss: MissPolicy) -> Self {
        Self {
            state: SelectionState::Unselected,
            on_miss,
            advisories: AdvisoryCache::default(),
        }
    }

    /// Apply a click payload.
    ///
    /// Unselected → Selected(r) on a hit; Selected(a) → Selected(b) on a hit;
    /// a miss keeps or clears the selection according to the [`MissPolicy`].
    pub fn click<'a>(&mut self, binder: &SelectionBinder<'a>, payload: &str) -> ClickOutcome<'a> {
        if let Some(record) = binder.resolve(payload) {
            self.state = SelectionState::Selected(record.id);
            return ClickOutcome::Selected(record);
        }

        tracing::debug!(payload, policy = ?self.on_miss, "click did not resolve");
        if self.on_miss == MissPolicy::Clear {
            self.state = SelectionState::Unselected;
        }

        match self.current(binder) {
            Some(record) => ClickOutcome::Kept(record),
            None => ClickOutcome::Unselected,
        }
    }

    pub fn current<'a>(&self, binder: &SelectionBinder<'a>) -> Option<&'a ListingRecord> {
        match self.state {
            SelectionState::Selected(id) => binder.get(id),
            SelectionState::Unselected => None,
        }
    }
}

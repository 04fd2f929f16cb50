//! Application state store.
//!
//! One `QueryState` per session, published through a `watch` channel so any
//! number of readers see every committed change. Writes are split in two
//! groups: `query`/`active_tab` follow user actions, `loading`/`results`/
//! `error` follow fetch lifecycle. Both groups are applied by the controller
//! actor only, which serializes them.

use snapscout_search::{MediaItem, MediaKind, SearchError};
use tokio::sync::watch;

/// Snapshot of the search session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    /// Current search text; empty until the first non-empty submit
    pub query: String,
    pub active_tab: MediaKind,
    /// Output of the most recent successful fetch, in provider ranking order
    pub results: Vec<MediaItem>,
    pub loading: bool,
    /// Error of the most recent failed fetch; cleared when a new fetch starts
    pub error: Option<SearchError>,
}

/// Coarse lifecycle phase, computed from the stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing searched yet (or cleared)
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl QueryState {
    /// Creates an idle state on `tab`.
    pub fn new(tab: MediaKind) -> Self {
        Self {
            active_tab: tab,
            ..Self::default()
        }
    }

    /// Lifecycle phase the fields currently describe.
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Pending
        } else if self.error.is_some() {
            SessionPhase::Failed
        } else if self.query.is_empty() && self.results.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::Succeeded
        }
    }
}

/// Owner of the published `QueryState`.
#[derive(Debug)]
pub struct QueryStore {
    sender: watch::Sender<QueryState>,
}

impl QueryStore {
    /// Creates a store holding an idle state on `tab`.
    pub fn new(tab: MediaKind) -> Self {
        let (sender, _) = watch::channel(QueryState::new(tab));
        Self { sender }
    }

    /// New reader of every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.sender.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> QueryState {
        self.sender.borrow().clone()
    }

    pub(crate) fn active_tab(&self) -> MediaKind {
        self.sender.borrow().active_tab
    }

    pub(crate) fn query(&self) -> String {
        self.sender.borrow().query.clone()
    }

    pub(crate) fn set_query(&self, query: String) {
        self.sender.send_if_modified(|state| {
            if state.query == query {
                return false;
            }
            state.query = query;
            true
        });
    }

    pub(crate) fn set_active_tab(&self, tab: MediaKind) {
        self.sender.send_if_modified(|state| {
            if state.active_tab == tab {
                return false;
            }
            state.active_tab = tab;
            true
        });
    }

    /// Enters Pending. Earlier results stay visible unless `clear_results`.
    pub(crate) fn begin_fetch(&self, clear_results: bool) {
        self.sender.send_modify(|state| {
            state.loading = true;
            state.error = None;
            if clear_results {
                state.results.clear();
            }
        });
    }

    pub(crate) fn commit_results(&self, items: Vec<MediaItem>) {
        self.sender.send_modify(|state| {
            state.results = items;
            state.loading = false;
            state.error = None;
        });
    }

    /// Enters Failed. `results` keeps the last successful output; readers
    /// must show the error instead of the grid.
    pub(crate) fn commit_error(&self, error: SearchError) {
        self.sender.send_modify(|state| {
            state.loading = false;
            state.error = Some(error);
        });
    }

    /// Back to Idle on the current tab.
    pub(crate) fn reset(&self) {
        self.sender.send_modify(|state| {
            let tab = state.active_tab;
            *state = QueryState::new(tab);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            kind: MediaKind::Photo,
            preview_url: format!("https://img/{id}.jpg"),
            playback_url: None,
            description: None,
            attribution_url: String::new(),
            attribution_name: None,
            full_url: None,
            page_url: None,
            download_url: None,
            slug: None,
        }
    }

    #[test]
    fn test_lifecycle_transitions() {
        let store = QueryStore::new(MediaKind::Photo);
        assert_eq!(store.snapshot().phase(), SessionPhase::Idle);

        store.set_query("cats".to_string());
        store.begin_fetch(false);
        assert_eq!(store.snapshot().phase(), SessionPhase::Pending);

        store.commit_results(vec![item("a"), item("b")]);
        let state = store.snapshot();
        assert_eq!(state.phase(), SessionPhase::Succeeded);
        assert_eq!(state.results.len(), 2);

        store.begin_fetch(false);
        store.commit_error(SearchError::Network {
            reason: "down".to_string(),
        });
        let state = store.snapshot();
        assert_eq!(state.phase(), SessionPhase::Failed);
        assert!(!state.loading);
        // last successful output is kept underneath the error
        assert_eq!(state.results.len(), 2);
    }

    #[test]
    fn test_begin_fetch_clears_error_and_optionally_results() {
        let store = QueryStore::new(MediaKind::Video);
        store.commit_results(vec![item("a")]);
        store.commit_error(SearchError::Cancelled);

        store.begin_fetch(false);
        let state = store.snapshot();
        assert!(state.error.is_none());
        assert_eq!(state.results.len(), 1);

        store.begin_fetch(true);
        assert!(store.snapshot().results.is_empty());
    }

    #[test]
    fn test_reset_keeps_tab() {
        let store = QueryStore::new(MediaKind::Photo);
        store.set_active_tab(MediaKind::Video);
        store.set_query("waves".to_string());
        store.commit_results(vec![item("a")]);

        store.reset();

        assert_eq!(store.snapshot(), QueryState::new(MediaKind::Video));
        assert_eq!(store.snapshot().phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_unchanged_values_do_not_notify() {
        let store = QueryStore::new(MediaKind::Photo);
        let mut reader = store.subscribe();
        reader.mark_unchanged();

        store.set_active_tab(MediaKind::Photo);
        store.set_query(String::new());
        assert!(!reader.has_changed().unwrap());

        store.set_query("owls".to_string());
        assert!(reader.has_changed().unwrap());
    }
}

//! Command definitions for the session controller actor.

use snapscout_search::{MediaItem, MediaKind, SearchError};
use tokio::sync::oneshot;

/// User actions sent to the controller actor.
///
/// Each command carries a response channel; the actor applies commands one
/// at a time, which is what serializes all store writes.
pub(crate) enum SessionCommand {
    /// Submit search text for the active tab.
    SubmitQuery {
        text: String,
        responder: oneshot::Sender<DispatchOutcome>,
    },
    /// Switch the active media tab.
    SelectTab {
        kind: MediaKind,
        responder: oneshot::Sender<DispatchOutcome>,
    },
    /// Supersede any pending fetch and return to Idle.
    ClearResults { responder: oneshot::Sender<()> },
    /// Stop the actor, cancelling any pending fetch.
    Shutdown { responder: oneshot::Sender<()> },
}

/// What a user action caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A new fetch was issued under this session number.
    Fetching { session: u64 },
    /// No fetch was issued (empty query, or tab already active).
    NoFetch,
}

impl DispatchOutcome {
    /// Session number of the issued fetch, if any.
    pub fn session(self) -> Option<u64> {
        match self {
            DispatchOutcome::Fetching { session } => Some(session),
            DispatchOutcome::NoFetch => None,
        }
    }
}

/// Settlement of one fetch task, reported back to the actor.
#[derive(Debug)]
pub(crate) struct FetchSettled {
    pub session: u64,
    pub outcome: Result<Vec<MediaItem>, SearchError>,
}

//! Handle for communicating with the session controller actor.

use snapscout_search::MediaKind;
use tokio::sync::{mpsc, oneshot, watch};

use super::commands::{DispatchOutcome, SessionCommand};
use crate::SessionError;
use crate::store::QueryState;

/// Handle for dispatching user actions and reading session state.
///
/// Cheap to clone; every clone talks to the same actor and observes the
/// same store.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    state: watch::Receiver<QueryState>,
}

impl SessionHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<SessionCommand>,
        state: watch::Receiver<QueryState>,
    ) -> Self {
        Self { sender, state }
    }

    /// Submits search text for the active tab.
    ///
    /// Whitespace-only text is ignored. Any other text, including a repeat of
    /// the current query, supersedes the pending fetch and starts a new one.
    ///
    /// # Errors
    /// - `SessionError::ControllerStopped` - Actor is no longer running
    pub async fn submit_query(
        &self,
        text: impl Into<String>,
    ) -> Result<DispatchOutcome, SessionError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::SubmitQuery {
            text: text.into(),
            responder,
        };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::ControllerStopped)?;

        rx.await.map_err(|_| SessionError::ControllerStopped)
    }

    /// Switches the active tab, re-fetching the current query on the new
    /// backend when there is one.
    ///
    /// # Errors
    /// - `SessionError::ControllerStopped` - Actor is no longer running
    pub async fn select_tab(&self, kind: MediaKind) -> Result<DispatchOutcome, SessionError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::SelectTab { kind, responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::ControllerStopped)?;

        rx.await.map_err(|_| SessionError::ControllerStopped)
    }

    /// Cancels any pending fetch and resets the session to Idle.
    ///
    /// # Errors
    /// - `SessionError::ControllerStopped` - Actor is no longer running
    pub async fn clear_results(&self) -> Result<(), SessionError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::ClearResults { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::ControllerStopped)?;

        rx.await.map_err(|_| SessionError::ControllerStopped)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// New receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.clone()
    }

    /// Waits until no fetch is pending and returns that state.
    ///
    /// # Errors
    /// - `SessionError::ControllerStopped` - Actor stopped while waiting
    pub async fn wait_until_settled(&self) -> Result<QueryState, SessionError> {
        let mut state = self.subscribe();
        let settled = state
            .wait_for(|state| !state.loading)
            .await
            .map_err(|_| SessionError::ControllerStopped)?;
        Ok(settled.clone())
    }

    /// Shuts down the actor, cancelling any pending fetch.
    ///
    /// # Errors
    /// - `SessionError::ControllerStopped` - Actor had already stopped
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::Shutdown { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::ControllerStopped)?;

        rx.await.map_err(|_| SessionError::ControllerStopped)
    }

    /// Checks if the actor is still accepting commands.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }
}

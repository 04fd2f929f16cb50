//! Actor implementation for the query lifecycle controller.
//!
//! Every `(query, tab)` change opens a new session with a higher number.
//! The fetch for a session runs in its own task under a child cancellation
//! token and reports back over an internal channel. A settlement is
//! committed only if its session number is still the current one and it is
//! not a cancellation; anything else is dropped, however it ended.

use snapscout_core::{SnapscoutConfig, TabSwitchPolicy};
use snapscout_search::{MediaKind, MediaSearchService, SearchRequest};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::commands::{DispatchOutcome, FetchSettled, SessionCommand};
use super::handle::SessionHandle;
use crate::store::QueryStore;

/// Spawns the controller actor and returns its handle.
///
/// The session starts Idle on the photo tab.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use snapscout_core::SnapscoutConfig;
/// use snapscout_search::MediaSearchService;
/// use snapscout_session::spawn_controller;
///
/// let handle = spawn_controller(MediaSearchService::new_demo(), &SnapscoutConfig::default());
/// handle.submit_query("lighthouse").await.unwrap();
/// let state = handle.wait_until_settled().await.unwrap();
/// println!("{} results", state.results.len());
/// # }
/// ```
pub fn spawn_controller(service: MediaSearchService, config: &SnapscoutConfig) -> SessionHandle {
    spawn_controller_on_tab(service, config, MediaKind::Photo)
}

/// Spawns the controller actor with `tab` initially active.
pub fn spawn_controller_on_tab(
    service: MediaSearchService,
    config: &SnapscoutConfig,
    tab: MediaKind,
) -> SessionHandle {
    let (sender, receiver) = mpsc::channel(64);
    let (settled_sender, settled_receiver) = mpsc::unbounded_channel();
    let store = QueryStore::new(tab);
    let state = store.subscribe();

    let controller = SessionController {
        service,
        store,
        per_page: config.search.per_page,
        tab_switch: config.search.tab_switch,
        session: 0,
        in_flight: None,
        settled_sender,
        root_token: CancellationToken::new(),
    };

    tokio::spawn(async move {
        run_actor_loop(controller, receiver, settled_receiver).await;
    });

    SessionHandle::new(sender, state)
}

/// The fetch currently allowed to commit.
struct InFlight {
    session: u64,
    cancel: CancellationToken,
}

pub(crate) struct SessionController {
    service: MediaSearchService,
    store: QueryStore,
    per_page: u32,
    tab_switch: TabSwitchPolicy,
    /// Number of the most recently issued session; only it may commit
    session: u64,
    in_flight: Option<InFlight>,
    settled_sender: mpsc::UnboundedSender<FetchSettled>,
    /// Parent of every fetch token; cancelled when the actor stops
    root_token: CancellationToken,
}

async fn run_actor_loop(
    mut controller: SessionController,
    mut receiver: mpsc::Receiver<SessionCommand>,
    mut settled_receiver: mpsc::UnboundedReceiver<FetchSettled>,
) {
    tracing::debug!("Session controller actor started");

    loop {
        // Branch order is unspecified; the session number alone decides
        // whether a settlement commits.
        tokio::select! {
            command = receiver.recv() => {
                let Some(command) = command else {
                    tracing::debug!("All session handles dropped");
                    break;
                };
                if !controller.handle_command(command) {
                    break;
                }
            }
            Some(settled) = settled_receiver.recv() => {
                controller.reconcile(settled);
            }
        }
    }

    controller.supersede_in_flight();
    controller.root_token.cancel();
    tracing::debug!("Session controller actor stopped");
}

impl SessionController {
    /// Handles a single command. Returns false to stop the actor.
    fn handle_command(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::SubmitQuery { text, responder } => {
                let outcome = self.submit_query(&text);
                let _ = responder.send(outcome);
            }

            SessionCommand::SelectTab { kind, responder } => {
                let outcome = self.select_tab(kind);
                let _ = responder.send(outcome);
            }

            SessionCommand::ClearResults { responder } => {
                self.clear_results();
                let _ = responder.send(());
            }

            SessionCommand::Shutdown { responder } => {
                tracing::debug!("Session controller shutting down");
                let _ = responder.send(());
                return false;
            }
        }

        true
    }

    fn submit_query(&mut self, text: &str) -> DispatchOutcome {
        let query = text.trim();
        if query.is_empty() {
            tracing::debug!("Ignoring empty query submit");
            return DispatchOutcome::NoFetch;
        }

        self.store.set_query(query.to_string());
        self.start_session(false)
    }

    fn select_tab(&mut self, kind: MediaKind) -> DispatchOutcome {
        if self.store.active_tab() == kind {
            return DispatchOutcome::NoFetch;
        }

        self.store.set_active_tab(kind);

        if self.store.query().is_empty() {
            tracing::debug!("Switched to {kind} with no query, staying idle");
            return DispatchOutcome::NoFetch;
        }

        let clear = self.tab_switch == TabSwitchPolicy::ClearResults;
        self.start_session(clear)
    }

    fn clear_results(&mut self) {
        self.supersede_in_flight();
        // Bump the session so any settlement still in the channel is stale
        self.session += 1;
        self.store.reset();
    }

    /// Supersedes whatever is pending and issues the fetch for the current
    /// `(query, tab)` pair.
    fn start_session(&mut self, clear_results: bool) -> DispatchOutcome {
        self.supersede_in_flight();

        self.session += 1;
        let session = self.session;
        let request = SearchRequest::new(self.store.query(), self.store.active_tab())
            .with_per_page(self.per_page);

        tracing::debug!(
            "Issuing session {}: query='{}' tab={}",
            session,
            request.query,
            request.kind
        );

        self.store.begin_fetch(clear_results);

        let cancel = self.root_token.child_token();
        let task_cancel = cancel.clone();
        let service = self.service.clone();
        let settled_sender = self.settled_sender.clone();

        tokio::spawn(async move {
            let outcome = service.search(&request, &task_cancel).await;
            // Receiver is gone only once the actor has stopped
            let _ = settled_sender.send(FetchSettled { session, outcome });
        });

        self.in_flight = Some(InFlight { session, cancel });

        DispatchOutcome::Fetching { session }
    }

    fn supersede_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!("Superseding session {}", in_flight.session);
            in_flight.cancel.cancel();
        }
    }

    /// Commits a settlement iff it belongs to the current session.
    fn reconcile(&mut self, settled: FetchSettled) {
        if settled.session != self.session {
            tracing::debug!(
                "Discarding settlement of superseded session {} (current {})",
                settled.session,
                self.session
            );
            return;
        }

        match settled.outcome {
            Err(error) if error.is_cancellation() => {
                // Only a superseded fetch is ever cancelled; the superseding
                // fetch owns the next loading transition.
                tracing::debug!("Session {} cancelled", settled.session);
            }
            Ok(items) => {
                tracing::debug!(
                    "Session {} settled with {} results",
                    settled.session,
                    items.len()
                );
                self.in_flight = None;
                self.store.commit_results(items);
            }
            Err(error) => {
                tracing::warn!("Session {} failed: {}", settled.session, error);
                self.in_flight = None;
                self.store.commit_error(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use snapscout_search::providers::ScriptedProvider;
    use snapscout_search::{MediaItem, SearchError};

    use super::*;
    use crate::store::SessionPhase;

    fn controller() -> (SessionController, mpsc::UnboundedReceiver<FetchSettled>) {
        let (settled_sender, settled_receiver) = mpsc::unbounded_channel();
        let service = MediaSearchService::with_providers(
            Arc::new(ScriptedProvider::new(MediaKind::Photo)),
            Arc::new(ScriptedProvider::new(MediaKind::Video)),
        );
        let controller = SessionController {
            service,
            store: QueryStore::new(MediaKind::Photo),
            per_page: 20,
            tab_switch: TabSwitchPolicy::KeepResults,
            session: 0,
            in_flight: None,
            settled_sender,
            root_token: CancellationToken::new(),
        };
        (controller, settled_receiver)
    }

    fn item(id: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            kind: MediaKind::Photo,
            preview_url: "p".to_string(),
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

    #[tokio::test]
    async fn test_stale_settlement_is_discarded() {
        let (mut controller, _settled) = controller();
        controller.submit_query("cats");
        controller.submit_query("dogs");
        assert_eq!(controller.session, 2);

        controller.reconcile(FetchSettled {
            session: 1,
            outcome: Ok(vec![item("cat")]),
        });
        let state = controller.store.snapshot();
        assert!(state.loading);
        assert!(state.results.is_empty());

        controller.reconcile(FetchSettled {
            session: 2,
            outcome: Ok(vec![item("dog")]),
        });
        let state = controller.store.snapshot();
        assert_eq!(state.phase(), SessionPhase::Succeeded);
        assert_eq!(state.results[0].id, "dog");
    }

    #[tokio::test]
    async fn test_cancellation_of_current_session_is_silent() {
        let (mut controller, _settled) = controller();
        controller.submit_query("cats");

        controller.reconcile(FetchSettled {
            session: 1,
            outcome: Err(SearchError::Cancelled),
        });

        let state = controller.store.snapshot();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_superseding_cancels_previous_token() {
        let (mut controller, _settled) = controller();
        controller.submit_query("cats");
        let first = controller.in_flight.as_ref().unwrap().cancel.clone();

        controller.select_tab(MediaKind::Video);

        assert!(first.is_cancelled());
        assert_eq!(controller.in_flight.as_ref().unwrap().session, 2);
        assert!(!controller.in_flight.as_ref().unwrap().cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_clear_makes_pending_settlement_stale() {
        let (mut controller, _settled) = controller();
        controller.submit_query("cats");
        controller.clear_results();

        controller.reconcile(FetchSettled {
            session: 1,
            outcome: Ok(vec![item("cat")]),
        });

        assert_eq!(controller.store.snapshot().phase(), SessionPhase::Idle);
    }
}

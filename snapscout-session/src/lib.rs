//! Snapscout Session - Query lifecycle controller and state store
//!
//! Owns the search session: which query and tab are active, which fetch is
//! allowed to land, and the results, loading flag and error the
//! presentation layer renders.

pub mod controller;
pub mod store;

pub use controller::{
    DispatchOutcome, SessionHandle, spawn_controller, spawn_controller_on_tab,
};
pub use store::{QueryState, QueryStore, SessionPhase};

/// Errors returned by [`SessionHandle`] calls.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session controller has stopped")]
    ControllerStopped,
}

pub type Result<T> = std::result::Result<T, SessionError>;

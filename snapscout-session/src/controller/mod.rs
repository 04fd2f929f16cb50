//! Query lifecycle controller
//!
//! Turns `(query, tab)` changes into at most one authoritative fetch and
//! reconciles its outcome into the [`QueryStore`](crate::store::QueryStore).
//! Runs as an actor so store writes are serialized without locks.

mod actor;
mod commands;
mod handle;

pub use actor::{spawn_controller, spawn_controller_on_tab};
pub use commands::DispatchOutcome;
pub use handle::SessionHandle;

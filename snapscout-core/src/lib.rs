//! Snapscout Core - Configuration and shared infrastructure
//!
//! This crate provides the pieces every other Snapscout crate builds on:
//! provider credentials and network settings, tracing setup, and the
//! top-level error type.

pub mod config;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{
    NetworkConfig, ProviderConfig, ProvidersConfig, SearchConfig, SnapscoutConfig, TabSwitchPolicy,
};

/// Core errors that can bubble up from Snapscout infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum SnapscoutError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SnapscoutError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            SnapscoutError::Configuration { reason } => format!("Invalid configuration: {reason}"),
            SnapscoutError::Io(_) => "File system error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapscoutError>;

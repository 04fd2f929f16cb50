//! Error types for media search functionality.

use thiserror::Error;

/// Errors that can occur while fetching or normalizing a page of results.
///
/// Values are cloneable so the session store can hold the error of the last
/// failed fetch next to the results of the last successful one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Transport-level failure: connection refused, timeout, non-success
    /// status other than auth or throttling.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// Credential missing or rejected by the provider.
    #[error("Authentication failed for {provider}: {reason}")]
    Auth {
        /// Provider that rejected the credential
        provider: String,
        /// The reason for the authentication failure
        reason: String,
    },

    /// Provider throttled the request.
    #[error("Rate limited by {provider}")]
    RateLimited {
        /// Provider that throttled the request
        provider: String,
    },

    /// The fetch was aborted because a newer query superseded it.
    #[error("Search cancelled")]
    Cancelled,

    /// Response could not be decoded or a record lacked required fields.
    #[error("Malformed response from {provider}: {reason}")]
    MalformedResponse {
        /// Provider that sent the response
        provider: String,
        /// The reason the response was rejected
        reason: String,
    },
}

impl SearchError {
    /// Whether this error was produced by superseding a fetch.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, SearchError::Cancelled)
    }

    /// Whether re-submitting the same query may succeed without a
    /// configuration change.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SearchError::Network { .. } | SearchError::RateLimited { .. }
        )
    }

    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Network { .. } => {
                "Could not reach the media service. Check your connection and search again."
                    .to_string()
            }
            SearchError::Auth { provider, .. } => {
                format!("The {provider} API key is missing or was rejected.")
            }
            SearchError::RateLimited { provider } => {
                format!("Too many requests to {provider}. Wait a moment and search again.")
            }
            SearchError::Cancelled => "Search cancelled".to_string(),
            SearchError::MalformedResponse { provider, .. } => {
                format!("{provider} returned results that could not be read.")
            }
        }
    }

    pub(crate) fn malformed(provider: &str, reason: impl Into<String>) -> Self {
        SearchError::MalformedResponse {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }
}

//! Media provider adapters.
//!
//! Each backend speaks its own HTTP dialect but exposes the same
//! capability: one cancellable search call returning a raw page.

use std::future::Future;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use snapscout_core::NetworkConfig;
use tokio_util::sync::CancellationToken;

use crate::errors::SearchError;
use crate::raw::RawPage;
use crate::types::{MediaKind, SearchRequest};

pub mod demo;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod pexels;
pub mod unsplash;

pub use demo::DemoProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{ScriptedProvider, ScriptedResponse};
pub use pexels::PexelsProvider;
pub use unsplash::UnsplashProvider;

/// Name reported in errors for the photo backend.
pub const PHOTO_PROVIDER: &str = "unsplash";
/// Name reported in errors for the video backend.
pub const VIDEO_PROVIDER: &str = "pexels";

/// Trait for media search backends.
///
/// Implementations must stop work promptly once `cancel` fires and report
/// it as `SearchError::Cancelled`, never as a network failure.
#[async_trait]
pub trait MediaProvider: Send + Sync + std::fmt::Debug {
    /// Media kind this backend serves.
    fn kind(&self) -> MediaKind;

    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Fetches one page of raw records.
    ///
    /// # Errors
    /// - `SearchError::Network` - Transport failure, timeout or unexpected status
    /// - `SearchError::Auth` - Credential missing or rejected
    /// - `SearchError::RateLimited` - Provider throttled the request
    /// - `SearchError::MalformedResponse` - Body could not be decoded
    /// - `SearchError::Cancelled` - `cancel` fired before the call finished
    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<RawPage, SearchError>;
}

/// Builds the HTTP client shared by the real adapters.
///
/// # Errors
/// - `SearchError::Network` - TLS backend or client could not be initialized
pub fn build_http_client(config: &NetworkConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent)
        .build()
        .map_err(|e| SearchError::Network {
            reason: format!("HTTP client setup failed: {e}"),
        })
}

/// Races `work` against `cancel`. Dropping the losing future aborts any
/// in-flight request and releases its connection.
///
/// # Errors
/// - `SearchError::Cancelled` - `cancel` fired first (or before the call)
/// - Any error produced by `work`
pub async fn run_cancellable<T, F>(cancel: &CancellationToken, work: F) -> Result<T, SearchError>
where
    F: Future<Output = Result<T, SearchError>>,
{
    if cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SearchError::Cancelled),
        result = work => result,
    }
}

/// Fails with `Auth` before any request when no credential is configured.
pub(crate) fn ensure_credential(provider: &str, api_key: &str) -> Result<(), SearchError> {
    if api_key.trim().is_empty() {
        return Err(SearchError::Auth {
            provider: provider.to_string(),
            reason: "no API key configured".to_string(),
        });
    }
    Ok(())
}

/// Sends `request` and decodes a JSON body, honouring `cancel`.
pub(crate) async fn send_json<T>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
    cancel: &CancellationToken,
) -> Result<T, SearchError>
where
    T: DeserializeOwned,
{
    run_cancellable(cancel, async {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(provider, &e))?;

        check_status(provider, response.status())?;

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                SearchError::malformed(provider, e.to_string())
            } else {
                transport_error(provider, &e)
            }
        })
    })
    .await
}

pub(crate) fn check_status(provider: &str, status: reqwest::StatusCode) -> Result<(), SearchError> {
    use reqwest::StatusCode;

    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SearchError::Auth {
            provider: provider.to_string(),
            reason: format!("HTTP {status}"),
        }),
        StatusCode::TOO_MANY_REQUESTS => Err(SearchError::RateLimited {
            provider: provider.to_string(),
        }),
        _ => Err(SearchError::Network {
            reason: format!("{provider} HTTP {status}"),
        }),
    }
}

fn transport_error(provider: &str, error: &reqwest::Error) -> SearchError {
    let reason = if error.is_timeout() {
        format!("{provider} request timed out")
    } else {
        format!("{provider} request failed: {error}")
    };
    SearchError::Network { reason }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(check_status("unsplash", StatusCode::OK).is_ok());
        assert!(matches!(
            check_status("unsplash", StatusCode::UNAUTHORIZED),
            Err(SearchError::Auth { .. })
        ));
        assert!(matches!(
            check_status("pexels", StatusCode::FORBIDDEN),
            Err(SearchError::Auth { .. })
        ));
        assert!(matches!(
            check_status("pexels", StatusCode::TOO_MANY_REQUESTS),
            Err(SearchError::RateLimited { .. })
        ));
        assert!(matches!(
            check_status("pexels", StatusCode::BAD_GATEWAY),
            Err(SearchError::Network { .. })
        ));
    }

    #[test]
    fn test_missing_credential_is_auth_error() {
        assert!(ensure_credential("unsplash", "key").is_ok());
        assert!(matches!(
            ensure_credential("unsplash", "  "),
            Err(SearchError::Auth { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_cancellable_prefers_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let result: Result<(), SearchError> = run_cancellable(&token, async { Ok(()) }).await;
        assert_eq!(result, Err(SearchError::Cancelled));
    }

    #[tokio::test]
    async fn test_run_cancellable_aborts_pending_work() {
        let token = CancellationToken::new();
        let child = token.clone();

        let pending = tokio::spawn(async move {
            run_cancellable(&child, async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, SearchError>(())
            })
            .await
        });

        token.cancel();
        let result = tokio::time::timeout(Duration::from_secs(1), pending)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result, Err(SearchError::Cancelled));
    }
}

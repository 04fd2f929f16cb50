//! Media search service
//!
//! Pairs each media kind with its provider and runs the normalizer over
//! whatever the provider returns, so callers only ever see `MediaItem`s.

use std::sync::Arc;
use std::time::Duration;

use snapscout_core::SnapscoutConfig;
use tokio_util::sync::CancellationToken;

use crate::errors::SearchError;
use crate::normalize::normalize_page;
use crate::providers::{
    DemoProvider, MediaProvider, PexelsProvider, UnsplashProvider, build_http_client,
};
use crate::types::{MediaItem, MediaKind, SearchRequest};

/// Media search service routing each kind to its backend.
#[derive(Debug, Clone)]
pub struct MediaSearchService {
    photo: Arc<dyn MediaProvider>,
    video: Arc<dyn MediaProvider>,
}

impl MediaSearchService {
    /// Creates the service with the real Unsplash and Pexels backends.
    ///
    /// # Errors
    /// - `SearchError::Network` - HTTP client could not be built
    pub fn from_config(config: &SnapscoutConfig) -> Result<Self, SearchError> {
        let client = build_http_client(&config.network)?;
        Ok(Self {
            photo: Arc::new(UnsplashProvider::new(
                client.clone(),
                &config.providers.photo,
            )),
            video: Arc::new(PexelsProvider::new(client, &config.providers.video)),
        })
    }

    /// Creates the service with offline demo data for development.
    pub fn new_demo() -> Self {
        Self::new_demo_with_latency(Duration::ZERO)
    }

    /// Demo service whose responses arrive after `latency`.
    pub fn new_demo_with_latency(latency: Duration) -> Self {
        Self {
            photo: Arc::new(DemoProvider::new(MediaKind::Photo).with_latency(latency)),
            video: Arc::new(DemoProvider::new(MediaKind::Video).with_latency(latency)),
        }
    }

    /// Creates the service from explicit providers.
    pub fn with_providers(photo: Arc<dyn MediaProvider>, video: Arc<dyn MediaProvider>) -> Self {
        if photo.kind() != MediaKind::Photo || video.kind() != MediaKind::Video {
            tracing::warn!(
                "Provider kinds do not match their slots: photo={}, video={}",
                photo.kind(),
                video.kind()
            );
        }
        Self { photo, video }
    }

    /// Backend serving `kind`.
    pub fn provider_for(&self, kind: MediaKind) -> &Arc<dyn MediaProvider> {
        match kind {
            MediaKind::Photo => &self.photo,
            MediaKind::Video => &self.video,
        }
    }

    /// Fetches and normalizes one page for `request`.
    ///
    /// # Errors
    /// - `SearchError::Cancelled` - `cancel` fired before the page arrived
    /// - `SearchError::MalformedResponse` - A record could not be normalized
    /// - Any transport, auth or rate-limit error from the provider
    pub async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<MediaItem>, SearchError> {
        let provider = self.provider_for(request.kind);
        let page = provider.search(request, cancel).await?;
        if page.is_empty() {
            tracing::debug!("{} returned no records for '{}'", provider.name(), request.query);
        }
        let items = normalize_page(&page)?;

        tracing::debug!(
            "{} search '{}' normalized {} of {} records",
            provider.name(),
            request.query,
            items.len(),
            page.len()
        );

        Ok(items)
    }
}

//! Pexels video search provider.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use snapscout_core::ProviderConfig;
use tokio_util::sync::CancellationToken;

use super::{MediaProvider, VIDEO_PROVIDER, ensure_credential, send_json};
use crate::errors::SearchError;
use crate::raw::{RawPage, VideoSearchResponse};
use crate::types::{MediaKind, SearchRequest};

/// Video backend speaking the Pexels `GET /videos/search` API.
///
/// The API key goes in the `Authorization` header as-is. Only the first
/// page is ever requested; `SearchRequest::page` is not forwarded.
#[derive(Debug)]
pub struct PexelsProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PexelsProvider {
    /// Creates the provider from its endpoint configuration.
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/videos/search", self.base_url)
    }
}

#[async_trait]
impl MediaProvider for PexelsProvider {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn name(&self) -> &'static str {
        VIDEO_PROVIDER
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<RawPage, SearchError> {
        ensure_credential(VIDEO_PROVIDER, &self.api_key)?;

        let per_page = request.per_page.to_string();
        let http_request = self
            .client
            .get(self.search_url())
            .query(&[
                ("query", request.query.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .header(AUTHORIZATION, self.api_key.as_str());

        tracing::debug!(
            "Pexels search: query='{}' per_page={}",
            request.query,
            request.per_page
        );

        let response: VideoSearchResponse = send_json(VIDEO_PROVIDER, http_request, cancel).await?;

        tracing::debug!(
            "Pexels returned {} videos (total={:?})",
            response.videos.len(),
            response.total_results
        );

        Ok(RawPage::Videos(response))
    }
}

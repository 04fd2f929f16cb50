//! Unsplash photo search provider.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use snapscout_core::ProviderConfig;
use tokio_util::sync::CancellationToken;

use super::{MediaProvider, PHOTO_PROVIDER, ensure_credential, send_json};
use crate::errors::SearchError;
use crate::raw::{PhotoSearchResponse, RawPage};
use crate::types::{MediaKind, SearchRequest};

/// Photo backend speaking the Unsplash `GET /search/photos` API.
///
/// Authenticates with a static `Client-ID` access key header.
#[derive(Debug)]
pub struct UnsplashProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UnsplashProvider {
    /// Creates the provider from its endpoint configuration.
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search/photos", self.base_url)
    }
}

#[async_trait]
impl MediaProvider for UnsplashProvider {
    fn kind(&self) -> MediaKind {
        MediaKind::Photo
    }

    fn name(&self) -> &'static str {
        PHOTO_PROVIDER
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<RawPage, SearchError> {
        ensure_credential(PHOTO_PROVIDER, &self.api_key)?;

        let page = request.page.to_string();
        let per_page = request.per_page.to_string();
        let http_request = self
            .client
            .get(self.search_url())
            .query(&[
                ("query", request.query.as_str()),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .header(AUTHORIZATION, format!("Client-ID {}", self.api_key));

        tracing::debug!(
            "Unsplash search: query='{}' page={} per_page={}",
            request.query,
            request.page,
            request.per_page
        );

        let response: PhotoSearchResponse = send_json(PHOTO_PROVIDER, http_request, cancel).await?;

        tracing::debug!(
            "Unsplash returned {} photos (total={:?})",
            response.results.len(),
            response.total
        );

        Ok(RawPage::Photos(response))
    }
}

//! Demo provider for offline development.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{MediaProvider, run_cancellable};
use crate::errors::SearchError;
use crate::raw::{
    PhotoSearchResponse, RawId, RawPage, RawPhoto, RawPhotoLinks, RawPhotoUrls, RawPhotoUser,
    RawUserLinks, RawVideo, RawVideoFile, RawVideoUser, VideoSearchResponse,
};
use crate::types::{MediaKind, SearchRequest};

/// Serves generated records shaped like the real provider responses, so the
/// whole pipeline (normalizer included) runs without API keys.
#[derive(Debug)]
pub struct DemoProvider {
    kind: MediaKind,
    latency: Duration,
}

impl DemoProvider {
    /// Creates a demo backend for `kind` with no artificial latency.
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            latency: Duration::ZERO,
        }
    }

    /// Builder: delay every response, to make loading states visible.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl MediaProvider for DemoProvider {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn name(&self) -> &'static str {
        "demo"
    }

    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<RawPage, SearchError> {
        let latency = self.latency;
        let page = demo_page(self.kind, request);
        run_cancellable(cancel, async move {
            tokio::time::sleep(latency).await;
            Ok(page)
        })
        .await
    }
}

/// Builds a raw page of `request.per_page` records whose ids embed the query,
/// so callers can tell which query produced a result set.
pub fn demo_page(kind: MediaKind, request: &SearchRequest) -> RawPage {
    let slug = request.query.trim().to_lowercase().replace(' ', "-");
    let count = request.per_page.min(80) as usize;
    let offset = request.page.saturating_sub(1) as usize * count;

    match kind {
        MediaKind::Photo => RawPage::Photos(PhotoSearchResponse {
            total: Some(count as u64),
            total_pages: Some(1),
            results: (offset..offset + count)
                .map(|index| demo_photo(&slug, index))
                .collect(),
        }),
        MediaKind::Video => RawPage::Videos(VideoSearchResponse {
            total_results: Some(count as u64),
            videos: (offset..offset + count)
                .map(|index| demo_video(&slug, index))
                .collect(),
        }),
    }
}

fn demo_photo(slug: &str, index: usize) -> RawPhoto {
    let id = format!("{slug}-photo-{index}");
    RawPhoto {
        id: Some(RawId::Text(id.clone())),
        slug: Some(id.clone()),
        alt_description: Some(format!("{} sample {}", slug.replace('-', " "), index + 1)),
        urls: Some(RawPhotoUrls {
            small: Some(format!("https://demo.snapscout.local/photos/{id}/small.jpg")),
            regular: Some(format!("https://demo.snapscout.local/photos/{id}/regular.jpg")),
        }),
        links: Some(RawPhotoLinks {
            html: Some(format!("https://demo.snapscout.local/photos/{id}")),
            download: Some(format!("https://demo.snapscout.local/photos/{id}/download")),
        }),
        user: Some(RawPhotoUser {
            name: Some(format!("Demo Photographer {}", index % 5 + 1)),
            links: Some(RawUserLinks {
                html: Some(format!("https://demo.snapscout.local/@photographer{}", index % 5 + 1)),
            }),
        }),
    }
}

fn demo_video(slug: &str, index: usize) -> RawVideo {
    let id = format!("{slug}-video-{index}");
    RawVideo {
        id: Some(RawId::Text(id.clone())),
        image: Some(format!("https://demo.snapscout.local/videos/{id}/poster.jpg")),
        video_files: vec![
            RawVideoFile {
                quality: Some("hd".to_string()),
                link: Some(format!("https://demo.snapscout.local/videos/{id}/hd.mp4")),
            },
            RawVideoFile {
                quality: Some("sd".to_string()),
                link: Some(format!("https://demo.snapscout.local/videos/{id}/sd.mp4")),
            },
        ],
        user: Some(RawVideoUser {
            name: Some(format!("Demo Filmmaker {}", index % 3 + 1)),
            url: Some(format!("https://demo.snapscout.local/@filmmaker{}", index % 3 + 1)),
        }),
    }
}

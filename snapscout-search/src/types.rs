//! Data types for media search functionality.

use serde::{Deserialize, Serialize};

/// Media kind, one per search tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Photo tab, served by the photo backend
    #[default]
    Photo,
    /// Video tab, served by the video backend
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photos"),
            MediaKind::Video => write!(f, "videos"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "photo" | "photos" => Ok(MediaKind::Photo),
            "video" | "videos" => Ok(MediaKind::Video),
            _ => Err(format!("Invalid media kind: {s}")),
        }
    }
}

/// Canonical result item rendered by the presentation layer.
///
/// `playback_url` is present iff `kind` is [`MediaKind::Video`]; the
/// photo-only fields (`full_url`, `page_url`, `download_url`, `slug`) are
/// always `None` for videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Provider id, unique within a result set
    pub id: String,
    /// Tab the item was fetched for
    pub kind: MediaKind,
    /// Grid image, or poster frame for videos
    pub preview_url: String,
    /// Video played while the item is hovered
    pub playback_url: Option<String>,
    /// Alt text
    pub description: Option<String>,
    /// Creator profile link
    pub attribution_url: String,
    /// Creator display name
    pub attribution_name: Option<String>,
    /// Larger rendition of a photo
    pub full_url: Option<String>,
    /// Photo page on the provider's site
    pub page_url: Option<String>,
    /// Original photo file
    pub download_url: Option<String>,
    /// URL-friendly photo name
    pub slug: Option<String>,
}

impl MediaItem {
    /// Text shown under the item: creator name, else description.
    pub fn caption(&self) -> &str {
        self.attribution_name
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("Unknown")
    }
}

/// Parameters of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Trimmed, non-empty search text
    pub query: String,
    /// Backend to ask
    pub kind: MediaKind,
    /// 1-based page number; the video backend ignores it
    pub page: u32,
    /// Records requested per page
    pub per_page: u32,
}

impl SearchRequest {
    /// Creates a first-page request with the default page size.
    pub fn new(query: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            query: query.into(),
            kind,
            page: 1,
            per_page: 20,
        }
    }

    /// Builder: set the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Builder: set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

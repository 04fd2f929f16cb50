//! Wire shapes of the provider search responses.
//!
//! Fields the normalizer requires are still `Option` here: a missing field
//! must become a `MalformedResponse` naming the field, not an opaque serde
//! error for the whole body.

use serde::Deserialize;

/// One page of raw records as returned by an adapter.
#[derive(Debug, Clone)]
pub enum RawPage {
    /// Photo backend page
    Photos(PhotoSearchResponse),
    /// Video backend page
    Videos(VideoSearchResponse),
}

impl RawPage {
    /// Number of raw records on the page.
    pub fn len(&self) -> usize {
        match self {
            RawPage::Photos(page) => page.results.len(),
            RawPage::Videos(page) => page.videos.len(),
        }
    }

    /// Whether the page has no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `GET /search/photos` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoSearchResponse {
    /// Matches across all pages
    #[serde(default)]
    pub total: Option<u64>,
    /// Page count at the requested page size
    #[serde(default)]
    pub total_pages: Option<u64>,
    /// Records in ranking order
    #[serde(default)]
    pub results: Vec<RawPhoto>,
}

/// One photo record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhoto {
    /// Provider id
    #[serde(default)]
    pub id: Option<RawId>,
    /// URL-friendly name
    #[serde(default)]
    pub slug: Option<String>,
    /// Alt text
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Image renditions
    #[serde(default)]
    pub urls: Option<RawPhotoUrls>,
    /// Photo page and download links
    #[serde(default)]
    pub links: Option<RawPhotoLinks>,
    /// Photographer
    #[serde(default)]
    pub user: Option<RawPhotoUser>,
}

/// Image renditions of a photo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhotoUrls {
    /// Grid-sized rendition
    #[serde(default)]
    pub small: Option<String>,
    /// Full-width rendition
    #[serde(default)]
    pub regular: Option<String>,
}

/// Links attached to a photo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhotoLinks {
    /// Photo page on the provider's site
    #[serde(default)]
    pub html: Option<String>,
    /// Original file
    #[serde(default)]
    pub download: Option<String>,
}

/// Photographer of a photo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPhotoUser {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Profile links
    #[serde(default)]
    pub links: Option<RawUserLinks>,
}

/// Profile links of a photographer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUserLinks {
    /// Public profile page
    #[serde(default)]
    pub html: Option<String>,
}

/// `GET /videos/search` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoSearchResponse {
    /// Matches across all pages
    #[serde(default)]
    pub total_results: Option<u64>,
    /// Records in ranking order
    #[serde(default)]
    pub videos: Vec<RawVideo>,
}

/// One video record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideo {
    /// Provider id
    #[serde(default)]
    pub id: Option<RawId>,
    /// Poster frame
    #[serde(default)]
    pub image: Option<String>,
    /// Renditions in provider order
    #[serde(default)]
    pub video_files: Vec<RawVideoFile>,
    /// Filmmaker
    #[serde(default)]
    pub user: Option<RawVideoUser>,
}

/// One rendition of a video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideoFile {
    /// `"hd"`, `"sd"`, `"uhd"`, or null on some renditions
    #[serde(default)]
    pub quality: Option<String>,
    /// Playable file URL
    #[serde(default)]
    pub link: Option<String>,
}

/// Filmmaker of a video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideoUser {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Profile page
    #[serde(default)]
    pub url: Option<String>,
}

/// Record identifier: strings for photos, integers for videos.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// String id
    Text(String),
    /// Numeric id
    Number(u64),
}

impl RawId {
    /// Canonical string form; `None` when the provider sent an empty id.
    pub fn to_canonical(&self) -> Option<String> {
        match self {
            RawId::Text(text) if text.trim().is_empty() => None,
            RawId::Text(text) => Some(text.clone()),
            RawId::Number(number) => Some(number.to_string()),
        }
    }
}

//! Result item normalization.
//!
//! Pure mapping from provider records to [`MediaItem`]. A page is
//! normalized all-or-nothing: one malformed record fails the whole page so
//! the user never sees a partial grid.

use std::collections::HashSet;

use crate::errors::SearchError;
use crate::providers::{PHOTO_PROVIDER, VIDEO_PROVIDER};
use crate::raw::{RawPage, RawPhoto, RawVideo, RawVideoFile};
use crate::types::{MediaItem, MediaKind};

/// Quality label preferred for hover playback; lighter than `hd`/`uhd`.
pub const PREFERRED_VIDEO_QUALITY: &str = "sd";

/// Normalizes a full page, preserving provider ranking order.
///
/// Later records repeating an already seen id are dropped.
///
/// # Errors
/// - `SearchError::MalformedResponse` - Any record lacks an id or a usable
///   media URL
pub fn normalize_page(page: &RawPage) -> Result<Vec<MediaItem>, SearchError> {
    let items = match page {
        RawPage::Photos(response) => response
            .results
            .iter()
            .map(normalize_photo)
            .collect::<Result<Vec<_>, _>>()?,
        RawPage::Videos(response) => response
            .videos
            .iter()
            .map(normalize_video)
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(dedupe_by_id(items))
}

/// Maps one photo record.
///
/// `preview_url` comes from `urls.small` (falling back to `urls.regular`),
/// `full_url` from `urls.regular`.
///
/// # Errors
/// - `SearchError::MalformedResponse` - Missing id or both image URLs
pub fn normalize_photo(raw: &RawPhoto) -> Result<MediaItem, SearchError> {
    let id = raw
        .id
        .as_ref()
        .and_then(|id| id.to_canonical())
        .ok_or_else(|| SearchError::malformed(PHOTO_PROVIDER, "photo record without id"))?;

    let small = raw.urls.as_ref().and_then(|urls| usable(&urls.small));
    let regular = raw.urls.as_ref().and_then(|urls| usable(&urls.regular));
    let preview_url = small.or(regular).ok_or_else(|| {
        SearchError::malformed(PHOTO_PROVIDER, format!("photo {id} has no image URL"))
    })?;

    let page_url = raw.links.as_ref().and_then(|links| usable(&links.html));
    let profile_url = raw
        .user
        .as_ref()
        .and_then(|user| user.links.as_ref())
        .and_then(|links| usable(&links.html));

    Ok(MediaItem {
        id,
        kind: MediaKind::Photo,
        preview_url: preview_url.to_string(),
        playback_url: None,
        description: usable(&raw.alt_description).map(str::to_string),
        attribution_url: profile_url.or(page_url).unwrap_or_default().to_string(),
        attribution_name: raw
            .user
            .as_ref()
            .and_then(|user| usable(&user.name))
            .map(str::to_string),
        full_url: regular.map(str::to_string),
        page_url: page_url.map(str::to_string),
        download_url: raw
            .links
            .as_ref()
            .and_then(|links| usable(&links.download))
            .map(str::to_string),
        slug: usable(&raw.slug).map(str::to_string),
    })
}

/// Maps one video record.
///
/// # Errors
/// - `SearchError::MalformedResponse` - Missing id, poster image or any
///   playable file
pub fn normalize_video(raw: &RawVideo) -> Result<MediaItem, SearchError> {
    let id = raw
        .id
        .as_ref()
        .and_then(|id| id.to_canonical())
        .ok_or_else(|| SearchError::malformed(VIDEO_PROVIDER, "video record without id"))?;

    let playback_url = select_playback_url(&raw.video_files).ok_or_else(|| {
        SearchError::malformed(VIDEO_PROVIDER, format!("video {id} has no playable file"))
    })?;

    let preview_url = usable(&raw.image).ok_or_else(|| {
        SearchError::malformed(VIDEO_PROVIDER, format!("video {id} has no poster image"))
    })?;

    Ok(MediaItem {
        id,
        kind: MediaKind::Video,
        preview_url: preview_url.to_string(),
        playback_url: Some(playback_url.to_string()),
        description: None,
        attribution_url: raw
            .user
            .as_ref()
            .and_then(|user| usable(&user.url))
            .unwrap_or_default()
            .to_string(),
        attribution_name: raw
            .user
            .as_ref()
            .and_then(|user| usable(&user.name))
            .map(str::to_string),
        full_url: None,
        page_url: None,
        download_url: None,
        slug: None,
    })
}

/// Picks the hover playback file: the first `sd` rendition, else the first
/// rendition with a link.
pub fn select_playback_url(files: &[RawVideoFile]) -> Option<&str> {
    files
        .iter()
        .filter(|file| file.quality.as_deref() == Some(PREFERRED_VIDEO_QUALITY))
        .find_map(|file| usable(&file.link))
        .or_else(|| files.iter().find_map(|file| usable(&file.link)))
}

fn usable(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn dedupe_by_id(items: Vec<MediaItem>) -> Vec<MediaItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let before = items.len();
    let unique: Vec<MediaItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    if unique.len() != before {
        tracing::debug!(
            "Dropped {} duplicate records from provider page",
            before - unique.len()
        );
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{PhotoSearchResponse, VideoSearchResponse};

    fn photo_json() -> &'static str {
        r#"{
            "id": "Dwu85P9SOIk",
            "slug": "white-cat",
            "alt_description": "white cat on a sofa",
            "urls": {"small": "s", "regular": "r"},
            "links": {"html": "https://unsplash.com/photos/Dwu85P9SOIk", "download": "https://unsplash.com/photos/Dwu85P9SOIk/download"},
            "user": {"name": "Jane Doe", "links": {"html": "https://unsplash.com/@jane"}}
        }"#
    }

    fn video(files: &str) -> RawVideo {
        serde_json::from_str(&format!(
            r#"{{
                "id": 1448735,
                "image": "https://images.pexels.com/videos/1448735/poster.jpeg",
                "video_files": {files},
                "user": {{"name": "Pat Lee", "url": "https://www.pexels.com/@pat"}}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_photo_mapping() {
        let raw: RawPhoto = serde_json::from_str(photo_json()).unwrap();
        let item = normalize_photo(&raw).unwrap();

        assert_eq!(item.id, "Dwu85P9SOIk");
        assert_eq!(item.kind, MediaKind::Photo);
        assert_eq!(item.preview_url, "s");
        assert_eq!(item.full_url.as_deref(), Some("r"));
        assert_eq!(item.playback_url, None);
        assert_eq!(item.description.as_deref(), Some("white cat on a sofa"));
        assert_eq!(item.attribution_name.as_deref(), Some("Jane Doe"));
        assert_eq!(item.attribution_url, "https://unsplash.com/@jane");
        assert_eq!(item.slug.as_deref(), Some("white-cat"));
        assert!(item.download_url.is_some());
    }

    #[test]
    fn test_photo_preview_falls_back_to_regular() {
        let raw: RawPhoto =
            serde_json::from_str(r#"{"id": "a", "urls": {"regular": "r"}}"#).unwrap();
        let item = normalize_photo(&raw).unwrap();

        assert_eq!(item.preview_url, "r");
        assert_eq!(item.attribution_url, "");
        assert_eq!(item.caption(), "Unknown");
    }

    #[test]
    fn test_photo_without_image_is_malformed() {
        let raw: RawPhoto =
            serde_json::from_str(r#"{"id": "a", "urls": {"small": " "}}"#).unwrap();
        assert!(matches!(
            normalize_photo(&raw),
            Err(SearchError::MalformedResponse { .. })
        ));

        let raw: RawPhoto = serde_json::from_str(r#"{"urls": {"small": "s"}}"#).unwrap();
        assert!(normalize_photo(&raw).is_err());
    }

    #[test]
    fn test_video_prefers_sd_rendition() {
        let raw = video(r#"[{"quality":"hd","link":"A"},{"quality":"sd","link":"B"}]"#);
        let item = normalize_video(&raw).unwrap();

        assert_eq!(item.playback_url.as_deref(), Some("B"));
        assert_eq!(item.id, "1448735");
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(
            item.preview_url,
            "https://images.pexels.com/videos/1448735/poster.jpeg"
        );
        assert_eq!(item.attribution_name.as_deref(), Some("Pat Lee"));
        assert_eq!(item.attribution_url, "https://www.pexels.com/@pat");
    }

    #[test]
    fn test_video_falls_back_to_first_rendition() {
        let raw = video(r#"[{"quality":"hd","link":"A"}]"#);
        assert_eq!(
            normalize_video(&raw).unwrap().playback_url.as_deref(),
            Some("A")
        );

        let raw = video(r#"[{"quality":"sd","link":""},{"quality":"uhd","link":"C"}]"#);
        assert_eq!(
            normalize_video(&raw).unwrap().playback_url.as_deref(),
            Some("C")
        );
    }

    #[test]
    fn test_video_without_files_is_malformed() {
        let raw = video("[]");
        assert!(matches!(
            normalize_video(&raw),
            Err(SearchError::MalformedResponse { ref provider, .. }) if provider == VIDEO_PROVIDER
        ));
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let raw: RawPhoto = serde_json::from_str(photo_json()).unwrap();
        assert_eq!(normalize_photo(&raw), normalize_photo(&raw));

        let raw = video(r#"[{"quality":"sd","link":"B"}]"#);
        assert_eq!(normalize_video(&raw), normalize_video(&raw));
    }

    #[test]
    fn test_page_is_all_or_nothing() {
        let body = format!(r#"{{"results": [{}, {{"id": "broken"}}]}}"#, photo_json());
        let page: PhotoSearchResponse = serde_json::from_str(&body).unwrap();

        assert!(normalize_page(&RawPage::Photos(page)).is_err());
    }

    #[test]
    fn test_page_keeps_order_and_drops_duplicate_ids() {
        let body = r#"{"videos": [
            {"id": 3, "image": "p3", "video_files": [{"quality": "sd", "link": "v3"}]},
            {"id": 1, "image": "p1", "video_files": [{"quality": "sd", "link": "v1"}]},
            {"id": 3, "image": "p3b", "video_files": [{"quality": "sd", "link": "v3b"}]}
        ]}"#;
        let page: VideoSearchResponse = serde_json::from_str(body).unwrap();
        let items = normalize_page(&RawPage::Videos(page)).unwrap();

        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(items[0].preview_url, "p3");
    }
}

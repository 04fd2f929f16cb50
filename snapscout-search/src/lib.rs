//! Snapscout Search - Media provider adapters and result normalization

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Talks to the photo (Unsplash) and video (Pexels) search APIs and maps
//! their records into one `MediaItem` shape for the session layer.

pub mod errors;
pub mod normalize;
pub mod providers;
pub mod raw;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::SearchError;
pub use normalize::{normalize_page, normalize_photo, normalize_video};
pub use providers::MediaProvider;
pub use raw::RawPage;
pub use service::MediaSearchService;
pub use types::{MediaItem, MediaKind, SearchRequest};

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;

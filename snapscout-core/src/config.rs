//! Centralized configuration for Snapscout.
//!
//! Provider endpoints, credentials and request tuning live here so the
//! adapters and the session controller never hard-code them.

use std::time::Duration;

use crate::{Result, SnapscoutError};

/// Largest page size either provider accepts.
const MAX_PER_PAGE: u32 = 80;

/// Central configuration for all Snapscout components.
#[derive(Debug, Clone, Default)]
pub struct SnapscoutConfig {
    pub providers: ProvidersConfig,
    pub network: NetworkConfig,
    pub search: SearchConfig,
}

/// Endpoints and credentials for the two media backends.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    /// Photo search backend (Unsplash API shape)
    pub photo: ProviderConfig,
    /// Video search backend (Pexels API shape)
    pub video: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            photo: ProviderConfig::new("https://api.unsplash.com"),
            video: ProviderConfig::new("https://api.pexels.com"),
        }
    }
}

/// Connection settings for a single provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Base URL without trailing path, e.g. `https://api.unsplash.com`
    pub base_url: String,
    /// Static client credential sent as a request header
    pub api_key: String,
}

impl ProviderConfig {
    /// Creates a provider config with an empty credential.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: String::new(),
        }
    }

    /// Builder: attach a credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Whether a credential has been configured.
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.has_credential() { "<set>" } else { "<empty>" })
            .finish()
    }
}

/// HTTP client configuration shared by both adapters.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Per-request timeout; a timed out request surfaces as a network error
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            user_agent: "snapscout/0.1.0",
        }
    }
}

/// What happens to the visible results when the active tab changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabSwitchPolicy {
    /// Previous tab's results stay visible (stale) until the new fetch settles
    #[default]
    KeepResults,
    /// Results are emptied as soon as the new tab's fetch is issued
    ClearResults,
}

/// Search behaviour knobs.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Results requested per fetch
    pub per_page: u32,
    pub tab_switch: TabSwitchPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_page: 20,
            tab_switch: TabSwitchPolicy::KeepResults,
        }
    }
}

impl SnapscoutConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Credentials are read from `SNAPSCOUT_PHOTO_API_KEY` and
    /// `SNAPSCOUT_VIDEO_API_KEY`, falling back to `UNSPLASH_ACCESS_KEY` and
    /// `PEXELS_API_KEY`. Unparsable numeric values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(key) = env_first(&["SNAPSCOUT_PHOTO_API_KEY", "UNSPLASH_ACCESS_KEY"]) {
            config.providers.photo.api_key = key;
        }

        if let Some(key) = env_first(&["SNAPSCOUT_VIDEO_API_KEY", "PEXELS_API_KEY"]) {
            config.providers.video.api_key = key;
        }

        if let Ok(url) = std::env::var("SNAPSCOUT_PHOTO_BASE_URL") {
            config.providers.photo.base_url = url;
        }

        if let Ok(url) = std::env::var("SNAPSCOUT_VIDEO_BASE_URL") {
            config.providers.video.base_url = url;
        }

        if let Ok(timeout) = std::env::var("SNAPSCOUT_REQUEST_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.network.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(per_page) = std::env::var("SNAPSCOUT_PER_PAGE") {
            if let Ok(count) = per_page.parse::<u32>() {
                config.search.per_page = count;
            }
        }

        config
    }

    /// Creates a configuration for tests: dummy credentials, short timeout.
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config.providers.photo.api_key = "test-photo-key".to_string();
        config.providers.video.api_key = "test-video-key".to_string();
        config.network.request_timeout = Duration::from_secs(2);
        config
    }

    /// Checks that the configuration can be used to build provider clients.
    ///
    /// Missing credentials are not rejected here; the adapters report them
    /// as authentication failures so the user sees them per request.
    ///
    /// # Errors
    /// - `SnapscoutError::Configuration` - Bad base URL, zero timeout or
    ///   page size out of range
    pub fn validate(&self) -> Result<()> {
        for (name, provider) in [
            ("photo", &self.providers.photo),
            ("video", &self.providers.video),
        ] {
            let parsed =
                url::Url::parse(&provider.base_url).map_err(|e| SnapscoutError::Configuration {
                    reason: format!("{name} base URL '{}': {e}", provider.base_url),
                })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(SnapscoutError::Configuration {
                    reason: format!("{name} base URL must be http(s), got '{}'", parsed.scheme()),
                });
            }
        }

        if self.network.request_timeout.is_zero() {
            return Err(SnapscoutError::Configuration {
                reason: "request timeout must be greater than zero".to_string(),
            });
        }

        if !(1..=MAX_PER_PAGE).contains(&self.search.per_page) {
            return Err(SnapscoutError::Configuration {
                reason: format!(
                    "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                    self.search.per_page
                ),
            });
        }

        Ok(())
    }
}

fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

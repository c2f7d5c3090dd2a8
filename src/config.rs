//! Client configuration.
//!
//! Use the builder methods to customize a [`ClientConfig`]:
//!
//! ```ignore
//! use flickr_watch::config::{ClientConfig, OAuthConfig};
//!
//! let config = ClientConfig::new("60950751@N04", OAuthConfig::new("key", "secret"))
//!     .with_use_cache(true)
//!     .with_max_retries(5);
//! ```

use std::time::Duration;

use crate::constants::{SizeUrl, API_BASE_URL};

/// Default number of retries for a failed request.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default wait before retrying a failed request.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Default number of cached responses.
pub const DEFAULT_MAX_CACHE_SIZE: usize = 200;

/// OAuth access token obtained out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub secret: String,
}

/// OAuth application credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthConfig {
    /// https://www.flickr.com/services/api/misc.api_keys.html
    pub api_key: String,
    pub secret: String,
    pub callback: Option<String>,
    /// Required only for signed calls.
    pub token: Option<AccessToken>,
}

impl OAuthConfig {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
            callback: None,
            token: None,
        }
    }

    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>, secret: impl Into<String>) -> Self {
        self.token = Some(AccessToken {
            token: token.into(),
            secret: secret.into(),
        });
        self
    }
}

/// Configuration for [`FlickrClient`](crate::client::FlickrClient) and the
/// request envelope it drives.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_id: String,
    pub app_id: String,
    /// Scheme and host, overridable for tests
    pub base_url: String,
    /// Whether to cache API results
    pub use_cache: bool,
    /// Maximum number of responses to cache
    pub max_cache_size: usize,
    /// Optional set IDs to exclude from results
    pub exclude_sets: Vec<String>,
    /// Optional tags to exclude from tag request
    pub exclude_tags: Vec<String>,
    /// Photo sizes to return from search request
    pub search_photo_sizes: Vec<SizeUrl>,
    /// Photo sizes to return for photo set request
    pub set_photo_sizes: Vec<SizeUrl>,
    /// Number of times to retry failed requests
    pub max_retries: u32,
    /// Wait before retrying a failed request
    pub retry_delay: Duration,
    /// Keep polling when a single re-fetch fails instead of abandoning the cycle
    pub isolate_poll_failures: bool,
    pub auth: OAuthConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            app_id: String::new(),
            base_url: API_BASE_URL.to_string(),
            use_cache: false,
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            exclude_sets: Vec::new(),
            exclude_tags: Vec::new(),
            search_photo_sizes: vec![SizeUrl::Large1024],
            set_photo_sizes: vec![SizeUrl::Large1024],
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            isolate_poll_failures: false,
            auth: OAuthConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(user_id: impl Into<String>, auth: OAuthConfig) -> Self {
        Self {
            user_id: user_id.into(),
            auth,
            ..Self::default()
        }
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn with_max_cache_size(mut self, size: usize) -> Self {
        self.max_cache_size = size;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_set_photo_sizes(mut self, sizes: Vec<SizeUrl>) -> Self {
        self.set_photo_sizes = sizes;
        self
    }

    pub fn with_search_photo_sizes(mut self, sizes: Vec<SizeUrl>) -> Self {
        self.search_photo_sizes = sizes;
        self
    }

    pub fn with_exclude_sets(mut self, ids: Vec<String>) -> Self {
        self.exclude_sets = ids;
        self
    }

    pub fn with_exclude_tags(mut self, tags: Vec<String>) -> Self {
        self.exclude_tags = tags;
        self
    }

    pub fn with_isolate_poll_failures(mut self, isolate: bool) -> Self {
        self.isolate_poll_failures = isolate;
        self
    }

    /// Build configuration from `FLICKR_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let mut auth = OAuthConfig::new(
            var("FLICKR_API_KEY").unwrap_or_default(),
            var("FLICKR_SECRET").unwrap_or_default(),
        );
        if let (Some(token), Some(secret)) = (var("FLICKR_ACCESS_TOKEN"), var("FLICKR_TOKEN_SECRET")) {
            auth = auth.with_token(token, secret);
        }

        let mut config = Self::new(var("FLICKR_USER_ID").unwrap_or_default(), auth)
            .with_app_id(var("FLICKR_APP_ID").unwrap_or_default())
            .with_use_cache(matches!(
                var("FLICKR_USE_CACHE").as_deref(),
                Some("1") | Some("true")
            ));

        if let Some(url) = var("FLICKR_BASE_URL") {
            config = config.with_base_url(url);
        }
        config
    }
}

//! Request envelope: cache lookup, dispatch, classification and retry for
//! every Flickr method call.
//!
//! # Flow
//!
//! 1. If both the request and the configuration allow caching, a cache hit
//!    is returned without touching the network. Cache read errors are logged
//!    and fall through.
//! 2. The URL is built with [`parameterize`] and fetched, OAuth signed when
//!    the request asks for it.
//! 3. The body is [`classify`]-ed. Success runs the request's selector;
//!    authoritative failures end the call; transient failures and transport
//!    errors go through the [`RetryTracker`].
//! 4. A selected result is decoded into the caller's type and written back
//!    to the cache when allowed.

pub mod classify;
pub mod oauth;
pub mod request;
pub mod retry;

pub use classify::{classify, Classified};
pub use oauth::OAuthSigner;
pub use request::{parameterize, Identity, Request};
pub use retry::{RetryDecision, RetryTracker};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::constants::REST_PATH;
use crate::error::{ApiError, ApiResult};
use crate::traits::cache::cache_key;
use crate::traits::{Headers, HttpClient, ResponseCache};

/// Outcome of one HTTP attempt before retry handling.
enum Attempt {
    Selected(Value),
    Terminal(ApiError),
    Retryable(ApiError),
}

/// Performs API calls on behalf of the client.
pub struct ApiEnvelope {
    http: Arc<dyn HttpClient>,
    cache: Option<Arc<dyn ResponseCache>>,
    retries: RetryTracker,
    config: Arc<ClientConfig>,
}

impl ApiEnvelope {
    pub fn new(
        http: Arc<dyn HttpClient>,
        cache: Option<Arc<dyn ResponseCache>>,
        config: Arc<ClientConfig>,
    ) -> Self {
        Self {
            http,
            cache,
            retries: RetryTracker::new(config.max_retries, config.retry_delay),
            config,
        }
    }

    pub fn retries(&self) -> &RetryTracker {
        &self.retries
    }

    pub fn cache(&self) -> Option<&Arc<dyn ResponseCache>> {
        self.cache.as_ref()
    }

    /// Full URL for a method call.
    pub fn url(&self, method: &str, identity: &Identity, request: &Request) -> String {
        format!(
            "{}{}{}",
            self.config.base_url,
            REST_PATH,
            parameterize(method, Some(identity), &request.params, &self.config.auth.api_key)
        )
    }

    /// Load the result from cache or call the API.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        identity: &Identity,
        request: &Request,
    ) -> ApiResult<T> {
        let key = cache_key(method, &identity.value);
        let cache = self
            .cache
            .as_ref()
            .filter(|_| request.allow_cache && self.config.use_cache);

        if let Some(cache) = cache {
            match cache.get(&key).await {
                Ok(Some(value)) => match serde_json::from_value::<T>(value) {
                    Ok(hit) => {
                        debug!(key = %key, "Cache hit");
                        return Ok(hit);
                    }
                    Err(e) => error!(method, id = %identity.value, error = %e, "Cached value did not decode"),
                },
                Ok(None) => {}
                Err(e) => error!(method, id = %identity.value, error = %e, "Cache read failed"),
            }
        }

        let value = self.call_api(method, identity, request).await?;
        let parsed = serde_json::from_value::<T>(value.clone()).map_err(|e| ApiError::Decode {
            method: method.to_string(),
            message: e.to_string(),
        })?;

        if let Some(cache) = cache {
            cache.add(&key, value);
        }
        Ok(parsed)
    }

    /// Invoke the remote API, retrying transient failures, and return the
    /// selected part of the response.
    ///
    /// See http://www.flickr.com/services/api/response.json.html
    pub async fn call_api(
        &self,
        method: &str,
        identity: &Identity,
        request: &Request,
    ) -> ApiResult<Value> {
        let key = cache_key(method, &identity.value);
        let url = self.url(method, identity, request);

        loop {
            let failure = match self.attempt(&key, &url, method, request).await {
                Attempt::Selected(value) => return Ok(value),
                Attempt::Terminal(err) => {
                    return Err(match err {
                        ApiError::Failed { retryable: false, message, .. }
                            if message.contains("not found") =>
                        {
                            ApiError::NotFound {
                                method: method.to_string(),
                                id_type: identity.id_type,
                                id: identity.value.clone(),
                            }
                        }
                        other => other,
                    })
                }
                Attempt::Retryable(err) => err,
            };

            match self.retries.record_failure(&key) {
                RetryDecision::Retry { delay, .. } => {
                    debug!(key = %key, error = %failure, "Retrying after {:?}", delay);
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::Abandon { attempts } => {
                    return Err(ApiError::RetryExhausted {
                        method: method.to_string(),
                        id_type: identity.id_type,
                        id: identity.value.clone(),
                        attempts,
                    })
                }
            }
        }
    }

    async fn attempt(&self, key: &str, url: &str, method: &str, request: &Request) -> Attempt {
        let mut headers = Headers::new();
        if request.sign {
            let signed = OAuthSigner::from_config(&self.config.auth)
                .and_then(|signer| signer.authorization_header(url));
            match signed {
                Ok(header) => {
                    headers.insert("Authorization".to_string(), header);
                }
                Err(e) => return Attempt::Terminal(e),
            }
        }

        let body = match self.http.get(url, &headers).await {
            Ok(response) => {
                if !response.is_success() {
                    debug!(url, status = response.status, "Non-success status, classifying body");
                }
                response.text().ok()
            }
            Err(e) => {
                error!(url, error = %e, "Request failed");
                return Attempt::Retryable(ApiError::Transport {
                    url: url.to_string(),
                    source: e,
                });
            }
        };

        match classify(body.as_deref(), key) {
            Classified::Ok(json) => {
                self.retries.record_success(key);
                match request.select(&json) {
                    Some(selected) => Attempt::Selected(selected.clone()),
                    None => Attempt::Terminal(ApiError::SelectorMismatch {
                        method: method.to_string(),
                        field: request.select.to_string(),
                    }),
                }
            }
            Classified::Failed { retryable, message } => {
                let err = ApiError::Failed {
                    key: key.to_string(),
                    message,
                    retryable,
                };
                if retryable {
                    Attempt::Retryable(err)
                } else {
                    Attempt::Terminal(err)
                }
            }
        }
    }
}

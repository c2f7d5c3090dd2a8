//! Flickr API client with change subscription.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::debug;

use crate::adapters::{MemoryCache, ReqwestHttpClient};
use crate::api::{ApiEnvelope, Identity, Request};
use crate::config::ClientConfig;
use crate::constants::{join, method, Extra, Sort};
use crate::error::{ApiError, ApiResult};
use crate::models::{Collection, Exif, MemberSet, PhotoInfo, PhotoSummary, SetInfo, SetPhotos, Size, Tag};
use crate::subscription::{ChangeSubscription, DEFAULT_POLL_INTERVAL};
use crate::traits::cache::cache_key;
use crate::traits::{HttpClient, ResponseCache, WatchSource};
use crate::watch::Changes;

/// Extras requested with set photos when the caller names none.
const DEFAULT_SET_EXTRAS: [Extra; 6] = [
    Extra::Description,
    Extra::Tags,
    Extra::DateTaken,
    Extra::DateUpdated,
    Extra::Location,
    Extra::PathAlias,
];

/// Maximum page size for `photos.search`.
const SEARCH_PAGE_SIZE: u32 = 500;

/// Client for the Flickr REST API.
///
/// Every set and collection retrieved through the client is recorded in its
/// [`ChangeSubscription`]. Adding a subscriber starts polling for changes.
pub struct FlickrClient {
    config: Arc<ClientConfig>,
    api: ApiEnvelope,
    subscription: Arc<ChangeSubscription>,
    invalidation_wired: AtomicBool,
}

impl FlickrClient {
    /// Create a client using reqwest for transport.
    pub fn new(config: ClientConfig) -> Arc<Self> {
        Self::with_http(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Create a client with a custom transport. A [`MemoryCache`] holding
    /// up to `max_cache_size` results is created when caching is enabled.
    pub fn with_http(config: ClientConfig, http: Arc<dyn HttpClient>) -> Arc<Self> {
        let cache = config.use_cache.then(|| {
            Arc::new(MemoryCache::new(config.max_cache_size)) as Arc<dyn ResponseCache>
        });
        Self::with_parts(config, http, cache)
    }

    pub fn with_parts(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        cache: Option<Arc<dyn ResponseCache>>,
    ) -> Arc<Self> {
        let config = Arc::new(config);
        if let Some(cache) = &cache {
            cache.set_capacity(config.max_cache_size);
        }

        Arc::new_cyclic(|client: &Weak<FlickrClient>| {
            let source: Weak<dyn WatchSource> = client.clone();
            Self {
                api: ApiEnvelope::new(http, cache, config.clone()),
                subscription: ChangeSubscription::new(source, config.isolate_poll_failures),
                config,
                invalidation_wired: AtomicBool::new(false),
            }
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn subscription(&self) -> &Arc<ChangeSubscription> {
        &self.subscription
    }

    pub fn cache(&self) -> Option<&Arc<dyn ResponseCache>> {
        self.api.cache()
    }

    fn user_id(&self) -> Identity {
        Identity::user(self.config.user_id.clone())
    }

    async fn api<T: DeserializeOwned>(
        &self,
        method: &str,
        identity: Identity,
        request: Request,
    ) -> ApiResult<T> {
        self.api.call(method, &identity, &request).await
    }

    /// Receive change notifications. This also starts change polling at the
    /// default interval.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Changes) + Send + Sync + 'static,
    {
        self.subscribe_with_interval(callback, DEFAULT_POLL_INTERVAL);
    }

    pub fn subscribe_with_interval<F>(&self, callback: F, poll_interval: Duration)
    where
        F: Fn(&Changes) + Send + Sync + 'static,
    {
        self.wire_cache_invalidation();
        self.subscription.add(callback, poll_interval);
    }

    /// Stop change polling.
    pub fn stop_polling(&self) {
        self.subscription.stop();
    }

    /// Once there is a subscriber, remove cached results that a detected
    /// change made stale.
    fn wire_cache_invalidation(&self) {
        if !self.config.use_cache || self.invalidation_wired.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(cache) = self.api.cache().cloned() else {
            return;
        };
        let user_id = self.config.user_id.clone();

        self.subscription.listen(move |changes: &Changes| {
            if !changes.collections.is_empty() {
                cache.remove(&cache_key(method::COLLECTIONS, &user_id));
            }
            for id in &changes.sets {
                cache.remove(&cache_key(method::set::INFO, id));
                cache.remove(&cache_key(method::set::PHOTOS, id));
            }
            debug!(sets = changes.sets.len(), "Removed changed results from cache");
        });
    }

    /// See https://www.flickr.com/services/api/flickr.collections.getTree.html
    pub async fn get_collections(&self, allow_cache: bool) -> ApiResult<Vec<Collection>> {
        let collections: Vec<Collection> = self
            .api(
                method::COLLECTIONS,
                self.user_id(),
                Request::new("/collections/collection").allow_cache(allow_cache),
            )
            .await?;

        self.subscription.update_collections(&collections);
        Ok(collections)
    }

    /// See https://www.flickr.com/services/api/flickr.photosets.getInfo.html
    pub async fn get_set_info(&self, id: &str, allow_cache: bool) -> ApiResult<SetInfo> {
        let info: SetInfo = self
            .api(
                method::set::INFO,
                Identity::set(id),
                Request::new("/photoset").allow_cache(allow_cache),
            )
            .await?;

        let set_id = if info.id.is_empty() { id } else { info.id.as_str() };
        self.subscription.record_set_timestamp(set_id, info.last_update());
        Ok(info)
    }

    /// All photos in a set. With no `extras`, a default list including update
    /// times and the configured set photo sizes is requested, which enables
    /// photo level change detection.
    ///
    /// See https://www.flickr.com/services/api/flickr.photosets.getPhotos.html
    pub async fn get_set_photos(
        &self,
        id: &str,
        extras: &[Extra],
        allow_cache: bool,
    ) -> ApiResult<SetPhotos> {
        let extras = if extras.is_empty() {
            join(
                DEFAULT_SET_EXTRAS
                    .iter()
                    .map(Extra::as_str)
                    .chain(self.config.set_photo_sizes.iter().map(|s| s.as_str())),
            )
        } else {
            join(extras.iter().map(Extra::as_str))
        };

        let photos: SetPhotos = self
            .api(
                method::set::PHOTOS,
                Identity::set(id),
                Request::new("/photoset")
                    .param("extras", extras)
                    .allow_cache(allow_cache),
            )
            .await?;

        self.subscription.record_set_photos(id, &photos);
        Ok(photos)
    }

    /// See https://www.flickr.com/services/api/flickr.photos.getInfo.html
    pub async fn get_photo_info(&self, id: &str) -> ApiResult<PhotoInfo> {
        self.api(
            method::photo::INFO,
            Identity::photo(id),
            Request::new("/photo").allow_cache(true),
        )
        .await
    }

    /// See https://www.flickr.com/services/api/flickr.photos.getSizes.html
    pub async fn get_photo_sizes(&self, id: &str) -> ApiResult<Vec<Size>> {
        self.api(method::photo::SIZES, Identity::photo(id), Request::new("/sizes/size"))
            .await
    }

    /// Sets the photo belongs to, leaving out configured excluded sets.
    ///
    /// See https://www.flickr.com/services/api/flickr.photos.getAllContexts.html
    pub async fn get_photo_context(&self, id: &str) -> ApiResult<Vec<MemberSet>> {
        let sets: Vec<MemberSet> = self
            .api(method::photo::SETS, Identity::photo(id), Request::new("/set"))
            .await?;

        Ok(sets
            .into_iter()
            .filter(|s| !self.config.exclude_sets.contains(&s.id))
            .collect())
    }

    /// See https://www.flickr.com/services/api/flickr.photos.getExif.html
    pub async fn get_exif(&self, id: &str) -> ApiResult<Vec<Exif>> {
        self.api(
            method::photo::EXIF,
            Identity::photo(id),
            Request::new("/photo/exif").allow_cache(true),
        )
        .await
    }

    /// Search the user's photos by tag, most relevant first.
    ///
    /// Signed because results differ from unsigned calls even for public
    /// photos.
    ///
    /// See https://www.flickr.com/services/api/flickr.photos.search.html
    pub async fn photo_search<S: AsRef<str>>(&self, tags: &[S]) -> ApiResult<Vec<PhotoSummary>> {
        let request = Request::new("/photos/photo")
            .param("extras", join(self.config.search_photo_sizes.iter().map(|s| s.as_str())))
            .param("tags", join(tags))
            .param("sort", Sort::Relevance.as_str())
            .param("per_page", SEARCH_PAGE_SIZE)
            .signed();

        self.api(method::photo::SEARCH, self.user_id(), request).await
    }

    /// All tags the user has applied, leaving out configured excluded tags.
    ///
    /// See https://www.flickr.com/services/api/flickr.tags.getListUserRaw.html
    pub async fn get_all_photo_tags(&self) -> ApiResult<Vec<Tag>> {
        let tags: Vec<Tag> = self
            .api(
                method::photo::TAGS,
                self.user_id(),
                Request::new("/who/tags/tag").signed().allow_cache(true),
            )
            .await?;

        Ok(tags
            .into_iter()
            .filter(|t| !self.config.exclude_tags.contains(&t.clean))
            .collect())
    }
}

#[async_trait]
impl WatchSource for FlickrClient {
    async fn refresh_set_info(&self, set_id: &str) -> Result<(), ApiError> {
        self.get_set_info(set_id, false).await.map(|_| ())
    }

    async fn refresh_set_photos(&self, set_id: &str) -> Result<(), ApiError> {
        self.get_set_photos(set_id, &[Extra::DateUpdated], false)
            .await
            .map(|_| ())
    }

    async fn refresh_collections(&self) -> Result<(), ApiError> {
        self.get_collections(false).await.map(|_| ())
    }
}

//! Mock poll source for testing the change poller without HTTP.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::ApiError;
use crate::traits::WatchSource;

/// [`WatchSource`] that records calls and fails on request.
///
/// By default every refresh succeeds without touching any subscription.
#[derive(Debug, Clone, Default)]
pub struct MockWatchSource {
    calls: Arc<Mutex<HashMap<String, usize>>>,
    collections_refreshed: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<ApiError>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockWatchSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent collection refresh fail with `error`.
    pub fn fail_with(&self, error: ApiError) {
        *lock(&self.failure) = Some(error);
    }

    /// Make refreshes succeed again.
    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    /// Number of times `refresh_collections` ran.
    pub fn collection_refreshes(&self) -> usize {
        self.collections_refreshed.load(Ordering::SeqCst)
    }

    /// Number of info plus photo refreshes for one set.
    pub fn set_refreshes(&self, set_id: &str) -> usize {
        lock(&self.calls).get(set_id).copied().unwrap_or(0)
    }

    fn record(&self, set_id: &str) {
        *lock(&self.calls).entry(set_id.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl WatchSource for MockWatchSource {
    async fn refresh_set_info(&self, set_id: &str) -> Result<(), ApiError> {
        self.record(set_id);
        Ok(())
    }

    async fn refresh_set_photos(&self, set_id: &str) -> Result<(), ApiError> {
        self.record(set_id);
        Ok(())
    }

    async fn refresh_collections(&self) -> Result<(), ApiError> {
        self.collections_refreshed.fetch_add(1, Ordering::SeqCst);
        match lock(&self.failure).clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

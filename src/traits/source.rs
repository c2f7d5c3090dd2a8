//! Re-fetch source used by the change poller.

use async_trait::async_trait;

use crate::error::ApiError;

/// Operations the change poller issues on every poll cycle.
///
/// Each call bypasses the response cache and, on success, feeds its result
/// back into the [`ChangeSubscription`](crate::subscription::ChangeSubscription)
/// so that differences accumulate before the cycle emits.
/// [`FlickrClient`](crate::client::FlickrClient) is the production
/// implementation.
#[async_trait]
pub trait WatchSource: Send + Sync {
    /// Re-fetch set info and record its update timestamp.
    async fn refresh_set_info(&self, set_id: &str) -> Result<(), ApiError>;

    /// Re-fetch set photos with update timestamps and record the snapshot.
    async fn refresh_set_photos(&self, set_id: &str) -> Result<(), ApiError>;

    /// Re-fetch the full collection tree and record set membership.
    async fn refresh_collections(&self) -> Result<(), ApiError>;
}

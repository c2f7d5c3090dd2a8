//! Background poll loop.
//!
//! The next cycle is scheduled only after the previous one has settled, so
//! a slow cycle never overlaps the next.

use std::sync::Weak;

use futures::future::{join_all, try_join_all, BoxFuture};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::ChangeSubscription;
use crate::error::ApiError;

pub(super) fn spawn(subscription: Weak<ChangeSubscription>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let interval = match subscription.upgrade() {
                Some(sub) => sub.poll_interval(),
                None => break,
            };
            tokio::time::sleep(interval).await;

            let Some(sub) = subscription.upgrade() else {
                break;
            };
            match sub.query_change().await {
                Ok(()) => sub.emit_change(),
                Err(e) => {
                    error!(error = %e, code = e.error_code(), "Change polling stopped");
                    break;
                }
            }
        }
        debug!("Poll loop exited");
    })
}

impl ChangeSubscription {
    /// Re-fetch every fetched set and the collection tree, bypassing the
    /// cache. Results flow back through the record methods.
    async fn query_change(&self) -> Result<(), ApiError> {
        let Some(source) = self.source.upgrade() else {
            return Ok(());
        };
        let ids = self.state().store.polled_ids();
        debug!(sets = ids.len(), "Querying for changes");

        let mut fetches: Vec<BoxFuture<'_, Result<(), ApiError>>> =
            Vec::with_capacity(ids.len() * 2 + 1);
        for id in &ids {
            fetches.push(source.refresh_set_info(id));
        }
        for id in &ids {
            fetches.push(source.refresh_set_photos(id));
        }
        fetches.push(source.refresh_collections());

        if !self.isolate_failures {
            return try_join_all(fetches).await.map(|_| ());
        }

        for result in join_all(fetches).await {
            if let Err(e) = result {
                warn!(error = %e, code = e.error_code(), "Re-fetch failed; continuing poll");
            }
        }
        Ok(())
    }
}

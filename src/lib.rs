//! Flickr Watch - a Flickr API client that polls for changes to collections,
//! sets and photos
//!
//! Flickr offers no push notifications. [`FlickrClient`] records every set and
//! collection it retrieves and, once something subscribes, re-fetches them on
//! an interval and reports what changed.
//!
//! ```ignore
//! use flickr_watch::{ClientConfig, FlickrClient};
//!
//! let client = FlickrClient::new(ClientConfig::from_env());
//! client.get_collections(true).await?;
//! client.subscribe(|changes| println!("changed sets: {:?}", changes.sets));
//! ```

pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod subscription;
pub mod traits;
pub mod watch;

pub use client::FlickrClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use subscription::{ChangeSubscription, SubscriptionEvent};
pub use watch::Changes;

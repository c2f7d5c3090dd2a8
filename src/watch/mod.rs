//! In-memory model of what is being watched, and the diff engine that
//! compares successive snapshots of it.

pub mod changes;
pub mod diff;
pub mod store;

pub use changes::Changes;
pub use diff::{
    has_changed, list_difference, map_leaf_timestamps, map_set_collections, SetCollections,
    WatchMap, WatchedItem,
};
pub use store::{WatchStore, WatchedSet};

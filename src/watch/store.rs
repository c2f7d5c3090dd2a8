//! Registry of watched sets.
//!
//! Every update method returns the [`Changes`] it detected; accumulation
//! across calls is left to the caller.

use std::collections::HashMap;

use super::changes::Changes;
use super::diff::{add_unique, has_changed, list_difference, map_set_collections, WatchMap};
use crate::models::Collection;

/// A set being watched for changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchedSet {
    /// 0 until the set itself has been fetched
    pub last_update: i64,
    /// Collections containing the set, directly or through an ancestor
    pub collections: Vec<String>,
    /// Photos from the last successful photo listing
    pub photos: WatchMap,
}

/// Set id to [`WatchedSet`]. Entries are created on first reference and
/// never removed.
#[derive(Debug, Clone, Default)]
pub struct WatchStore {
    sets: HashMap<String, WatchedSet>,
}

impl WatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WatchedSet> {
        self.sets.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &WatchedSet)> {
        self.sets.iter()
    }

    /// Watched set, created empty if this is the first reference.
    pub fn entry(&mut self, id: &str) -> &mut WatchedSet {
        self.sets.entry(id.to_string()).or_default()
    }

    /// Ids of sets that have been fetched directly. Sets only known from the
    /// collection tree are placeholders and are left out.
    pub fn polled_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .sets
            .iter()
            .filter(|(_, s)| s.last_update > 0)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Record the full collection tree.
    ///
    /// Nothing is compared on the first load, when no set was watched yet.
    /// Afterwards every set whose membership differs contributes the
    /// differing collection ids, and is itself reported if it was fetched
    /// before. A set that dropped out of the tree entirely is reported
    /// against the collections it used to belong to.
    pub fn update_collections(&mut self, collections: &[Collection]) -> Changes {
        let sets = map_set_collections(collections);
        let compare = !self.sets.is_empty();
        let mut collection_diff = Vec::new();
        let mut changed_sets = Vec::new();

        for (id, membership) in sets.iter() {
            let watched = self.entry(id);

            if compare {
                let diff = list_difference(membership, &watched.collections);
                if !diff.is_empty() {
                    add_unique(&mut collection_diff, &diff);
                    if watched.last_update > 0 {
                        changed_sets.push(id.clone());
                    }
                }
            }
            watched.collections = membership.clone();
        }

        if compare {
            let mut removed: Vec<(&String, &mut WatchedSet)> = self
                .sets
                .iter_mut()
                .filter(|(id, s)| !sets.contains_key(*id) && !s.collections.is_empty())
                .collect();
            removed.sort_by(|a, b| a.0.cmp(b.0));

            for (id, watched) in removed {
                changed_sets.push(id.clone());
                add_unique(&mut collection_diff, &watched.collections);
                // reported once; membership is now empty
                watched.collections.clear();
            }
        }

        if collection_diff.is_empty() {
            return Changes::new();
        }
        Changes {
            sets: changed_sets,
            collections: collection_diff,
        }
    }

    /// Record the set's own update time.
    ///
    /// When `compare` is set, a strictly newer time than a known previous
    /// one is a change.
    pub fn record_timestamp(&mut self, id: &str, last_update: i64, compare: bool) -> Changes {
        let watched = self.entry(id);
        let changed = compare && watched.last_update != 0 && last_update > watched.last_update;
        watched.last_update = last_update;

        Self::changes_for(id, watched, changed)
    }

    /// Replace the set's photo snapshot.
    ///
    /// When `compare` is set and a previous snapshot exists, any difference
    /// reported by [`has_changed`] is a change.
    pub fn record_photos(&mut self, id: &str, photos: WatchMap, compare: bool) -> Changes {
        let watched = self.entry(id);
        let changed =
            compare && !watched.photos.is_empty() && has_changed(&watched.photos, &photos);
        watched.photos = photos;

        Self::changes_for(id, watched, changed)
    }

    fn changes_for(id: &str, watched: &WatchedSet, changed: bool) -> Changes {
        let mut changes = Changes::new();
        if changed {
            changes.push_set(id, &watched.collections);
        }
        changes
    }
}

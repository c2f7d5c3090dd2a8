//! Pure comparison of watched snapshots.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Collection, PhotoSummary};

/// Last observed modification time of a leaf entity.
///
/// A `last_update` of 0 means the entity is known to exist but has not been
/// fetched directly, so it is never considered stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchedItem {
    pub last_update: i64,
}

impl WatchedItem {
    pub fn new(last_update: i64) -> Self {
        Self { last_update }
    }
}

/// Snapshot of leaf entities keyed by id.
pub type WatchMap = HashMap<String, WatchedItem>;

/// Set ids mapped to every collection that contains them, directly or
/// through an ancestor.
pub type SetCollections = BTreeMap<String, Vec<String>>;

/// Project photos into a [`WatchMap`].
///
/// Only meaningful when the listing was requested with the `last_update`
/// extra. Missing or unparseable timestamps become 0.
pub fn map_leaf_timestamps(photos: &[PhotoSummary]) -> WatchMap {
    photos
        .iter()
        .map(|p| {
            let last_update = p
                .lastupdate
                .as_deref()
                .and_then(|t| t.trim().parse().ok())
                .unwrap_or(0);
            (p.id.clone(), WatchedItem::new(last_update))
        })
        .collect()
}

/// Whether `newer` differs from `older`: a different number of entries, a
/// missing entry, or a newer update time for an entry whose older time was
/// known.
pub fn has_changed(older: &WatchMap, newer: &WatchMap) -> bool {
    if older.len() != newer.len() {
        return true;
    }

    older.iter().any(|(id, old)| match newer.get(id) {
        None => true,
        Some(new) => old.last_update != 0 && old.last_update < new.last_update,
    })
}

/// Map every set in the collection tree to the unique list of collections
/// containing it. The immediate parent comes first, then its ancestors.
pub fn map_set_collections(collections: &[Collection]) -> SetCollections {
    let mut sets = SetCollections::new();
    walk(collections, &mut sets, &[]);
    sets
}

fn walk(collections: &[Collection], sets: &mut SetCollections, parents: &[String]) {
    for c in collections {
        for s in &c.set {
            let ids = sets.entry(s.id.clone()).or_default();
            add_unique(ids, std::iter::once(&c.id).chain(parents));
        }

        if !c.collection.is_empty() {
            let mut chain = Vec::with_capacity(parents.len() + 1);
            chain.push(c.id.clone());
            chain.extend_from_slice(parents);
            walk(&c.collection, sets, &chain);
        }
    }
}

/// Append each value not already present, keeping first-seen order.
pub(crate) fn add_unique<'a, I>(list: &mut Vec<String>, values: I)
where
    I: IntoIterator<Item = &'a String>,
{
    for v in values {
        if !list.contains(v) {
            list.push(v.clone());
        }
    }
}

/// Values present in exactly one of the two lists.
pub fn list_difference(a: &[String], b: &[String]) -> Vec<String> {
    let mut diff: Vec<String> = a.iter().filter(|v| !b.contains(v)).cloned().collect();
    diff.extend(b.iter().filter(|v| !a.contains(v)).cloned());
    diff
}

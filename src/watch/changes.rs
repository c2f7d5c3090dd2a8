use serde::{Deserialize, Serialize};

use super::diff::add_unique;

/// Set and collection ids that were added, removed or changed since the
/// last emission.
///
/// Duplicates are allowed while accumulating; [`deduped`](Self::deduped)
/// is applied before the value is handed to listeners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    pub sets: Vec<String>,
    pub collections: Vec<String>,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty() && self.collections.is_empty()
    }

    /// Record a changed set along with the collections containing it.
    pub fn push_set(&mut self, id: &str, collections: &[String]) {
        self.sets.push(id.to_string());
        self.collections.extend_from_slice(collections);
    }

    pub fn merge(&mut self, other: Changes) {
        self.sets.extend(other.sets);
        self.collections.extend(other.collections);
    }

    /// Copy without duplicates, keeping first-seen order.
    pub fn deduped(&self) -> Changes {
        let mut out = Changes::new();
        add_unique(&mut out.sets, &self.sets);
        add_unique(&mut out.collections, &self.collections);
        out
    }
}

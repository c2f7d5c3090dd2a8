use serde::{Deserialize, Serialize};

/// A node of the `collections.getTree` result. Collections nest other
/// collections and list member sets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub iconlarge: String,
    #[serde(default)]
    pub iconsmall: String,
    /// Child collections
    #[serde(default)]
    pub collection: Vec<Collection>,
    /// Member sets
    #[serde(default)]
    pub set: Vec<SetSummary>,
}

impl Collection {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_sets<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set.extend(ids.into_iter().map(SetSummary::new));
        self
    }

    pub fn with_children(mut self, children: Vec<Collection>) -> Self {
        self.collection.extend(children);
        self
    }
}

/// Set reference inside a collection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SetSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl SetSummary {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

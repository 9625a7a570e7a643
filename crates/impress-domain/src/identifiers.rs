//! Public identifiers attached to a publication

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix under which public identifiers are stored on a publication
pub const PUB_ID_PREFIX: &str = "pub-id::";

/// Public identifiers keyed by lowercase scheme (`doi`, `publisher-id`, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicIds(BTreeMap<String, String>);

impl PublicIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an identifier. The scheme is lowercased and a later value for
    /// the same scheme replaces the earlier one.
    pub fn insert(&mut self, scheme: &str, value: impl Into<String>) {
        self.0.insert(scheme.to_lowercase(), value.into());
    }

    pub fn get(&self, scheme: &str) -> Option<&str> {
        self.0.get(&scheme.to_lowercase()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries keyed the way they are stored on a publication (`pub-id::doi`)
    pub fn namespaced(&self) -> impl Iterator<Item = (String, &str)> {
        self.iter().map(|(k, v)| (namespaced_key(k), v))
    }
}

/// Storage key for an identifier scheme
pub fn namespaced_key(scheme: &str) -> String {
    format!("{}{}", PUB_ID_PREFIX, scheme.to_lowercase())
}

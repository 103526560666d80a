// src/types/names.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a relationship — a paginated link from an object to a
/// list of child object identifiers (`"photos"`, `"feed"`, ...).
///
/// Relationship names come back from the backend's metadata table and
/// are matched against the user's exclusion set, so they get their own
/// type rather than floating around as bare strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipName(String);

impl RelationshipName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationshipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RelationshipName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// src/types/path.rs

use super::RelationshipName;
use crate::constants::METADATA_QUERY;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the remote hierarchical namespace.
///
/// Either a bare object id (`"0"`, `"me"`) or a relationship-qualified
/// sub-path (`"me/photos"`). The string is opaque to the crawler; only
/// the backend assigns it meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphPath(String);

impl GraphPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The listing path for one of this object's relationships.
    pub fn join(&self, relationship: &RelationshipName) -> GraphPath {
        GraphPath(format!(
            "{}/{}",
            self.0.trim_end_matches('/'),
            relationship.as_str()
        ))
    }

    /// The same location, with the metadata flag asking the backend to
    /// report this object's relationship table alongside its fields.
    pub fn metadata_request(&self) -> GraphPath {
        if self.0.contains('?') {
            GraphPath(format!("{}&{}", self.0, METADATA_QUERY))
        } else {
            GraphPath(format!("{}?{}", self.0, METADATA_QUERY))
        }
    }
}

impl fmt::Display for GraphPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GraphPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

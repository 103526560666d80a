// src/api/responses.rs
//! Wire types for graph API responses.
//!
//! These mirror the two response shapes the crawler consumes: a single
//! object (a flat field map, optionally carrying a metadata table) and
//! one page of a relationship listing. Decoding failures surface as
//! `FetchError::Decode` at the client, never here.

use crate::types::RelationshipName;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// A single object fetched from the graph.
///
/// Every top-level key except `metadata` is a field of the object.
/// Field maps are plain `serde_json` maps, which serialize key-sorted —
/// exactly what the exported snapshot wants.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEnvelope {
    #[serde(default)]
    pub metadata: Option<ObjectMetadata>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

/// The metadata table a backend attaches when asked with `metadata=1`.
///
/// `connections` preserves backend-reported order; the crawler visits
/// relationships in exactly this order.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectMetadata {
    #[serde(default)]
    pub connections: IndexMap<RelationshipName, String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
}

/// One entry of the metadata field table.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of a relationship listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageEnvelope {
    #[serde(default)]
    pub data: Vec<PageItem>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl PageEnvelope {
    /// The explicit continue/exhausted discriminator.
    ///
    /// `Some` means the backend reports another page reachable with the
    /// returned cursor; `None` means the listing is exhausted. This
    /// replaces any guessing from absent keys.
    pub fn next_cursor(&self) -> Option<PageCursor> {
        let paging = self.paging.as_ref()?;
        paging
            .next
            .as_deref()
            .or_else(|| paging.cursors.as_ref()?.after.as_deref())
            .map(PageCursor::new)
    }
}

/// One item of a listing page. Only the id matters to the crawler; the
/// rest of the item rides along untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl PageItem {
    #[allow(dead_code)] // constructed by the fixture and test doubles
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Pagination metadata of a listing page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub cursors: Option<PageCursors>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// The before/after cursor pair of a page. The backend contract is both
/// sides or neither; the page walker asserts that.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageCursors {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}

/// An opaque pagination position marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(cursor: impl Into<String>) -> Self {
        Self(cursor.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn object_envelope_splits_metadata_from_fields() {
        let envelope: ObjectEnvelope = serde_json::from_value(serde_json::json!({
            "name": "jonathan",
            "id": "0",
            "metadata": {
                "connections": {"photos": "photosurl", "feed": "feedurl"},
                "fields": [{"name": "name"}, {"name": "birthday", "description": "whatever"}],
                "type": "user"
            }
        }))
        .unwrap();

        assert_eq!(envelope.fields.len(), 2);
        assert_eq!(envelope.fields["name"], "jonathan");
        let metadata = envelope.metadata.unwrap();
        let names: Vec<&str> = metadata.connections.keys().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["photos", "feed"]);
        assert_eq!(metadata.object_type.as_deref(), Some("user"));
    }

    #[test]
    fn next_cursor_prefers_next_link_then_after_cursor() {
        let with_next: PageEnvelope = serde_json::from_value(serde_json::json!({
            "data": [],
            "paging": {"next": "page-2", "cursors": {"before": "b", "after": "a"}}
        }))
        .unwrap();
        assert_eq!(with_next.next_cursor().unwrap().as_str(), "page-2");

        let with_after_only: PageEnvelope = serde_json::from_value(serde_json::json!({
            "data": [],
            "paging": {"cursors": {"before": "b", "after": "a"}}
        }))
        .unwrap();
        assert_eq!(with_after_only.next_cursor().unwrap().as_str(), "a");
    }

    #[test]
    fn page_without_paging_is_exhausted() {
        let envelope: PageEnvelope =
            serde_json::from_value(serde_json::json!({"data": []})).unwrap();
        assert!(envelope.next_cursor().is_none());
    }
}

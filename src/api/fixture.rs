// src/api/fixture.rs
//! Deterministic in-memory graph for fixture-based testing.
//!
//! Implements [`GraphSource`] without a backend: paths resolve to a
//! small synthetic social graph rooted at the user object `"0"`
//! (aliased from `"me"`). Resolution is stable — the same path always
//! yields the same id, the same id always yields the same cached
//! object — so two crawls with identical parameters produce
//! byte-identical output.

#![allow(dead_code)] // not reachable from the binary; exercised by the test suite

use super::responses::{
    FieldDescriptor, ObjectEnvelope, ObjectMetadata, PageCursor, PageEnvelope, PageItem, Paging,
};
use super::GraphSource;
use crate::error::FetchError;
use crate::types::{GraphPath, RelationshipName};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// Relationship names the fixture paginates, in the order their child
/// id ranges are assigned: photos get 100s, feed 200s, albums 300s.
const LISTING_TYPES: [&str; 3] = ["photos", "feed", "albums"];

/// Pages per listing before the fixture reports exhaustion.
const PAGES_PER_LISTING: u32 = 3;

/// Items per listing page.
const ITEMS_PER_PAGE: u32 = 2;

static CHILD_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:0|me)/(photos|albums|feed)([0-9]+)$").expect("valid pattern"));

/// The kinds of object the fixture graph contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectKind {
    User,
    Photo,
    Feed,
    Album,
}

impl ObjectKind {
    fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Photo => "photo",
            Self::Feed => "feed",
            Self::Album => "album",
        }
    }

    fn field_names(self) -> &'static [&'static str] {
        match self {
            Self::User => &["name", "id", "birthday"],
            Self::Photo => &["id", "created_time"],
            Self::Feed => &["id", "message", "story"],
            Self::Album => &["id", "cover_photo"],
        }
    }

    fn connection_names(self) -> &'static [&'static str] {
        match self {
            Self::User => &["photos", "feed", "albums"],
            Self::Photo => &["comments", "likes"],
            Self::Feed => &["comments", "attachments"],
            Self::Album => &["comments", "photos"],
        }
    }

    fn from_listing(relationship: &str) -> Option<Self> {
        match relationship {
            "photos" => Some(Self::Photo),
            "feed" => Some(Self::Feed),
            "albums" => Some(Self::Album),
            _ => None,
        }
    }

    /// Child ids encode their kind in the hundreds digit.
    fn from_id(id: u32) -> Option<Self> {
        match id {
            100..=199 => Some(Self::Photo),
            200..=299 => Some(Self::Feed),
            300..=399 => Some(Self::Album),
            _ => None,
        }
    }
}

#[derive(Default)]
struct FixtureState {
    /// path -> id
    aliases: HashMap<String, String>,
    /// id -> cached object fields
    objects: HashMap<String, serde_json::Map<String, Value>>,
}

/// Deterministic [`GraphSource`] test double.
pub struct FixtureGraph {
    state: Mutex<FixtureState>,
}

impl Default for FixtureGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureGraph {
    pub fn new() -> Self {
        let mut state = FixtureState::default();
        state.aliases.insert("me".to_string(), "0".to_string());
        Self {
            state: Mutex::new(state),
        }
    }

    /// Splits a request path into its location and whether the metadata
    /// flag was set.
    fn parse_request(path: &GraphPath) -> (String, bool) {
        let raw = path.as_str();
        let (location, query) = match raw.split_once('?') {
            Some((location, query)) => (location, query),
            None => (raw, ""),
        };
        let metadata = url::form_urlencoded::parse(query.as_bytes())
            .any(|(key, value)| key == "metadata" && value == "1");
        (location.trim_matches('/').to_string(), metadata)
    }

    /// Resolves a stripped location into (id, kind), creating and
    /// caching the object on first resolution.
    fn resolve(
        state: &mut FixtureState,
        location: &str,
        resolved_from: Option<&str>,
    ) -> Result<(String, ObjectKind), FetchError> {
        if location == "0" {
            let mut fields = serde_json::Map::new();
            fields.insert("name".to_string(), Value::String("jonathan".to_string()));
            Self::cache(state, location, "0", fields);
            return Ok(("0".to_string(), ObjectKind::User));
        }

        if let Some(captures) = CHILD_PATH.captures(location) {
            let kind = ObjectKind::from_listing(&captures[1])
                .expect("pattern only matches listing names");
            let id = captures[2].to_string();
            let numeric: u32 = id.parse().map_err(|_| FetchError::Decode {
                message: format!("non-numeric id in {}", location),
            })?;
            if numeric < 100 {
                return Err(Self::no_such_path(location, resolved_from));
            }
            let mut fields = serde_json::Map::new();
            fields.insert("type".to_string(), Value::String(kind.name().to_string()));
            Self::cache(state, location, &id, fields);
            return Ok((id, kind));
        }

        // Bare numeric ids resolve by range, so children reached through
        // a listing can be expanded on their own.
        if let Ok(numeric) = location.parse::<u32>() {
            if let Some(kind) = ObjectKind::from_id(numeric) {
                let mut fields = serde_json::Map::new();
                fields.insert("type".to_string(), Value::String(kind.name().to_string()));
                Self::cache(state, location, location, fields);
                return Ok((location.to_string(), kind));
            }
        }

        Err(Self::no_such_path(location, resolved_from))
    }

    fn no_such_path(location: &str, resolved_from: Option<&str>) -> FetchError {
        FetchError::NoSuchPath {
            path: location.to_string(),
            resolved_from: resolved_from.map(str::to_string),
        }
    }

    /// Caches an object under its id and aliases the path to it.
    ///
    /// Exactly one object instance may exist per id, and a path may
    /// never be re-aliased to a different id.
    fn cache(
        state: &mut FixtureState,
        path: &str,
        id: &str,
        mut fields: serde_json::Map<String, Value>,
    ) {
        fields.insert("id".to_string(), Value::String(id.to_string()));

        match state.objects.get(id) {
            Some(existing) => assert_eq!(
                existing, &fields,
                "a second object instance appeared for id {}",
                id
            ),
            None => {
                state.objects.insert(id.to_string(), fields);
            }
        }

        match state.aliases.get(path) {
            Some(existing) => {
                assert_eq!(existing, id, "path {} re-aliased to a different id", path)
            }
            None => {
                state.aliases.insert(path.to_string(), id.to_string());
            }
        }
    }

    /// The kind of an already-cached object.
    fn kind_of(state: &FixtureState, id: &str) -> ObjectKind {
        if id == "0" {
            return ObjectKind::User;
        }
        let type_name = state
            .objects
            .get(id)
            .and_then(|fields| fields.get("type"))
            .and_then(Value::as_str);
        match type_name {
            Some("photo") => ObjectKind::Photo,
            Some("feed") => ObjectKind::Feed,
            Some("album") => ObjectKind::Album,
            _ => unreachable!("cached ids always carry a kind"),
        }
    }

    fn metadata_for(kind: ObjectKind) -> ObjectMetadata {
        let connections: IndexMap<RelationshipName, String> = kind
            .connection_names()
            .iter()
            .map(|name| (RelationshipName::new(*name), format!("{}url", name)))
            .collect();
        let fields = kind
            .field_names()
            .iter()
            .map(|name| FieldDescriptor {
                name: name.to_string(),
                description: Some("whatever".to_string()),
            })
            .collect();
        ObjectMetadata {
            connections,
            fields,
            object_type: Some(kind.name().to_string()),
        }
    }

    /// The ids on one listing page: `100·(1+listing) + 10·page + item`.
    fn page_ids(listing_index: u32, page: u32) -> Vec<String> {
        (0..ITEMS_PER_PAGE)
            .map(|item| (100 * (1 + listing_index) + 10 * page + item).to_string())
            .collect()
    }
}

#[async_trait::async_trait]
impl GraphSource for FixtureGraph {
    async fn fetch_object(&self, path: &GraphPath) -> Result<ObjectEnvelope, FetchError> {
        let (location, metadata_requested) = Self::parse_request(path);
        let mut state = self.state.lock();

        let (target, resolved_from) = match state.aliases.get(&location) {
            Some(id) => (id.clone(), Some(location.clone())),
            None => (location.clone(), None),
        };

        let id = match state.objects.contains_key(&target) {
            true => target,
            false => {
                let (id, _) = Self::resolve(&mut state, &target, resolved_from.as_deref())?;
                id
            }
        };

        let fields = state
            .objects
            .get(&id)
            .expect("resolution always caches the object")
            .clone();
        let metadata = metadata_requested.then(|| Self::metadata_for(Self::kind_of(&state, &id)));

        Ok(ObjectEnvelope { metadata, fields })
    }

    async fn fetch_page(
        &self,
        path: &GraphPath,
        cursor: Option<&PageCursor>,
    ) -> Result<PageEnvelope, FetchError> {
        let (location, _) = Self::parse_request(path);
        let relationship = location.rsplit('/').next().unwrap_or(&location);

        let listing_index = match LISTING_TYPES.iter().position(|name| *name == relationship) {
            Some(index) => index as u32,
            // Relationships the fixture doesn't paginate list nothing.
            None => return Ok(PageEnvelope::default()),
        };

        let page = match cursor {
            None => 0,
            Some(cursor) => cursor
                .as_str()
                .strip_prefix("page-")
                .and_then(|n| n.parse::<u32>().ok())
                .ok_or_else(|| FetchError::Decode {
                    message: format!("unrecognized cursor {} for {}", cursor, location),
                })?,
        };

        if page >= PAGES_PER_LISTING {
            return Ok(PageEnvelope::default());
        }

        let data = Self::page_ids(listing_index, page)
            .into_iter()
            .map(PageItem::with_id)
            .collect();
        let paging = Paging {
            cursors: None,
            next: Some(format!("page-{}", page + 1)),
            previous: (page > 0).then(|| format!("page-{}", page - 1)),
        };

        Ok(PageEnvelope {
            data,
            paging: Some(paging),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn me_aliases_to_the_root_user() {
        let fixture = FixtureGraph::new();

        let via_alias = fixture.fetch_object(&GraphPath::new("me")).await.unwrap();
        let direct = fixture.fetch_object(&GraphPath::new("0")).await.unwrap();

        assert_eq!(via_alias.fields, direct.fields);
        assert_eq!(via_alias.fields["name"], "jonathan");
        assert_eq!(via_alias.fields["id"], "0");
    }

    #[tokio::test]
    async fn metadata_is_only_attached_when_requested() {
        let fixture = FixtureGraph::new();

        let plain = fixture.fetch_object(&GraphPath::new("me")).await.unwrap();
        assert!(plain.metadata.is_none());

        let with_metadata = fixture
            .fetch_object(&GraphPath::new("me").metadata_request())
            .await
            .unwrap();
        let metadata = with_metadata.metadata.unwrap();
        let names: Vec<&str> = metadata.connections.keys().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["photos", "feed", "albums"]);
        assert_eq!(metadata.object_type.as_deref(), Some("user"));
    }

    #[tokio::test]
    async fn one_object_instance_per_id_across_resolution_routes() {
        let fixture = FixtureGraph::new();

        let via_listing_path = fixture
            .fetch_object(&GraphPath::new("0/photos110"))
            .await
            .unwrap();
        let via_bare_id = fixture.fetch_object(&GraphPath::new("110")).await.unwrap();

        assert_eq!(via_listing_path.fields, via_bare_id.fields);
        assert_eq!(via_bare_id.fields["type"], "photo");
    }

    #[tokio::test]
    async fn unresolvable_paths_report_no_such_path() {
        let fixture = FixtureGraph::new();

        let err = fixture
            .fetch_object(&GraphPath::new("0/photos7"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NoSuchPath { .. }));

        let err = fixture
            .fetch_object(&GraphPath::new("somewhere/else"))
            .await
            .unwrap_err();
        assert_eq!(err.kind_name(), "NoSuchPathError");
    }

    #[tokio::test]
    async fn listings_paginate_three_pages_then_exhaust() {
        let fixture = FixtureGraph::new();
        let path = GraphPath::new("0/photos");

        let first = fixture.fetch_page(&path, None).await.unwrap();
        let ids: Vec<&str> = first.data.iter().filter_map(|i| i.id.as_deref()).collect();
        assert_eq!(ids, vec!["100", "101"]);
        let cursor = first.next_cursor().unwrap();

        let second = fixture.fetch_page(&path, Some(&cursor)).await.unwrap();
        let ids: Vec<&str> = second.data.iter().filter_map(|i| i.id.as_deref()).collect();
        assert_eq!(ids, vec!["110", "111"]);

        let last = fixture
            .fetch_page(&path, Some(&PageCursor::new("page-3")))
            .await
            .unwrap();
        assert!(last.data.is_empty());
        assert!(last.next_cursor().is_none());
    }

    #[tokio::test]
    async fn unpaginated_relationships_list_nothing() {
        let fixture = FixtureGraph::new();
        let envelope = fixture
            .fetch_page(&GraphPath::new("110/comments"), None)
            .await
            .unwrap();
        assert!(envelope.data.is_empty());
        assert!(envelope.next_cursor().is_none());
    }
}

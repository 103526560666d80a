// tests/partial_failure.rs
//! Failure isolation: a dead branch never discards sibling or ancestor
//! data, and every failure shows up in the document where it happened.

use graph2snapshot::{
    render_snapshot, ConnectionsValue, Crawler, ErrorValue, FetchError, FieldsValue, FixtureGraph,
    GraphPath, GraphSource, ObjectEnvelope, PageCursor, PageEnvelope, RelationshipName,
    RelationshipValue,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;

/// Wraps the fixture and fails selected operations.
struct FlakySource {
    inner: FixtureGraph,
    /// listing paths whose page fetches fail with a transport error
    broken_listings: Vec<&'static str>,
    /// object paths whose field fetches fail with an auth error
    broken_objects: Vec<&'static str>,
}

impl FlakySource {
    fn new(broken_listings: Vec<&'static str>, broken_objects: Vec<&'static str>) -> Self {
        Self {
            inner: FixtureGraph::new(),
            broken_listings,
            broken_objects,
        }
    }
}

#[async_trait::async_trait]
impl GraphSource for FlakySource {
    async fn fetch_object(&self, path: &GraphPath) -> Result<ObjectEnvelope, FetchError> {
        if self.broken_objects.contains(&path.as_str()) {
            return Err(FetchError::Auth {
                code: graph2snapshot::GraphApiErrorCode::OAuthException,
                message: "Error validating access token.".to_string(),
            });
        }
        self.inner.fetch_object(path).await
    }

    async fn fetch_page(
        &self,
        path: &GraphPath,
        cursor: Option<&PageCursor>,
    ) -> Result<PageEnvelope, FetchError> {
        if self.broken_listings.contains(&path.as_str()) {
            return Err(FetchError::Transport {
                code: None,
                message: "connection reset by peer".to_string(),
            });
        }
        self.inner.fetch_page(path, cursor).await
    }
}

fn crawler(source: FlakySource) -> Crawler {
    Crawler::new(Arc::new(source), 1, 25, HashSet::new())
}

#[tokio::test]
async fn dead_listing_leaves_sibling_relationships_intact() {
    let source = FlakySource::new(vec!["me/feed"], vec![]);
    let result = crawler(source).crawl(&GraphPath::new("me")).await;
    let node = result.as_node().unwrap();

    let connections = match &node.connections {
        ConnectionsValue::Connections(map) => map,
        ConnectionsValue::Error(e) => panic!("expected a connections map, got {}", e),
    };

    // feed carries the embedded error, in place
    match &connections[&RelationshipName::new("feed")] {
        RelationshipValue::Error(error) => {
            assert_eq!(error.to_string(), "TransportError, cannot get me/feed.");
        }
        RelationshipValue::Children(_) => panic!("feed listing should have failed"),
    }

    // photos and albums are untouched
    for name in ["photos", "albums"] {
        match &connections[&RelationshipName::new(name)] {
            RelationshipValue::Children(children) => assert_eq!(children.len(), 6),
            RelationshipValue::Error(e) => panic!("{} listing failed: {}", name, e),
        }
    }
}

#[tokio::test]
async fn dead_fields_do_not_block_connection_discovery() {
    // the plain object fetch fails, the metadata fetch succeeds
    let source = FlakySource::new(vec![], vec!["me"]);
    let result = crawler(source).crawl(&GraphPath::new("me")).await;
    let node = result.as_node().unwrap();

    match &node.fields {
        FieldsValue::Error(error) => {
            assert_eq!(error.to_string(), "AuthError, cannot get fields of me.");
        }
        FieldsValue::Fields(_) => panic!("field fetch should have failed"),
    }

    let connections = match &node.connections {
        ConnectionsValue::Connections(map) => map,
        ConnectionsValue::Error(e) => panic!("expected a connections map, got {}", e),
    };
    assert_eq!(connections.len(), 3);
}

#[tokio::test]
async fn dead_relationship_discovery_replaces_the_whole_map() {
    let source = FlakySource::new(vec![], vec!["me?metadata=1"]);
    let result = crawler(source).crawl(&GraphPath::new("me")).await;
    let node = result.as_node().unwrap();

    // fields survived
    match &node.fields {
        FieldsValue::Fields(map) => assert_eq!(map["name"], "jonathan"),
        FieldsValue::Error(e) => panic!("expected fields, got {}", e),
    }

    match &node.connections {
        ConnectionsValue::Error(error) => {
            assert_eq!(
                error.to_string(),
                "AuthError, cannot get connections for me."
            );
        }
        ConnectionsValue::Connections(_) => panic!("relationship discovery should have failed"),
    }
}

#[tokio::test]
async fn embedded_errors_render_into_the_document() {
    let source = FlakySource::new(vec!["me/feed"], vec![]);
    let result = crawler(source).crawl(&GraphPath::new("me")).await;

    let document = render_snapshot(&result).unwrap();
    assert!(document.contains("\"feed\": \"TransportError, cannot get me/feed.\""));
}

#[tokio::test]
async fn error_values_compare_structurally() {
    let transport = FetchError::Transport {
        code: None,
        message: "connection reset by peer".to_string(),
    };
    let listing = GraphPath::new("me/feed");
    assert_eq!(
        ErrorValue::relationship_node(&transport, &listing),
        ErrorValue::RelationshipNode {
            cause_kind: "TransportError",
            path: listing,
        }
    );
}

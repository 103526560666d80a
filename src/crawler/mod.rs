// src/crawler/mod.rs
//! The recursive crawler — assembles a result tree from a root path.
//!
//! The crawl is depth-first and strictly bounded: the depth budget
//! decreases by exactly one per level and recursion never happens at
//! budget zero, so the walk terminates even when the underlying id
//! graph contains cycles. A revisited identifier is re-expanded each
//! time it is reached; there is no memoization or visited set.
//!
//! Backend failures never cross a node boundary as errors. Each one is
//! converted, at the smallest scope that observed it, into an
//! [`ErrorValue`] embedded in the tree, so a dead branch never discards
//! sibling or ancestor data.

mod error_value;
mod node;

pub use error_value::{CursorSide, ErrorValue};
pub use node::{
    ConnectionsValue, FieldsValue, MaxDepthMarker, Node, NodeValue, RelationshipValue, TraceStep,
};

use crate::api::{collect_child_ids, GraphSource};
use crate::error::FetchError;
use crate::types::{GraphPath, RelationshipName};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Recursively exports every reachable object up to a configured depth.
///
/// Holds only immutable per-call configuration; no state outlives one
/// `crawl` invocation.
pub struct Crawler {
    source: Arc<dyn GraphSource>,
    max_depth: u32,
    page_limit: u32,
    excluded: HashSet<RelationshipName>,
}

impl Crawler {
    pub fn new(
        source: Arc<dyn GraphSource>,
        max_depth: u32,
        page_limit: u32,
        excluded: HashSet<RelationshipName>,
    ) -> Self {
        Self {
            source,
            max_depth,
            page_limit,
            excluded,
        }
    }

    /// Walks the graph from `root` and returns the assembled tree.
    ///
    /// Infallible by design: anything the backend refuses to hand over
    /// is present in the tree as an embedded error value instead.
    pub async fn crawl(&self, root: &GraphPath) -> NodeValue {
        self.traverse(root.clone(), Vec::new(), self.max_depth).await
    }

    /// Boxed so the `traverse` → `expand_relationships` → `traverse`
    /// recursion has a finite future type.
    fn traverse(
        &self,
        path: GraphPath,
        trace: Vec<TraceStep>,
        remaining_depth: u32,
    ) -> Pin<Box<dyn Future<Output = NodeValue> + Send + '_>> {
        Box::pin(async move {
            if remaining_depth == 0 {
                return NodeValue::MaxDepth(MaxDepthMarker);
            }

            // Field failure never blocks connection discovery.
            let fields = match self.fetch_fields(&path).await {
                Ok(map) => FieldsValue::Fields(map),
                Err(e) => {
                    log::debug!("fields of {} unavailable: {}", path, e);
                    FieldsValue::Error(ErrorValue::fields(&e, &path))
                }
            };

            let connections = match self.relationship_types(&path).await {
                Ok(names) => {
                    let map = self
                        .expand_relationships(&path, &trace, names, remaining_depth)
                        .await;
                    assert!(
                        map.keys().all(|name| !self.excluded.contains(name)),
                        "an excluded relationship leaked into the connections map of {}",
                        path
                    );
                    ConnectionsValue::Connections(map)
                }
                // Not knowing which relationships exist replaces the
                // whole map; nothing below this node is reachable.
                Err(e) => {
                    log::debug!("connections for {} unavailable: {}", path, e);
                    ConnectionsValue::Error(ErrorValue::relationship_type(&e, &path))
                }
            };

            NodeValue::Node(Box::new(Node {
                path_trace: trace,
                fields,
                connections,
            }))
        })
    }

    /// Expands every non-excluded relationship of the node at `path`,
    /// in backend-reported order.
    async fn expand_relationships(
        &self,
        path: &GraphPath,
        trace: &[TraceStep],
        names: Vec<RelationshipName>,
        remaining_depth: u32,
    ) -> IndexMap<RelationshipName, RelationshipValue> {
        let mut connections = IndexMap::new();

        for name in names {
            if self.excluded.contains(&name) {
                continue;
            }

            let listing = path.join(&name);
            let value = match collect_child_ids(self.source.as_ref(), &listing, self.page_limit)
                .await
            {
                Ok(children) => {
                    let mut reached = Vec::with_capacity(children.len());
                    for child in children {
                        let mut child_trace = trace.to_vec();
                        child_trace.push(TraceStep {
                            relationship: name.clone(),
                            parent: path.clone(),
                        });
                        reached.push(self.traverse(child, child_trace, remaining_depth - 1).await);
                    }
                    RelationshipValue::Children(reached)
                }
                // One dead listing leaves sibling relationships intact.
                Err(e) => {
                    log::debug!("listing {} unavailable: {}", listing, e);
                    RelationshipValue::Error(ErrorValue::relationship_node(&e, &listing))
                }
            };

            connections.insert(name, value);
        }

        connections
    }

    async fn fetch_fields(
        &self,
        path: &GraphPath,
    ) -> Result<serde_json::Map<String, Value>, FetchError> {
        log::debug!("graph get {}", path);
        let envelope = self.source.fetch_object(path).await?;
        Ok(envelope.fields)
    }

    /// Enumerates the relationship names of the node at `path`, in
    /// backend-reported order.
    async fn relationship_types(
        &self,
        path: &GraphPath,
    ) -> Result<Vec<RelationshipName>, FetchError> {
        let request = path.metadata_request();
        log::debug!("graph get {}", request);
        let envelope = self.source.fetch_object(&request).await?;
        let metadata = envelope.metadata.ok_or_else(|| FetchError::Decode {
            message: format!("object at {} carried no metadata", path),
        })?;

        let names: Vec<RelationshipName> = metadata.connections.keys().cloned().collect();
        log::debug!(
            "connections for {}: {:?}",
            path,
            names.iter().map(|n| n.as_str()).collect::<Vec<_>>()
        );
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ObjectEnvelope, PageCursor, PageEnvelope};
    use parking_lot::Mutex;

    /// Counts capability calls; every fetch fails.
    struct CountingSource {
        calls: Mutex<u32>,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock()
        }
    }

    #[async_trait::async_trait]
    impl GraphSource for CountingSource {
        async fn fetch_object(&self, path: &GraphPath) -> Result<ObjectEnvelope, FetchError> {
            *self.calls.lock() += 1;
            Err(FetchError::NoSuchPath {
                path: path.to_string(),
                resolved_from: None,
            })
        }

        async fn fetch_page(
            &self,
            path: &GraphPath,
            _cursor: Option<&PageCursor>,
        ) -> Result<PageEnvelope, FetchError> {
            *self.calls.lock() += 1;
            Err(FetchError::NoSuchPath {
                path: path.to_string(),
                resolved_from: None,
            })
        }
    }

    #[tokio::test]
    async fn depth_zero_returns_marker_without_touching_the_source() {
        let source = Arc::new(CountingSource::new());
        let crawler = Crawler::new(source.clone(), 0, 25, HashSet::new());

        let result = crawler.crawl(&GraphPath::new("me")).await;

        assert!(result.is_max_depth());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn total_fetch_failure_still_yields_a_node() {
        let source = Arc::new(CountingSource::new());
        let crawler = Crawler::new(source, 1, 25, HashSet::new());

        let result = crawler.crawl(&GraphPath::new("me")).await;
        let node = result.as_node().expect("a node even when every fetch fails");

        assert_eq!(
            node.fields,
            FieldsValue::Error(ErrorValue::Fields {
                cause_kind: "NoSuchPathError",
                path: GraphPath::new("me"),
            })
        );
        assert_eq!(
            node.connections,
            ConnectionsValue::Error(ErrorValue::RelationshipType {
                cause_kind: "NoSuchPathError",
                path: GraphPath::new("me"),
            })
        );
    }
}

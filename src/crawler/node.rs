// src/crawler/node.rs
//! The result tree.
//!
//! A [`Node`] is built once, bottom-up, during a single crawl and is
//! immutable afterwards. Its three attributes serialize in declaration
//! order — `path_trace`, `fields`, `connections` — which is what fixes
//! the exported shape, independent of any key sorting the serializer
//! applies inside field maps.

use super::ErrorValue;
use crate::types::{GraphPath, RelationshipName};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One step of the route from the root to a node: which relationship
/// was followed, from which parent path. Diagnostics only — a node's
/// identity is its backend id, not its route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub relationship: RelationshipName,
    pub parent: GraphPath,
}

/// The record produced for one object retrieved from the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub path_trace: Vec<TraceStep>,
    pub fields: FieldsValue,
    pub connections: ConnectionsValue,
}

/// A node's field map, or the error that replaced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldsValue {
    Fields(serde_json::Map<String, Value>),
    Error(ErrorValue),
}

/// A node's connections map, or the single error that replaced the
/// whole map when relationship discovery failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConnectionsValue {
    Connections(IndexMap<RelationshipName, RelationshipValue>),
    Error(ErrorValue),
}

/// The value under one relationship name: the children that were
/// reached, or the error that replaced that one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelationshipValue {
    Children(Vec<NodeValue>),
    Error(ErrorValue),
}

/// What traversal produces for one reachable identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    Node(Box<Node>),
    Error(ErrorValue),
    MaxDepth(MaxDepthMarker),
}

impl NodeValue {
    /// The node, when traversal got that far.
    #[allow(dead_code)] // used by the test suite and lib consumers
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    #[allow(dead_code)] // used by the test suite and lib consumers
    pub fn is_max_depth(&self) -> bool {
        matches!(self, Self::MaxDepth(_))
    }
}

/// Sentinel marking a subtree intentionally not explored because the
/// depth budget was exhausted. Carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxDepthMarker;

impl fmt::Display for MaxDepthMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[MAX DEPTH REACHED]")
    }
}

impl Serialize for MaxDepthMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_node() -> Node {
        let mut fields = serde_json::Map::new();
        fields.insert("name".to_string(), Value::String("jonathan".to_string()));
        fields.insert("id".to_string(), Value::String("0".to_string()));

        let mut connections = IndexMap::new();
        connections.insert(
            RelationshipName::new("photos"),
            RelationshipValue::Children(vec![NodeValue::MaxDepth(MaxDepthMarker)]),
        );

        Node {
            path_trace: vec![TraceStep {
                relationship: RelationshipName::new("photos"),
                parent: GraphPath::new("me"),
            }],
            fields: FieldsValue::Fields(fields),
            connections: ConnectionsValue::Connections(connections),
        }
    }

    #[test]
    fn node_attributes_serialize_in_declaration_order() {
        let json = serde_json::to_string(&sample_node()).unwrap();
        let path_trace = json.find("\"path_trace\"").unwrap();
        let fields = json.find("\"fields\"").unwrap();
        let connections = json.find("\"connections\"").unwrap();
        assert!(path_trace < fields && fields < connections);
    }

    #[test]
    fn field_maps_serialize_key_sorted() {
        let json = serde_json::to_string(&sample_node()).unwrap();
        // "id" was inserted after "name" but sorts first
        assert!(json.find("\"id\"").unwrap() < json.find("\"name\"").unwrap());
    }

    #[test]
    fn max_depth_marker_serializes_as_sentinel_string() {
        let value = serde_json::to_value(NodeValue::MaxDepth(MaxDepthMarker)).unwrap();
        assert_eq!(value, serde_json::json!("[MAX DEPTH REACHED]"));
    }

    #[test]
    fn trace_step_serializes_relationship_and_parent() {
        let step = TraceStep {
            relationship: RelationshipName::new("feed"),
            parent: GraphPath::new("0"),
        };
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"relationship": "feed", "parent": "0"})
        );
    }
}

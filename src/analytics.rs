// src/analytics.rs
//! Measurement over assembled snapshot trees, for user-facing progress
//! messages.

use crate::crawler::{ConnectionsValue, FieldsValue, Node, NodeValue, RelationshipValue};

/// Quick statistics for the completion summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotSummary {
    /// Objects actually retrieved
    pub nodes: usize,
    /// Error values embedded anywhere in the tree
    pub embedded_errors: usize,
    /// Subtrees cut off by the depth budget
    pub depth_markers: usize,
    /// Deepest level at which a full node (not a marker) was built
    pub deepest_nesting: usize,
}

/// Walks the snapshot and tallies what the crawl produced.
pub fn measure_snapshot(root: &NodeValue) -> SnapshotSummary {
    let mut summary = SnapshotSummary::default();
    measure_value(root, 0, &mut summary);
    summary
}

fn measure_value(value: &NodeValue, level: usize, summary: &mut SnapshotSummary) {
    match value {
        NodeValue::Node(node) => measure_node(node, level, summary),
        NodeValue::Error(_) => summary.embedded_errors += 1,
        NodeValue::MaxDepth(_) => summary.depth_markers += 1,
    }
}

fn measure_node(node: &Node, level: usize, summary: &mut SnapshotSummary) {
    summary.nodes += 1;
    summary.deepest_nesting = summary.deepest_nesting.max(level);

    if let FieldsValue::Error(_) = &node.fields {
        summary.embedded_errors += 1;
    }

    match &node.connections {
        ConnectionsValue::Error(_) => summary.embedded_errors += 1,
        ConnectionsValue::Connections(connections) => {
            for value in connections.values() {
                match value {
                    RelationshipValue::Error(_) => summary.embedded_errors += 1,
                    RelationshipValue::Children(children) => {
                        for child in children {
                            measure_value(child, level + 1, summary);
                        }
                    }
                }
            }
        }
    }
}

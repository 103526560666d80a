// src/crawler/error_value.rs
//! Serializable stand-ins embedded in the result tree wherever a
//! subtree could not be retrieved.
//!
//! These are values, not control flow. Each one is constructed at
//! exactly one crawler scope — per-node fields, per-node relationship
//! discovery, per-relationship child listing — and rendered into the
//! exported JSON as a human-readable string.

use crate::error::FetchError;
use crate::types::GraphPath;
use serde::{Serialize, Serializer};
use std::fmt;

/// Which side of a pagination cursor pair is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSide {
    Before,
    After,
}

impl fmt::Display for CursorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// An error embedded in the result tree in place of missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValue {
    /// The node's field map could not be retrieved.
    Fields {
        cause_kind: &'static str,
        path: GraphPath,
    },
    /// The node's relationship table could not be enumerated; replaces
    /// the entire connections map.
    RelationshipType {
        cause_kind: &'static str,
        path: GraphPath,
    },
    /// One relationship's child listing could not be drained; replaces
    /// that relationship's value only.
    RelationshipNode {
        cause_kind: &'static str,
        path: GraphPath,
    },
    /// Diagnostic only: one side of a page's cursor pair was absent.
    /// Never embedded in the tree, never aborts traversal.
    CursorMissing { side: CursorSide },
}

impl ErrorValue {
    pub fn fields(cause: &FetchError, path: &GraphPath) -> Self {
        Self::Fields {
            cause_kind: cause.kind_name(),
            path: path.clone(),
        }
    }

    pub fn relationship_type(cause: &FetchError, path: &GraphPath) -> Self {
        Self::RelationshipType {
            cause_kind: cause.kind_name(),
            path: path.clone(),
        }
    }

    pub fn relationship_node(cause: &FetchError, path: &GraphPath) -> Self {
        Self::RelationshipNode {
            cause_kind: cause.kind_name(),
            path: path.clone(),
        }
    }

    pub fn cursor_missing(side: CursorSide) -> Self {
        Self::CursorMissing { side }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields { cause_kind, path } => {
                write!(f, "{}, cannot get fields of {}.", cause_kind, path)
            }
            Self::RelationshipType { cause_kind, path } => {
                write!(f, "{}, cannot get connections for {}.", cause_kind, path)
            }
            Self::RelationshipNode { cause_kind, path } => {
                write!(f, "{}, cannot get {}.", cause_kind, path)
            }
            Self::CursorMissing { side } => write!(f, "[CURSOR {} MISSING]", side),
        }
    }
}

impl Serialize for ErrorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

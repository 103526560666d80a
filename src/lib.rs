// src/lib.rs
//! graph2snapshot library — exports a privacy-auditable snapshot of a
//! hierarchical, paginated graph API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `FetchError`, `GraphApiErrorCode`
//! - **Configuration** — `CommandLineInput`, `SnapshotConfig`
//! - **Domain types** — `GraphPath`, `RelationshipName`, `AccessToken`
//! - **Graph source** — `GraphSource`, `GraphHttpClient`, `FixtureGraph`
//! - **Crawler** — `Crawler` and the `Node` result tree
//! - **Output** — `render_snapshot`, `write_snapshot`

// Internal modules — must match what's in main.rs
mod analytics;
mod api;
mod config;
mod constants;
mod crawler;
mod error;
mod error_recovery;
mod output;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FetchError, GraphApiErrorCode, Result};

// --- Configuration ---
pub use crate::config::{CommandLineInput, SnapshotConfig};
pub use crate::constants::{
    DEFAULT_EXCLUDED_RELATIONSHIPS, DEFAULT_MAX_DEPTH, DEFAULT_PAGE_LIMIT, DEFAULT_ROOT_PATH,
};

// --- Domain Types ---
pub use crate::types::{AccessToken, GraphPath, RelationshipName};

// --- Graph Source ---
pub use crate::api::{
    collect_child_ids, FixtureGraph, GraphHttpClient, GraphSource, ObjectEnvelope, ObjectMetadata,
    PageCursor, PageCursors, PageEnvelope, PageItem, Paging,
};

// --- Crawler & Result Tree ---
pub use crate::crawler::{
    ConnectionsValue, Crawler, CursorSide, ErrorValue, FieldsValue, MaxDepthMarker, Node,
    NodeValue, RelationshipValue, TraceStep,
};

// --- Measurement ---
pub use crate::analytics::{measure_snapshot, SnapshotSummary};

// --- Output ---
pub use crate::output::{render_snapshot, write_snapshot};

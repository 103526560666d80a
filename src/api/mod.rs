// src/api/mod.rs
//! Graph API interaction — the ability to read objects and listings
//! from the remote graph.
//!
//! The crawler depends on the [`GraphSource`] trait, never on HTTP
//! details; the production client and the deterministic fixture are
//! interchangeable behind it.

pub mod client;
pub mod fixture;
pub mod pagination;
mod responses;

use crate::error::FetchError;
use crate::types::GraphPath;

pub use responses::{
    FieldDescriptor, ObjectEnvelope, ObjectMetadata, PageCursor, PageCursors, PageEnvelope,
    PageItem, Paging,
};

/// The ability to read from a hierarchical, paginated graph API.
///
/// Two operations, matching what the crawler needs and nothing more:
/// fetch one object, fetch one page of a listing. Pagination is driven
/// page by page with an opaque cursor; [`PageEnvelope::next_cursor`] is
/// the explicit exhausted/continue signal.
#[async_trait::async_trait]
pub trait GraphSource: Send + Sync {
    /// Fetch the object at `path` — its scalar fields, plus the
    /// relationship metadata table when `path` carries the metadata
    /// flag (see [`GraphPath::metadata_request`]).
    async fn fetch_object(&self, path: &GraphPath) -> Result<ObjectEnvelope, FetchError>;

    /// Fetch one page of the listing at `path`. `cursor` is `None` for
    /// the first page, otherwise a cursor from a previous envelope.
    async fn fetch_page(
        &self,
        path: &GraphPath,
        cursor: Option<&PageCursor>,
    ) -> Result<PageEnvelope, FetchError>;
}

// Re-export the public interface
pub use client::GraphHttpClient;
pub use fixture::FixtureGraph;
pub use pagination::collect_child_ids;

// src/api/pagination.rs
//! The page walker — drains a cursor-paginated listing into a bounded,
//! finite sequence of child identifiers.
//!
//! Two termination guarantees hold no matter what the backend does: the
//! walk stops when the envelope reports no next cursor, and it stops
//! after `page_limit` pages even if the backend reports more forever.

use super::responses::{PageCursor, Paging};
use super::GraphSource;
use crate::crawler::{CursorSide, ErrorValue};
use crate::error::FetchError;
use crate::types::GraphPath;
use std::fmt;

/// The before/after cursor pair of one fetched page, for diagnostics.
///
/// Backend contract: when a cursor object is present it carries both
/// sides or neither. Exactly one side present is a defect upstream, not
/// a condition to recover from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorRange {
    before: Option<String>,
    after: Option<String>,
}

impl CursorRange {
    pub fn from_paging(paging: Option<&Paging>) -> Self {
        match paging.and_then(|p| p.cursors.as_ref()) {
            // No pagination metadata, or none of it cursor-based: both
            // sides missing, which is normal.
            None => Self {
                before: None,
                after: None,
            },
            Some(cursors) => {
                assert_eq!(
                    cursors.before.is_some(),
                    cursors.after.is_some(),
                    "pagination cursor object carried exactly one of before/after",
                );
                Self {
                    before: cursors.before.clone(),
                    after: cursors.after.clone(),
                }
            }
        }
    }

    fn side(&self, value: &Option<String>, side: CursorSide) -> String {
        match value {
            Some(cursor) => cursor.clone(),
            None => ErrorValue::cursor_missing(side).to_string(),
        }
    }
}

impl fmt::Display for CursorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.side(&self.before, CursorSide::Before),
            self.side(&self.after, CursorSide::After)
        )
    }
}

/// Collects the child identifiers of the listing at `path`, fetching at
/// most `page_limit` pages.
///
/// An item without an id on the final page is the backend's way of
/// ending a listing and is swallowed after verifying the source really
/// is exhausted; the same condition mid-stream is a fatal contract
/// violation. Backend failures propagate to the caller, which embeds
/// them as a per-relationship error value.
pub async fn collect_child_ids(
    source: &dyn GraphSource,
    path: &GraphPath,
    page_limit: u32,
) -> Result<Vec<GraphPath>, FetchError> {
    let mut ids = Vec::new();
    let mut cursor: Option<PageCursor> = None;
    let mut pages_fetched = 0u32;

    loop {
        if pages_fetched >= page_limit {
            log::debug!("reached page limit {} for {}", page_limit, path);
            break;
        }

        let envelope = source.fetch_page(path, cursor.as_ref()).await?;
        pages_fetched += 1;

        let range = CursorRange::from_paging(envelope.paging.as_ref());
        log::debug!("graph page {} for {}", range, path);

        let next = envelope.next_cursor();
        for item in &envelope.data {
            match &item.id {
                Some(id) => {
                    log::debug!("child {} under listing {}", id, path);
                    ids.push(GraphPath::new(id.as_str()));
                }
                None => {
                    assert!(
                        next.is_none(),
                        "listing item without an id mid-stream at {}",
                        path
                    );
                    return Ok(ids);
                }
            }
        }

        match next {
            Some(c) => cursor = Some(c),
            None => break,
        }
    }

    Ok(ids)
}

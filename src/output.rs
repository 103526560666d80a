// src/output.rs
//! Snapshot serialization and delivery.
//!
//! stdout carries exactly one thing: the pretty-printed snapshot
//! document. Everything diagnostic goes through the logging stack to
//! stderr, so the tool stays pipeable.

use crate::crawler::NodeValue;
use crate::error::AppError;
use std::io::Write;

/// Renders the snapshot as a pretty-printed JSON document.
///
/// Field maps serialize key-sorted; a node's three attributes emit in
/// declaration order; connections keep backend order. Rendering the
/// same tree twice yields byte-identical output.
pub fn render_snapshot(root: &NodeValue) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(root)?)
}

/// Writes the rendered snapshot to the given sink, newline-terminated.
pub fn write_snapshot(mut sink: impl Write, document: &str) -> Result<(), AppError> {
    sink.write_all(document.as_bytes())?;
    sink.write_all(b"\n")?;
    Ok(())
}

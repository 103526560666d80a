// src/main.rs

// Modules defined in the crate
mod analytics;
mod api;
mod config;
mod constants;
mod crawler;
mod error;
mod error_recovery;
mod output;
mod types;

use crate::analytics::measure_snapshot;
use crate::config::{CommandLineInput, SnapshotConfig};
use crate::crawler::{Crawler, NodeValue};
use crate::error::AppError;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Diagnostics go to stderr so stdout carries nothing but the snapshot
/// document; a debug-level copy lands in a temp-dir log file.
fn setup_logging(debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("graph2snapshot.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if debug {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the export: crawl the graph, serialize the tree, print it.
async fn execute_export(config: &SnapshotConfig) -> Result<(), AppError> {
    let client = api::GraphHttpClient::new(&config.access_token)?;
    let crawler = Crawler::new(
        Arc::new(client),
        config.max_depth,
        config.page_limit,
        config.excluded.clone(),
    );

    log::info!(
        "Exporting {} (depth {}, page limit {})",
        config.root,
        config.max_depth,
        config.page_limit
    );

    let snapshot = crawler.crawl(&config.root).await;
    let document = output::render_snapshot(&snapshot)?;
    output::write_snapshot(std::io::stdout().lock(), &document)?;

    report_completion(&snapshot, config);
    Ok(())
}

/// Summarizes the crawl on stderr after the document is out.
fn report_completion(snapshot: &NodeValue, config: &SnapshotConfig) {
    let summary = measure_snapshot(snapshot);

    log::info!(
        "Exported {} objects ({} embedded errors, {} depth markers, deepest nesting {})",
        summary.nodes,
        summary.embedded_errors,
        summary.depth_markers,
        summary.deepest_nesting
    );

    if summary.depth_markers > 0 {
        log::info!(
            "Depth budget ({}) cut off {} subtrees. Raise --max-depth to expand them.",
            config.max_depth,
            summary.depth_markers
        );
    }

    if summary.embedded_errors > 0 {
        log::warn!(
            "{} subtrees could not be retrieved; the document marks each one in place.",
            summary.embedded_errors
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.debug)?;

    let config = SnapshotConfig::resolve(cli)?;

    execute_export(&config).await?;

    Ok(())
}

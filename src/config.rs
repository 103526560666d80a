// src/config.rs
use crate::constants::{
    DEFAULT_EXCLUDED_RELATIONSHIPS, DEFAULT_MAX_DEPTH, DEFAULT_PAGE_LIMIT, DEFAULT_ROOT_PATH,
};
use crate::error::AppError;
use crate::types::{AccessToken, GraphPath, RelationshipName};
use clap::Parser;
use std::collections::HashSet;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "Export a privacy-auditable JSON snapshot of your graph API data", long_about = None)]
pub struct CommandLineInput {
    /// Graph API access token
    pub access_token: String,

    /// Enable debug logging (request paths, page cursor ranges)
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Maximum depth of nested objects to produce
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Maximum number of pages of a given relationship to look through
    #[arg(short, long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub page_limit: u32,

    /// Names of relationships to ignore
    #[arg(short, long, num_args = 0.., default_values_t = DEFAULT_EXCLUDED_RELATIONSHIPS.map(String::from))]
    pub excludes: Vec<String>,

    /// Path to start the crawl from
    #[arg(long, default_value = DEFAULT_ROOT_PATH)]
    pub root: String,
}

/// Resolved crawl configuration — validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub access_token: AccessToken,
    pub root: GraphPath,
    pub max_depth: u32,
    pub page_limit: u32,
    pub excluded: HashSet<RelationshipName>,
    pub debug: bool,
}

impl SnapshotConfig {
    /// Resolves a complete configuration from CLI input.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let access_token =
            AccessToken::new(cli.access_token).map_err(AppError::MissingConfiguration)?;

        if cli.root.trim().is_empty() {
            return Err(AppError::InvalidConfiguration(
                "root path is empty".to_string(),
            ));
        }

        let excluded = cli
            .excludes
            .into_iter()
            .map(RelationshipName::new)
            .collect();

        Ok(SnapshotConfig {
            access_token,
            root: GraphPath::new(cli.root),
            max_depth: cli.max_depth,
            page_limit: cli.page_limit,
            excluded,
            debug: cli.debug,
        })
    }
}

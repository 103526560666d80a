// src/constants.rs
//! Domain constants that define the operational boundaries of the crawl.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you how the exporter operates: where it connects,
//! how deep it recurses, how many pages it will drain, and what it
//! refuses to expand by default.

// ---------------------------------------------------------------------------
// Graph API endpoint
// ---------------------------------------------------------------------------

/// Base URL of the remote graph API, version pinned.
pub const GRAPH_API_BASE_URL: &str = "https://graph.facebook.com/v2.8";

/// Query flag that asks the backend to include relationship metadata
/// alongside an object's fields.
pub const METADATA_QUERY: &str = "metadata=1";

// ---------------------------------------------------------------------------
// Crawl boundaries
// ---------------------------------------------------------------------------

/// Default starting path for a crawl — the authenticated user's own node.
pub const DEFAULT_ROOT_PATH: &str = "me";

/// Default recursion depth. One level exports the root object and the
/// identifiers of everything directly connected to it.
pub const DEFAULT_MAX_DEPTH: u32 = 1;

/// Default cap on pages drained per relationship listing.
///
/// Listings like a feed can paginate effectively forever; the cap is what
/// guarantees a crawl terminates even against a backend that always
/// reports another page.
pub const DEFAULT_PAGE_LIMIT: u32 = 25;

/// Relationships never expanded unless the user overrides the exclusion
/// list. These three are known to be slow or unreliable on the backend.
pub const DEFAULT_EXCLUDED_RELATIONSHIPS: [&str; 3] =
    ["insights", "friends", "request_history"];

// ---------------------------------------------------------------------------
// HTTP retry policy
// ---------------------------------------------------------------------------

/// Bounded attempt count for retryable transport failures. Once spent,
/// exactly one terminal failure surfaces to the crawler.
pub const FETCH_RETRY_ATTEMPTS: u32 = 3;

/// Initial backoff delay between retry attempts, in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 250;

/// Upper bound on the exponential backoff delay, in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 2_000;

// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Reading these constants should tell you how the search behaves: how long
//! it waits for typing to settle, when a query is worth sending to the
//! search backend, and where the catalog lives.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Query pipeline
// ---------------------------------------------------------------------------

/// How long input must stay unchanged before a query is acted upon.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this (in chars) load the unfiltered catalog instead
/// of hitting the search endpoint.
pub const MIN_SEARCH_QUERY_CHARS: usize = 2;

/// Batches a session buffers before the pipeline waits for its consumer.
pub const RESULT_CHANNEL_CAPACITY: usize = 16;

/// Upper bound accepted for a configured debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Upper bound accepted for a configured minimum query length.
pub const MAX_MIN_QUERY_CHARS: usize = 64;

// ---------------------------------------------------------------------------
// Catalog backends
// ---------------------------------------------------------------------------

/// Backend serving the full product list and single-product lookups.
pub const DEFAULT_CATALOG_API_URL: &str = "https://fakestoreapi.com";

/// Backend serving text search (`/products/search?q=`).
pub const DEFAULT_SEARCH_API_URL: &str = "https://dummyjson.com";

/// Environment variable overriding the catalog backend.
pub const CATALOG_API_URL_ENV: &str = "CATALOG_API_URL";

/// Environment variable overriding the search backend.
pub const SEARCH_API_URL_ENV: &str = "SEARCH_API_URL";

// ---------------------------------------------------------------------------
// Response cache
// ---------------------------------------------------------------------------

/// Number of distinct endpoint responses kept in memory.
pub const RESPONSE_CACHE_CAPACITY: usize = 64;

/// Default time a cached response stays fresh, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Products rendered per batch unless overridden on the command line.
pub const DEFAULT_RESULT_DISPLAY_LIMIT: usize = 20;

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

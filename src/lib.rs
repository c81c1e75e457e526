// src/lib.rs
//! catalog-search library — a debounced, cancellable product search pipeline.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `FetchError`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `SearchConfig`
//! - **Domain model** — `Product`, `ResultBatch`, `FetchKind`
//! - **Domain types** — `Query`, `ProductId`, `BaseUrl`
//! - **API client** — `CatalogRepository`, `CatalogHttpClient`, parsers
//! - **Pipeline** — `QueryPipeline`, `QueryFetcher`, `SearchSession`
//! - **Output** — `ResultRenderer`

mod api;
mod config;
mod constants;
mod error;
mod model;
mod output;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FetchError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Action, CommandLineInput, Mode, SearchConfig};

// --- Domain Model ---
pub use crate::model::{FetchKind, Product, Rating, ResultBatch};

// --- Domain Types ---
pub use crate::types::{BaseUrl, ProductId, Query};

// --- API Client ---
pub use crate::api::{
    cache::ResponseCache,
    client::extract_response_text,
    parser::{parse_api_response, parse_product, parse_product_list, parse_search_results},
    ApiResponse, CachedCatalogClient, CatalogEndpoints, CatalogFetcher, CatalogHttpClient,
    CatalogRepository, QueryFetcher,
};

// --- Pipeline ---
pub use crate::pipeline::{PipelineSettings, QueryInput, QueryPipeline, SearchSession};

// --- Output ---
pub use crate::output::{write_block, ResultRenderer};

// --- Constants ---
pub use crate::constants::{MIN_SEARCH_QUERY_CHARS, RESPONSE_CACHE_CAPACITY, SEARCH_DEBOUNCE};

// src/api/mod.rs
//! Catalog API interaction: the ability to list, search and look up products.
//!
//! I/O lives in `client`, wire shapes in `responses`, decoding in `parser`.
//! The query pipeline never sees any of it: it talks to a [`QueryFetcher`],
//! and [`CatalogFetcher`] is the bridge from a [`CatalogRepository`].

pub mod cache;
pub mod client;
pub mod parser;
mod responses;

use crate::error::FetchError;
use crate::model::Product;
use crate::types::{ProductId, Query};
use std::sync::Arc;

/// The data source behind a query pipeline.
///
/// Items are opaque to the pipeline; it only decides which of the two
/// operations to call and what to do with the outcome.
#[async_trait::async_trait]
pub trait QueryFetcher: Send + Sync + 'static {
    type Item: Send + 'static;

    /// The unfiltered default batch, used for empty or too-short queries.
    async fn fetch_default(&self) -> Result<Vec<Self::Item>, FetchError>;

    /// The batch matching `query`.
    async fn fetch_by_query(&self, query: &Query) -> Result<Vec<Self::Item>, FetchError>;
}

/// The ability to retrieve products from a catalog backend.
#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;
    async fn search_products(&self, text: &str) -> Result<Vec<Product>, FetchError>;
    async fn retrieve_product(&self, id: &ProductId) -> Result<Product, FetchError>;
}

/// Serves a query pipeline from a catalog repository.
#[derive(Clone)]
pub struct CatalogFetcher {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogFetcher {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl QueryFetcher for CatalogFetcher {
    type Item = Product;

    async fn fetch_default(&self) -> Result<Vec<Product>, FetchError> {
        self.repository.list_products().await
    }

    async fn fetch_by_query(&self, query: &Query) -> Result<Vec<Product>, FetchError> {
        self.repository.search_products(query.as_str()).await
    }
}

pub use cache::CachedCatalogClient;
pub use client::{ApiResponse, CatalogEndpoints, CatalogHttpClient};

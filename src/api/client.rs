// src/api/client.rs
//! Thin HTTP client for the catalog backends.
//!
//! This module only moves bytes: it builds endpoint URLs, performs GET
//! requests and hands back the body with its status. Decoding happens in
//! `parser`.

use super::parser;
use crate::error::FetchError;
use crate::model::Product;
use crate::types::{BaseUrl, ProductId};
use reqwest::{header, Client, Response};
use url::Url;

/// Where each catalog operation is served from.
///
/// Listing and lookups go to the catalog backend; text search goes to the
/// search backend, which may be a different service.
#[derive(Debug, Clone)]
pub struct CatalogEndpoints {
    catalog: BaseUrl,
    search: BaseUrl,
}

impl CatalogEndpoints {
    pub fn new(catalog: BaseUrl, search: BaseUrl) -> Self {
        Self { catalog, search }
    }

    pub fn products(&self) -> Url {
        self.catalog.join_segments(&["products"])
    }

    pub fn product(&self, id: &ProductId) -> Url {
        self.catalog.join_segments(&["products", &id.to_string()])
    }

    /// The search URL, with `text` form-encoded into the `q` parameter.
    pub fn search(&self, text: &str) -> Url {
        let mut url = self.search.join_segments(&["products", "search"]);
        url.query_pairs_mut().append_pair("q", text);
        url
    }
}

/// A thin wrapper around reqwest Client for catalog requests.
#[derive(Clone)]
pub struct CatalogHttpClient {
    client: Client,
    endpoints: CatalogEndpoints,
}

impl CatalogHttpClient {
    pub fn new(endpoints: CatalogEndpoints) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoints })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    pub fn endpoints(&self) -> &CatalogEndpoints {
        &self.endpoints
    }

    /// Makes a GET request and returns the body with its status and URL.
    pub async fn get(&self, url: Url) -> Result<ApiResponse<String>, FetchError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        log::debug!("{} -> {}", response.url(), response.status());
        extract_response_text(response).await
    }
}

#[async_trait::async_trait]
impl super::CatalogRepository for CatalogHttpClient {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let result = self.get(self.endpoints.products()).await?;
        parser::parse_product_list(result)
    }

    async fn search_products(&self, text: &str) -> Result<Vec<Product>, FetchError> {
        let result = self.get(self.endpoints.search(text)).await?;
        parser::parse_search_results(result)
    }

    async fn retrieve_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let result = self.get(self.endpoints.product(id)).await?;
        parser::parse_product(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, FetchError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> CatalogEndpoints {
        CatalogEndpoints::new(
            BaseUrl::parse("https://fakestoreapi.com").unwrap(),
            BaseUrl::parse("https://dummyjson.com").unwrap(),
        )
    }

    #[test]
    fn test_catalog_endpoints() {
        let endpoints = endpoints();
        assert_eq!(
            endpoints.products().as_str(),
            "https://fakestoreapi.com/products"
        );
        assert_eq!(
            endpoints.product(&ProductId::new(5)).as_str(),
            "https://fakestoreapi.com/products/5"
        );
    }

    #[test]
    fn test_search_query_is_encoded() {
        assert_eq!(
            endpoints().search("red shoes&co").as_str(),
            "https://dummyjson.com/products/search?q=red+shoes%26co"
        );
    }
}

// src/api/parser.rs
//! Decoding of catalog responses into domain products.
//!
//! Every parser takes the raw [`ApiResponse`] so that live responses and
//! cache hits go through exactly the same path.

use super::client::ApiResponse;
use super::responses::{ErrorBody, ProductRecord, SearchEnvelope, ToDomain};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::FetchError;
use crate::model::Product;

/// Parse any catalog response, mapping non-2xx statuses to [`FetchError::Status`].
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, FetchError>
where
    T: serde::de::DeserializeOwned,
{
    if !result.status.is_success() {
        return Err(FetchError::Status {
            status: result.status.as_u16(),
            body_preview: describe_error_body(&result.data),
            url: result.url,
        });
    }

    serde_json::from_str(&result.data).map_err(|source| {
        log::error!("Failed to parse response from {}: {}", result.url, source);
        FetchError::MalformedResponse {
            url: result.url.clone(),
            source,
        }
    })
}

/// Parse the full product listing (a bare JSON array).
pub fn parse_product_list(result: ApiResponse<String>) -> Result<Vec<Product>, FetchError> {
    let records: Vec<ProductRecord> = parse_api_response(result)?;
    Ok(records.into_iter().map(ToDomain::to_domain).collect())
}

/// Parse a search response, unwrapping the `products` envelope.
pub fn parse_search_results(result: ApiResponse<String>) -> Result<Vec<Product>, FetchError> {
    let envelope: SearchEnvelope = parse_api_response(result)?;
    Ok(envelope
        .products
        .into_iter()
        .map(ToDomain::to_domain)
        .collect())
}

/// Parse a single-product lookup.
///
/// Some backends answer an unknown ID with `200` and an empty body; that is
/// reported as a 404 so callers can treat both the same way.
pub fn parse_product(result: ApiResponse<String>) -> Result<Product, FetchError> {
    if result.status.is_success() && result.data.trim().is_empty() {
        return Err(FetchError::Status {
            status: 404,
            url: result.url,
            body_preview: "empty response body".to_string(),
        });
    }
    let record: ProductRecord = parse_api_response(result)?;
    Ok(record.to_domain())
}

/// Prefers the backend's own error message, falling back to a body preview.
fn describe_error_body(body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<ErrorBody>(body) {
        return preview(&error.message);
    }
    preview(body)
}

fn preview(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

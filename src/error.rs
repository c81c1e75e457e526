// src/error.rs
//! Application error types.
//!
//! `FetchError` is the vocabulary of a failed catalog request. It is the only
//! failure the query pipeline knows about, and the pipeline never lets it
//! escape. `AppError` covers everything around the pipeline: configuration,
//! one-off lookups, rendering and I/O.

use crate::types::ValidationError;
use thiserror::Error;

/// Why a single catalog request failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog backend returned HTTP {status} for {url}: {body_preview}")]
    Status {
        status: u16,
        url: String,
        body_preview: String,
    },

    #[error("Malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

impl FetchError {
    /// Whether the backend answered but the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template {name}: {message}")]
    TemplateInvalid { name: String, message: String },

    #[error("Template render error for template {name}: {message}")]
    TemplateRender { name: String, message: String },

    #[error("Product {0} not found")]
    ProductNotFound(String),
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_status_and_url() {
        let err = FetchError::Status {
            status: 503,
            url: "https://dummyjson.com/products/search?q=ab".to_string(),
            body_preview: "upstream down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog backend returned HTTP 503 for https://dummyjson.com/products/search?q=ab: upstream down"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_classified() {
        let err = FetchError::Status {
            status: 404,
            url: "https://fakestoreapi.com/products/999".to_string(),
            body_preview: String::new(),
        };
        assert!(err.is_not_found());
        assert!(!FetchError::Unavailable("offline".into()).is_not_found());
    }

    #[test]
    fn fetch_error_converts_into_app_error() {
        let app: AppError = FetchError::Unavailable("offline".into()).into();
        assert_eq!(app.to_string(), "Catalog unavailable: offline");
    }
}

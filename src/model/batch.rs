use crate::types::Query;
use std::fmt;

/// Which backend operation produced a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// The unfiltered catalog, used for empty or too-short queries.
    Default,
    /// A text search for the query.
    Search,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchKind::Default => write!(f, "catalog"),
            FetchKind::Search => write!(f, "search"),
        }
    }
}

/// The items produced by exactly one fetch, in backend order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBatch<T> {
    pub query: Query,
    pub kind: FetchKind,
    pub items: Vec<T>,
    /// Set when the fetch failed and this (empty) batch stands in for it.
    pub recovered_from: Option<String>,
}

impl<T> ResultBatch<T> {
    pub fn fetched(query: Query, kind: FetchKind, items: Vec<T>) -> Self {
        Self {
            query,
            kind,
            items,
            recovered_from: None,
        }
    }

    /// An empty batch standing in for a failed fetch.
    pub fn recovered(query: Query, kind: FetchKind, cause: impl Into<String>) -> Self {
        Self {
            query,
            kind,
            items: Vec::new(),
            recovered_from: Some(cause.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_recovered(&self) -> bool {
        self.recovered_from.is_some()
    }
}

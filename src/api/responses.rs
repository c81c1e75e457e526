// src/api/responses.rs
//! Wire shapes of the two catalog backends.
//!
//! The catalog backend reports `image` and a `{rate, count}` rating; the
//! search backend reports `thumbnail`, a bare numeric rating, and wraps its
//! results in a `{ "products": [...] }` envelope. Both collapse into
//! [`Product`].

use crate::model::{Product, Rating};
use crate::types::ProductId;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, alias = "thumbnail")]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingRecord>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RatingRecord {
    Detailed { rate: f64, count: u64 },
    Score(f64),
}

/// Envelope returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    pub products: Vec<ProductRecord>,
}

/// Error body some backends send with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Trait for converting wire records to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> T;
}

impl ToDomain<Product> for ProductRecord {
    fn to_domain(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image.filter(|url| !url.is_empty()),
            rating: self.rating.map(ToDomain::to_domain),
        }
    }
}

impl ToDomain<Rating> for RatingRecord {
    fn to_domain(self) -> Rating {
        match self {
            RatingRecord::Detailed { rate, count } => Rating {
                score: rate,
                votes: Some(count),
            },
            RatingRecord::Score(score) => Rating { score, votes: None },
        }
    }
}

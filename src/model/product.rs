use crate::types::ProductId;

/// A catalog entry, independent of which backend produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub rating: Option<Rating>,
}

/// Customer rating. `votes` is only reported by some backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub score: f64,
    pub votes: Option<u64>,
}

impl Product {
    /// Price formatted for display, always with two decimals.
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price)
    }
}

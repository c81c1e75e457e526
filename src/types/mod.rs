use thiserror::Error;

mod ids;
mod query;
mod urls;

pub use ids::*;
pub use query::*;
pub use urls::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid product ID: {0}")]
    InvalidProductId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Value out of bounds for {field}: {value}, expected {min}..={max}")]
    OutOfBounds {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

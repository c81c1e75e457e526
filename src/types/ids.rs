use super::ValidationError;
use std::fmt;

/// Catalog identifier of a single product.
///
/// Both catalog backends number their products with positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(u64);

impl ProductId {
    /// Parses user input such as `"7"` or `" 12 "` into a product ID.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        match trimmed.parse::<u64>() {
            Ok(0) => Err(ValidationError::InvalidProductId(
                "product IDs start at 1".to_string(),
            )),
            Ok(value) => Ok(Self(value)),
            Err(_) => Err(ValidationError::InvalidProductId(format!(
                "expected a positive integer, got '{}'",
                trimmed
            ))),
        }
    }

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_parsing() {
        assert_eq!(ProductId::parse("7").unwrap().value(), 7);
        assert_eq!(ProductId::parse("  12 ").unwrap().value(), 12);
    }

    #[test]
    fn test_invalid_product_ids() {
        assert!(ProductId::parse("").is_err());
        assert!(ProductId::parse("0").is_err());
        assert!(ProductId::parse("-3").is_err());
        assert!(ProductId::parse("abc").is_err());
    }
}

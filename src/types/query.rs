use std::fmt;

/// One value of the search input, exactly as the user typed it.
///
/// Queries carry no identity beyond their text: two queries are the same
/// query when their strings are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The empty query, which stands for "show the whole catalog".
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in chars, not bytes.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether this query is long enough to be sent to the search endpoint.
    pub fn is_searchable(&self, min_chars: usize) -> bool {
        !self.is_empty() && self.char_len() >= min_chars
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

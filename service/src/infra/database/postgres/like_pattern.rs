//! [`LikePattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// SQL `LIKE` pattern matching a substring anywhere in the value.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct LikePattern(String);

impl LikePattern {
    /// Creates a new [`LikePattern`] out of the given `input`, escaping its
    /// `LIKE` metacharacters.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "%{}%",
            input
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

#[cfg(test)]
mod spec {
    use super::LikePattern;

    #[test]
    fn wraps_input_with_wildcards() {
        assert_eq!(LikePattern::new("ahmed").to_string(), "%ahmed%");
    }

    #[test]
    fn escapes_metacharacters() {
        assert_eq!(
            LikePattern::new(r"100%_a\b").to_string(),
            r"%100\%\_a\\b%",
        );
    }
}

//! Strongly-typed product identifier
//!
//! Product ids are positive integers allocated by the store. Wrapping them in
//! a newtype keeps them from being confused with quantities or thresholds.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Identifier of a product, always >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(NonZeroU32);

impl ProductId {
    /// The id handed out for the first product of an empty store
    pub const FIRST: ProductId = ProductId(NonZeroU32::MIN);

    /// Create an id from a raw value, `None` for zero
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Get the raw value
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// The id following this one, `None` on overflow
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ProductIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| ProductIdParseError(s.to_string()))?;
        Self::new(value).ok_or_else(|| ProductIdParseError(s.to_string()))
    }
}

/// Error returned when a string is not a positive integer id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdParseError(pub String);

impl fmt::Display for ProductIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid product id: {}", self.0)
    }
}

impl std::error::Error for ProductIdParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_an_id() {
        assert!(ProductId::new(0).is_none());
        assert!("0".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert!("-3".parse::<ProductId>().is_err());
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_next() {
        assert_eq!(ProductId::FIRST.next(), ProductId::new(2));
        assert!(ProductId::new(u32::MAX).unwrap().next().is_none());
    }

    #[test]
    fn test_ordering() {
        assert!(ProductId::new(2).unwrap() > ProductId::FIRST);
    }
}

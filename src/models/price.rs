//! Price type for representing product prices
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Arithmetic is checked: totals that leave the `i64` range are
//! reported as `None` instead of wrapping.

use std::fmt;

/// A price stored as cents (hundredths of the currency unit)
///
/// The type can hold negative amounts so that invalid input can be reported
/// by validation rather than lost at parse time; stored products never carry
/// a negative price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Create a price from cents
    ///
    /// # Examples
    /// ```
    /// use inventory::models::Price;
    /// let price = Price::from_cents(999); // 9.99
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero price
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Sum of two prices, `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Value of `quantity` units at this price, `None` on overflow
    pub fn checked_times(self, quantity: i64) -> Option<Self> {
        self.0.checked_mul(quantity).map(Self)
    }

    /// Parse a price from a decimal string
    ///
    /// Accepts "10.50", "10.5", "10", ".5" and a leading '-'. More than two
    /// fractional digits is rejected rather than rounded.
    pub fn parse(s: &str) -> Result<Self, PriceParseError> {
        let raw = s.trim();
        let invalid = || PriceParseError::InvalidFormat(raw.to_string());

        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let (units_str, cents_str) = match digits.split_once('.') {
            Some((units, cents)) => (units, cents),
            None => (digits, ""),
        };

        if units_str.is_empty() && cents_str.is_empty() {
            return Err(invalid());
        }
        if !units_str.chars().all(|c| c.is_ascii_digit())
            || !cents_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if cents_str.len() > 2 {
            return Err(PriceParseError::TooPrecise(raw.to_string()));
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match cents_str.len() {
            0 => 0,
            1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => cents_str.parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{}", self, symbol)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

/// Error type for price parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    InvalidFormat(String),
    TooPrecise(String),
}

impl fmt::Display for PriceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceParseError::InvalidFormat(s) => write!(f, "Invalid price format: {}", s),
            PriceParseError::TooPrecise(s) => {
                write!(f, "Price has more than two decimal places: {}", s)
            }
        }
    }
}

impl std::error::Error for PriceParseError {}

//! Price handling for string-encoded amounts.
//!
//! The menu API encodes prices as strings (sometimes with a trailing
//! currency marker). Parsing is deliberately lenient: sorting a product
//! list must never fail because one row carries a malformed price.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price parsed from its string-encoded wire form.
///
/// Ordering is numeric, so `"80"` sorts above `"9.50"`.
///
/// # Examples
///
/// ```
/// use roastline_core::Price;
///
/// assert!(Price::parse("80") > Price::parse("9.50"));
/// assert_eq!(Price::parse("45.50 TL"), Price::parse("45.5"));
/// assert_eq!(Price::parse("n/a"), Price::parse("0"));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse a price from its wire representation.
    ///
    /// Takes the leading numeric prefix (digits plus at most one decimal
    /// point) and ignores anything after it. Input with no numeric prefix
    /// parses as zero.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let mut buf = String::new();
        for c in s.trim().chars() {
            match c {
                '0'..='9' => buf.push(c),
                '.' if !buf.is_empty() && !buf.contains('.') => buf.push(c),
                _ => break,
            }
        }
        let buf = buf.trim_end_matches('.');
        Decimal::from_str(buf).map_or(Self::ZERO, Self)
    }

    /// The numeric amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(Price::parse("50"), Price(Decimal::from(50)));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Price::parse("45.50").to_string(), "45.50");
    }

    #[test]
    fn test_parse_with_trailing_text() {
        assert_eq!(Price::parse("80 TL"), Price::parse("80"));
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(Price::parse("n/a"), Price::ZERO);
        assert_eq!(Price::parse(""), Price::ZERO);
        assert_eq!(Price::parse("free!"), Price::ZERO);
    }

    #[test]
    fn test_parse_trailing_dot() {
        assert_eq!(Price::parse("12."), Price::parse("12"));
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(Price::parse("80") > Price::parse("50"));
        assert!(Price::parse("9.50") < Price::parse("80"));
    }
}

//! Rupee prices using decimal arithmetic.
//!
//! The store sells in Indian rupees only, so a price is a bare decimal amount.
//! Display follows the Indian digit grouping used on the site
//! (`₹1,23,456.00`: the last three digits, then groups of two).

use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The input is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
}

/// A price in Indian rupees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount, the identity for totals.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Parse a positive price from user input such as `"12999.50"`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] for non-numeric input and
    /// [`PriceError::NotPositive`] for zero or negative amounts.
    pub fn parse_positive(input: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(input.trim()).map_err(|_| PriceError::NotANumber)?;
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a quantity (a cart or order line total).
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format with two decimals, e.g. `₹35,000.00`.
    #[must_use]
    pub fn display(&self) -> String {
        let fixed = format!(
            "{:.2}",
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        );
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("₹{}.{fraction}", group_indian(whole))
    }

    /// Format rounded to whole rupees, e.g. `₹35,000`.
    #[must_use]
    pub fn display_whole(&self) -> String {
        let whole = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .trunc()
            .to_string();
        format!("₹{}", group_indian(&whole))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert Indian-style group separators into a string of digits.
fn group_indian(digits: &str) -> String {
    let (sign, digits) = digits
        .strip_prefix('-')
        .map_or(("", digits), |rest| ("-", rest));

    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{sign}{},{last_three}", groups.join(","))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_indian_style() {
        assert_eq!(Price::from_rupees(0).display(), "₹0.00");
        assert_eq!(Price::from_rupees(999).display(), "₹999.00");
        assert_eq!(Price::from_rupees(35_000).display(), "₹35,000.00");
        assert_eq!(Price::from_rupees(123_456).display(), "₹1,23,456.00");
        assert_eq!(Price::from_rupees(12_345_678).display(), "₹1,23,45,678.00");
    }

    #[test]
    fn test_display_whole_rounds() {
        let price = Price::parse_positive("12999.50").unwrap();
        assert_eq!(price.display(), "₹12,999.50");
        assert_eq!(price.display_whole(), "₹13,000");
    }

    #[test]
    fn test_times_and_sum() {
        let chair = Price::from_rupees(12_000);
        let sofa = Price::from_rupees(35_000);
        assert_eq!(chair.times(3), Price::from_rupees(36_000));
        let total: Price = [chair.times(2), sofa].into_iter().sum();
        assert_eq!(total, Price::from_rupees(59_000));
        assert_eq!(std::iter::empty::<Price>().sum::<Price>(), Price::ZERO);
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(Price::parse_positive(" 450 ").unwrap(), Price::from_rupees(450));
        assert_eq!(Price::parse_positive("abc"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse_positive("0"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse_positive("-5"), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_group_indian_negative() {
        assert_eq!(group_indian("-1234"), "-1,234");
    }
}

//! Prices

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Arithmetic overflow while combining prices.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("price arithmetic overflowed")]
pub struct PriceOverflow;

/// Represents a price in pence/cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Creates a price from minor currency units.
    #[must_use]
    pub const fn from_minor(value: u64) -> Self {
        Price(value)
    }

    /// The value in minor currency units.
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Whether this is a zero amount.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiplies the unit price by a line quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] when the product is not representable.
    pub fn times(self, quantity: u32) -> Result<Price, PriceOverflow> {
        self.0
            .checked_mul(u64::from(quantity))
            .map(Price)
            .ok_or(PriceOverflow)
    }

    /// Adds another price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] when the sum is not representable.
    pub fn checked_add(self, other: Price) -> Result<Price, PriceOverflow> {
        self.0.checked_add(other.0).map(Price).ok_or(PriceOverflow)
    }
}

impl fmt::Display for Price {
    /// Renders as major units with two decimals, e.g. `30.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

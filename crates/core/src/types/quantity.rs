//! Line quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The requested quantity is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    BelowOne(i64),
    /// The requested quantity does not fit in a `u32`.
    #[error("quantity {0} is too large")]
    TooLarge(i64),
}

/// A positive item count.
///
/// A cart line can never hold zero or a negative count; requests that would
/// produce one are rejected at construction.
///
/// ## Examples
///
/// ```
/// use vitrine_core::Quantity;
///
/// assert_eq!(Quantity::new(2).unwrap().get(), 2);
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single item.
    pub const ONE: Self = Self(1);

    /// Build a quantity from any signed request.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is below 1 or exceeds `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::BelowOne(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::TooLarge(value))
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add `extra` items, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, extra: Self) -> Self {
        Self(self.0.saturating_add(extra.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are held in the currency's standard unit (reais, dollars), not in
//! minor units. Rounding to minor units uses banker's rounding
//! (`MidpointNearestEven`), so a half-cent never drifts in one direction
//! across many lines.
//!
//! Display formatting follows the conventions of each currency's home
//! market:
//!
//! | Currency | Example        |
//! |----------|----------------|
//! | BRL      | `R$ 4.990,00`  |
//! | USD      | `$4,990.00`    |
//! | EUR      | `€4.990,00`    |
//! | GBP      | `£4,990.00`    |

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a formatted [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input does not start with the currency symbol.
    #[error("price must start with the {symbol} symbol")]
    MissingSymbol {
        /// Expected currency symbol.
        symbol: &'static str,
    },
    /// The numeric part could not be read as a decimal.
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Whole-unit price, e.g. `Price::from_units(4990, BRL)` is R$ 4.990,00.
    #[must_use]
    pub fn from_units(units: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::from(units), currency_code)
    }

    /// Multiply by a line quantity, saturating at the largest representable
    /// amount.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency_code,
        )
    }

    /// Multiply by a line quantity, or `None` if the amount would overflow.
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Round to the currency's minor units using banker's rounding.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(
            self.amount.round_dp_with_strategy(
                self.currency_code.minor_units(),
                RoundingStrategy::MidpointNearestEven,
            ),
            self.currency_code,
        )
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., `R$ 4.990,00`).
    #[must_use]
    pub fn display(&self) -> String {
        let currency = self.currency_code;
        let style = currency.style();
        let rounded = self.rounded().amount;
        let digits = format!("{:.*}", currency.minor_units() as usize, rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut out = String::with_capacity(digits.len() + 8);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(currency.symbol());
        if style.symbol_spaced {
            out.push(' ');
        }
        out.push_str(&group_thousands(whole, style.thousands));
        if !fraction.is_empty() {
            out.push(style.decimal);
            out.push_str(fraction);
        }
        out
    }

    /// Parse a price formatted the way [`Price::display`] formats it.
    ///
    /// Accepts the non-breaking space some locale formatters put after the
    /// symbol, and plain decimals after the symbol (`R$ 50`).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, lacks the currency symbol,
    /// or the numeric part is not a valid decimal.
    pub fn parse_display(s: &str, currency_code: CurrencyCode) -> Result<Self, PriceParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceParseError::Empty);
        }

        let (negative, rest) = trimmed
            .strip_prefix('-')
            .map_or((false, trimmed), |rest| (true, rest.trim_start()));

        let symbol = currency_code.symbol();
        let rest = rest
            .strip_prefix(symbol)
            .ok_or(PriceParseError::MissingSymbol { symbol })?;

        let style = currency_code.style();
        let normalized: String = rest
            .chars()
            .filter(|c| !c.is_whitespace() && *c != style.thousands)
            .map(|c| if c == style.decimal { '.' } else { c })
            .collect();

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceParseError::InvalidAmount(rest.trim().to_string()))?;

        Ok(Self::new(if negative { -amount } else { amount }, currency_code))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert a thousands separator every three digits from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Locale conventions for rendering an amount.
#[derive(Debug, Clone, Copy)]
struct NumberStyle {
    thousands: char,
    decimal: char,
    symbol_spaced: bool,
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// Number of decimal places in the minor unit.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::BRL | Self::USD | Self::EUR | Self::GBP => 2,
        }
    }

    /// Character that groups thousands in displayed amounts (`.` for BRL).
    #[must_use]
    pub const fn thousands_separator(self) -> char {
        self.style().thousands
    }

    const fn style(self) -> NumberStyle {
        match self {
            Self::BRL => NumberStyle {
                thousands: '.',
                decimal: ',',
                symbol_spaced: true,
            },
            Self::EUR => NumberStyle {
                thousands: '.',
                decimal: ',',
                symbol_spaced: false,
            },
            Self::USD | Self::GBP => NumberStyle {
                thousands: ',',
                decimal: '.',
                symbol_spaced: false,
            },
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::BRL),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            other => Err(format!("unsupported currency code: {other}")),
        }
    }
}

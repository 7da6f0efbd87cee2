//! Garment or shoe size label.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Apparel sizes offered on the product detail screen, smallest first.
pub const APPAREL_SIZES: [&str; 5] = ["PP", "P", "M", "G", "GG"];

/// Errors that can occur when parsing a [`Size`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// The input string is empty or only whitespace.
    #[error("size cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("size must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A size label such as `M`, `GG` or a numeric shoe size like `40`.
///
/// Labels are stored trimmed and upper-cased so `"gg "` and `"GG"` compare
/// equal when merging cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Size(String);

impl Size {
    /// Maximum label length.
    pub const MAX_LENGTH: usize = 8;

    /// Parse a `Size` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Size::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, SizeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SizeError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(SizeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The standard apparel sizes, in display order.
    #[must_use]
    pub fn apparel() -> Vec<Self> {
        APPAREL_SIZES
            .iter()
            .map(|label| Self((*label).to_string()))
            .collect()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Size {
    type Error = SizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.0
    }
}

impl AsRef<str> for Size {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

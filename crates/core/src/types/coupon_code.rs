//! Coupon code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CouponCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CouponCodeError {
    /// The input is empty after trimming.
    #[error("coupon code cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("coupon code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `A-Z`, `0-9`, `-`, `_`.
    #[error("coupon code contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// A coupon code in canonical (uppercase) form.
///
/// Shoppers type codes in whatever case they like, so the canonical form is
/// what gets stored and compared.
///
/// ```
/// use storehaus_core::CouponCode;
///
/// let code = CouponCode::parse(" save10 ").unwrap();
/// assert_eq!(code.as_str(), "SAVE10");
/// assert!(CouponCode::parse("half off").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Maximum length of a coupon code.
    pub const MAX_LENGTH: usize = 32;

    /// Parse a coupon code, trimming and uppercasing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains characters other than ASCII letters,
    /// digits, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, CouponCodeError> {
        let code = s.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(CouponCodeError::Empty);
        }
        if code.chars().count() > Self::MAX_LENGTH {
            return Err(CouponCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if let Some(bad) = code
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
        {
            return Err(CouponCodeError::InvalidCharacter(bad));
        }
        Ok(Self(code))
    }

    /// Returns the canonical code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self {
        code.0
    }
}

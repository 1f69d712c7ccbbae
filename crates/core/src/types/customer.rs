//! Customer contact types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating customer contact details.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// Name or mobile number is missing.
    #[error("Please enter your name and mobile number.")]
    MissingContact,
    /// The mobile number contains non-digit characters.
    #[error("Mobile number may contain digits only.")]
    NonDigitMobile,
    /// The mobile number is longer than 10 digits.
    #[error("Mobile number must be at most {max} digits.")]
    MobileTooLong {
        /// Maximum allowed number of digits.
        max: usize,
    },
}

/// A customer mobile number.
///
/// ## Constraints
///
/// - Digits only
/// - 1-10 digits
///
/// ## Examples
///
/// ```
/// use bhojan_core::MobileNumber;
///
/// assert!(MobileNumber::parse("9876543210").is_ok());
/// assert!(MobileNumber::parse("").is_err());           // empty
/// assert!(MobileNumber::parse("98-76").is_err());      // non-digits
/// assert!(MobileNumber::parse("98765432109").is_err()); // too long
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Maximum number of digits in a local mobile number.
    pub const MAX_DIGITS: usize = 10;

    /// Parse a `MobileNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains anything other
    /// than ASCII digits, or is longer than 10 digits.
    pub fn parse(s: &str) -> Result<Self, CustomerError> {
        if s.is_empty() {
            return Err(CustomerError::MissingContact);
        }

        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(CustomerError::NonDigitMobile);
        }

        if s.len() > Self::MAX_DIGITS {
            return Err(CustomerError::MobileTooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MobileNumber {
    type Err = CustomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Transient customer details entered alongside an order.
///
/// Never persisted; cleared after a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    /// Customer name as typed.
    pub name: String,
    /// Mobile number as typed (validated on submit).
    pub mobile: String,
    /// Optional fallback delivery address.
    pub address: Option<String>,
}

impl CustomerDraft {
    /// Validate the draft for submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or mobile number is empty, or the
    /// mobile number fails to parse.
    pub fn validate(&self) -> Result<MobileNumber, CustomerError> {
        if self.name.trim().is_empty() || self.mobile.is_empty() {
            return Err(CustomerError::MissingContact);
        }
        MobileNumber::parse(&self.mobile)
    }

    /// The fallback address, if one was entered.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

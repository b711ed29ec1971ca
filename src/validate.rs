//! Field validation for the share generation form
//!
//! Raw field strings are checked in a fixed order (secret, total shares,
//! threshold) and only the first failure is reported. Errors are values, so a
//! host can put the message next to the offending field and carry on.

use std::fmt;
use std::num::IntErrorKind;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{MasterSecret, ShareCount, SplitConfig, Threshold};

/// Input field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Secret,
    TotalShares,
    Threshold,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Secret => "master secret",
            Self::TotalShares => "total shares",
            Self::Threshold => "threshold",
        })
    }
}

/// A rejected generation field; the message is the text shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Master Secret must be at least 128 bits (32 hex chars)")]
    SecretTooShort,

    #[error("Master Secret must be hexadecimal")]
    SecretNotHex,

    #[error("Master Secret must be an even number of bytes (multiples of 4 hex chars)")]
    SecretOddBytes,

    #[error("Value must be a number")]
    TotalSharesNotNumber,

    #[error("Must be at least 1")]
    TotalSharesTooFew,

    #[error("Total shares must be {max} or less")]
    TotalSharesTooMany { max: u8 },

    #[error("Value must be a number")]
    ThresholdNotNumber,

    #[error("Must be less than or equal to total shares")]
    ThresholdTooLarge,

    #[error("Must be at least 1")]
    ThresholdTooSmall,
}

impl ValidationError {
    /// The field this error is displayed under
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::SecretTooShort | Self::SecretNotHex | Self::SecretOddBytes => Field::Secret,
            Self::TotalSharesNotNumber | Self::TotalSharesTooFew | Self::TotalSharesTooMany { .. } => {
                Field::TotalShares
            }
            Self::ThresholdNotNumber | Self::ThresholdTooLarge | Self::ThresholdTooSmall => {
                Field::Threshold
            }
        }
    }
}

/// Fully validated generation inputs
#[derive(Debug, Clone)]
pub struct ValidatedSplit {
    pub secret: MasterSecret,
    pub config: SplitConfig,
}

/// Validates the secret, total-shares and threshold fields
///
/// # Errors
/// Returns the first failing rule, in the order secret -> total shares -> threshold
///
/// # Examples
///
/// ```rust
/// use slip39_tool::validate::{validate, Field};
///
/// let ok = validate("abcdef0123456789abcdef0123456789", "5", "3").unwrap();
/// assert_eq!(*ok.config.share_count(), 5);
///
/// // Both the secret and the threshold are wrong; only the secret is reported
/// let err = validate("abc", "5", "9").unwrap_err();
/// assert_eq!(err.field(), Field::Secret);
/// ```
pub fn validate(
    secret_hex: &str,
    total_shares: &str,
    threshold: &str,
) -> Result<ValidatedSplit, ValidationError> {
    let secret = MasterSecret::from_hex(secret_hex)?;

    let total = parse_integer(total_shares).ok_or(ValidationError::TotalSharesNotNumber)?;
    let share_count = ShareCount::new(total)?;

    let threshold = parse_integer(threshold).ok_or(ValidationError::ThresholdNotNumber)?;
    if threshold > i64::from(*share_count) {
        return Err(ValidationError::ThresholdTooLarge);
    }
    let config = SplitConfig::new(Threshold::new(threshold)?, share_count)?;

    Ok(ValidatedSplit { secret, config })
}

/// Parses a base-10 integer field, ignoring surrounding whitespace
///
/// Digit strings too large for `i64` saturate instead of failing, so they are
/// reported as out of range rather than as non-numeric.
fn parse_integer(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "abcdef0123456789abcdef0123456789";

    fn error_of(secret: &str, total: &str, threshold: &str) -> ValidationError {
        validate(secret, total, threshold).unwrap_err()
    }

    #[test]
    fn test_valid_inputs() {
        let validated = validate(SECRET, "3", "2").unwrap();
        assert_eq!(validated.secret.len(), 16);
        assert_eq!(*validated.config.share_count(), 3);
        assert_eq!(*validated.config.threshold(), 2);
    }

    #[test]
    fn test_secret_messages() {
        assert_eq!(
            error_of("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "3", "2").to_string(),
            "Master Secret must be at least 128 bits (32 hex chars)"
        );
        assert_eq!(
            error_of("abcdef0123456789abcdef0123456789a", "3", "2").to_string(),
            "Master Secret must be an even number of bytes (multiples of 4 hex chars)"
        );
    }

    #[test]
    fn test_total_shares_bounds() {
        assert_eq!(error_of(SECRET, "0", "1").to_string(), "Must be at least 1");
        assert_eq!(
            error_of(SECRET, "17", "2").to_string(),
            "Total shares must be 16 or less"
        );
        assert_eq!(
            error_of(SECRET, "four", "2").to_string(),
            "Value must be a number"
        );
        assert_eq!(error_of(SECRET, "", "2").field(), Field::TotalShares);
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(
            error_of(SECRET, "5", "6").to_string(),
            "Must be less than or equal to total shares"
        );
        let err = error_of(SECRET, "5", "0");
        assert_eq!(err, ValidationError::ThresholdTooSmall);
        assert_eq!(err.field(), Field::Threshold);
        assert_eq!(error_of(SECRET, "5", "-2"), ValidationError::ThresholdTooSmall);
        assert_eq!(error_of(SECRET, "5", "x"), ValidationError::ThresholdNotNumber);
    }

    #[test]
    fn test_threshold_of_one_is_valid() {
        assert!(validate(SECRET, "5", "1").is_ok());
    }

    #[test]
    fn test_precedence_is_secret_then_total_then_threshold() {
        assert_eq!(error_of("", "0", "x").field(), Field::Secret);
        assert_eq!(error_of(SECRET, "0", "x").field(), Field::TotalShares);
        assert_eq!(error_of(SECRET, "3", "x").field(), Field::Threshold);
    }

    #[test]
    fn test_whitespace_around_numbers_is_ignored() {
        let validated = validate(SECRET, " 4 ", "\t2\n").unwrap();
        assert_eq!(*validated.config.share_count(), 4);
    }

    #[test]
    fn test_huge_numbers_are_out_of_range_not_non_numeric() {
        assert_eq!(
            error_of(SECRET, "99999999999999999999999", "2"),
            ValidationError::TotalSharesTooMany { max: 16 }
        );
        assert_eq!(
            error_of(SECRET, "-99999999999999999999999", "2"),
            ValidationError::TotalSharesTooFew
        );
        assert_eq!(
            error_of(SECRET, "3", "99999999999999999999999"),
            ValidationError::ThresholdTooLarge
        );
    }
}

//! `ShareCount` newtype for the total-shares field

use crate::validate::ValidationError;

/// Number of shares to create (1..=16)
///
/// Each share is carried as its own SLIP-39 group, and the group count is a
/// 4-bit field in every mnemonic, which caps the total at 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShareCount(u8);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u8 = 1;

    /// Maximum valid share count (16)
    pub const MAX: u8 = 16;

    /// Creates a new share count from a parsed field value
    ///
    /// # Errors
    /// Returns [`ValidationError::TotalSharesTooFew`] for values below 1 and
    /// [`ValidationError::TotalSharesTooMany`] for values above 16
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_tool::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// assert!(ShareCount::new(0).is_err());
    /// assert!(ShareCount::new(17).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < i64::from(Self::MIN) {
            return Err(ValidationError::TotalSharesTooFew);
        }
        if value > i64::from(Self::MAX) {
            return Err(ValidationError::TotalSharesTooMany { max: Self::MAX });
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is range-checked to 1..=16 above"
        )]
        Ok(Self(value as u8))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

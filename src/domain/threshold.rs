//! Threshold newtype for the threshold field

use crate::validate::ValidationError;

/// Number of shares required to reconstruct the secret (>= 1)
///
/// A threshold of 1 is allowed: every share then carries the whole
/// (passphrase-encrypted) secret on its own. The upper bound depends on the
/// share count and is enforced by [`SplitConfig`](super::SplitConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    /// Creates a new threshold from a parsed field value
    ///
    /// # Errors
    /// Returns [`ValidationError::ThresholdTooSmall`] if the value is 0 or
    /// negative, and [`ValidationError::ThresholdTooLarge`] if it cannot be any
    /// valid share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_tool::domain::Threshold;
    ///
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    ///
    /// assert!(Threshold::new(1).is_ok());
    /// assert!(Threshold::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 1 {
            return Err(ValidationError::ThresholdTooSmall);
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::ThresholdTooLarge)
    }
}

impl std::ops::Deref for Threshold {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

//! Cross-field check between threshold and total shares

use super::{ShareCount, Threshold};
use crate::validate::ValidationError;

/// Threshold and share count that passed the cross-field check
///
/// A threshold can never exceed the number of shares handed out, otherwise
/// the secret could not be rebuilt from the full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    threshold: Threshold,
    share_count: ShareCount,
}

impl SplitConfig {
    /// Pairs a threshold with a share count
    ///
    /// # Errors
    /// Returns [`ValidationError::ThresholdTooLarge`] if threshold exceeds share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_tool::domain::{ShareCount, SplitConfig, Threshold};
    ///
    /// let config = SplitConfig::new(
    ///     Threshold::new(3).unwrap(),
    ///     ShareCount::new(5).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(*config.threshold(), 3);
    /// assert_eq!(*config.share_count(), 5);
    ///
    /// // 5-of-3 can never be reconstructed
    /// assert!(SplitConfig::new(Threshold::new(5).unwrap(), ShareCount::new(3).unwrap()).is_err());
    /// ```
    pub fn new(threshold: Threshold, share_count: ShareCount) -> Result<Self, ValidationError> {
        if *threshold > *share_count {
            return Err(ValidationError::ThresholdTooLarge);
        }
        Ok(Self {
            threshold,
            share_count,
        })
    }

    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }

    /// Derivation paths `r/0` .. `r/{share_count - 1}`, one per share
    pub fn share_paths(&self) -> impl Iterator<Item = super::DerivationPath> {
        (0..*self.share_count).map(super::DerivationPath::group)
    }
}

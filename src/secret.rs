//! Random master secret generation
//!
//! Entropy comes from the platform CSPRNG through `getrandom` (the browser's
//! `crypto.getRandomValues()` on wasm32).

use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::MasterSecret;

/// The platform random source could not be used
///
/// This disables secret generation for the whole session; manual secret entry
/// and reconstruction do not depend on it.
#[derive(Debug, Error)]
#[error("Secure random source unavailable: {0}")]
pub struct EntropyUnavailable(#[from] getrandom::Error);

/// Rejected secret strength
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Strength must be a multiple of 16 bits between 128 and 2048 (got {0})")]
pub struct InvalidStrength(pub u16);

/// Size of a generated secret in bits
///
/// A positive multiple of 16 so the secret has an even number of bytes, and at
/// least 128 bits so the result passes secret validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength(u16);

impl Strength {
    pub const MIN_BITS: u16 = 128;
    pub const MAX_BITS: u16 = 2048;

    /// Strengths offered by the generate buttons, in display order
    pub const PRESETS: [Strength; 5] = [
        Strength(128),
        Strength(160),
        Strength(192),
        Strength(224),
        Strength(256),
    ];

    /// # Errors
    /// Returns [`InvalidStrength`] unless `bits` is a multiple of 16 in 128..=2048
    pub fn new(bits: u16) -> Result<Self, InvalidStrength> {
        if bits % 16 != 0 || !(Self::MIN_BITS..=Self::MAX_BITS).contains(&bits) {
            return Err(InvalidStrength(bits));
        }
        Ok(Self(bits))
    }

    #[must_use]
    pub fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn bytes(self) -> usize {
        usize::from(self.0 / 8)
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self::PRESETS[0]
    }
}

/// Generates a random master secret of the given strength
///
/// # Errors
/// Returns [`EntropyUnavailable`] if the platform random source fails
pub fn generate_secret(strength: Strength) -> Result<MasterSecret, EntropyUnavailable> {
    let mut bytes = Zeroizing::new(vec![0u8; strength.bytes()]);
    getrandom::getrandom(&mut bytes)?;
    debug!(bits = strength.bits(), "generated master secret");

    // Strength guarantees >= 16 bytes and an even length
    MasterSecret::from_bytes(bytes).map_err(|_| unreachable!("Strength yields a valid length"))
}

/// Generates a random master secret and returns it as lowercase hex
///
/// # Errors
/// Returns [`EntropyUnavailable`] if the platform random source fails
///
/// # Examples
///
/// ```rust
/// use slip39_tool::secret::{generate_secret_hex, Strength};
///
/// let hex = generate_secret_hex(Strength::new(160).unwrap()).unwrap();
/// assert_eq!(hex.len(), 40);
/// ```
pub fn generate_secret_hex(strength: Strength) -> Result<Zeroizing<String>, EntropyUnavailable> {
    Ok(generate_secret(strength)?.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test]
    fn test_strength_must_be_multiple_of_16() {
        assert!(Strength::new(128).is_ok());
        assert!(Strength::new(144).is_ok());
        assert_eq!(Strength::new(136).unwrap_err(), InvalidStrength(136));
        assert_eq!(Strength::new(0).unwrap_err(), InvalidStrength(0));
        assert_eq!(Strength::new(112).unwrap_err(), InvalidStrength(112));
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in Strength::PRESETS {
            assert_eq!(Strength::new(preset.bits()).unwrap(), preset);
        }
    }

    #[test]
    fn test_hex_length_matches_strength() {
        assert_eq!(generate_secret_hex(Strength::default()).unwrap().len(), 32);
        assert_eq!(
            generate_secret_hex(Strength::new(160).unwrap()).unwrap().len(),
            40
        );
        assert_eq!(
            generate_secret_hex(Strength::new(256).unwrap()).unwrap().len(),
            64
        );
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = generate_secret_hex(Strength::default()).unwrap();
        let b = generate_secret_hex(Strength::default()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_secret_passes_validation() {
        for preset in Strength::PRESETS {
            let hex = generate_secret_hex(preset).unwrap();
            assert!(validate(&hex, "3", "2").is_ok());
        }
    }
}

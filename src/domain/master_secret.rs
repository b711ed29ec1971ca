//! `MasterSecret` newtype for the secret field

use std::fmt;

use zeroize::Zeroizing;

use crate::hex_codec;
use crate::validate::ValidationError;

/// Secret bytes accepted for splitting
///
/// Invariants: at least 16 bytes (128 bits) and an even number of bytes, as
/// the passphrase cipher splits the secret into two equal halves.
/// The bytes are zeroized on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterSecret(Zeroizing<Vec<u8>>);

impl MasterSecret {
    /// Minimum secret length in bytes
    pub const MIN_BYTES: usize = 16;

    /// Minimum secret length in hex characters
    pub const MIN_HEX_CHARS: usize = 2 * Self::MIN_BYTES;

    /// Parses the secret field
    ///
    /// Checks run in field order: length in characters, hex digits, then
    /// byte parity after odd-length left padding.
    ///
    /// # Errors
    /// Returns [`ValidationError::SecretTooShort`], [`ValidationError::SecretNotHex`]
    /// or [`ValidationError::SecretOddBytes`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_tool::domain::MasterSecret;
    ///
    /// let secret = MasterSecret::from_hex("abcdef0123456789abcdef0123456789").unwrap();
    /// assert_eq!(secret.len(), 16);
    ///
    /// // 31 characters
    /// assert!(MasterSecret::from_hex("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").is_err());
    /// // 33 characters pad to 17 bytes
    /// assert!(MasterSecret::from_hex("abcdef0123456789abcdef0123456789a").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        if hex.chars().count() < Self::MIN_HEX_CHARS {
            return Err(ValidationError::SecretTooShort);
        }
        let bytes = Zeroizing::new(
            hex_codec::hex_to_bytes(hex).map_err(|_| ValidationError::SecretNotHex)?,
        );
        Self::from_bytes(bytes)
    }

    /// Wraps raw secret bytes
    ///
    /// # Errors
    /// Returns [`ValidationError::SecretTooShort`] below 16 bytes and
    /// [`ValidationError::SecretOddBytes`] for an odd length
    pub fn from_bytes(bytes: Zeroizing<Vec<u8>>) -> Result<Self, ValidationError> {
        if bytes.len() < Self::MIN_BYTES {
            return Err(ValidationError::SecretTooShort);
        }
        if bytes.len() % 2 != 0 {
            return Err(ValidationError::SecretOddBytes);
        }
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex form, as shown in the secret field
    #[must_use]
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex_codec::bytes_to_hex(&self.0))
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterSecret({} bytes)", self.0.len())
    }
}

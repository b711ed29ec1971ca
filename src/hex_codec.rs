//! Hex encoding for secrets shown in the secret and reconstructed-secret fields
//!
//! Encoding always produces two lowercase digits per byte. Decoding tolerates
//! odd-length input by left-padding a single `0`, so `"abc"` reads as `0x0a 0xbc`.

use thiserror::Error;

/// Errors produced when decoding a hex field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// The input contains a character outside `0-9a-fA-F`
    #[error("invalid hex digit {digit:?} at position {index}")]
    InvalidDigit { digit: char, index: usize },
}

/// Encodes bytes as lowercase hex, exactly two digits per byte
///
/// # Examples
///
/// ```rust
/// use slip39_tool::hex_codec::bytes_to_hex;
///
/// assert_eq!(bytes_to_hex(&[0x00, 0x0f, 0xab]), "000fab");
/// assert_eq!(bytes_to_hex(&[]), "");
/// ```
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes a hex string, left-padding odd-length input with one `0`
///
/// # Errors
/// Returns [`HexError::InvalidDigit`] if any character is not a hex digit.
/// The reported index refers to the caller's (unpadded) input.
///
/// # Examples
///
/// ```rust
/// use slip39_tool::hex_codec::hex_to_bytes;
///
/// assert_eq!(hex_to_bytes("0aff").unwrap(), vec![0x0a, 0xff]);
/// assert_eq!(hex_to_bytes("aff").unwrap(), vec![0x0a, 0xff]);
/// assert!(hex_to_bytes("zz").is_err());
/// ```
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, HexError> {
    if let Some((index, digit)) = input
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(HexError::InvalidDigit { digit, index });
    }

    let decoded = if input.len() % 2 == 0 {
        hex::decode(input)
    } else {
        hex::decode(format!("0{input}"))
    };

    // Every character was checked above, so decode cannot fail on content.
    decoded.map_err(|_| HexError::InvalidDigit {
        digit: '?',
        index: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_hex_pads_each_byte() {
        assert_eq!(bytes_to_hex(&[0x01, 0x02, 0xff]), "0102ff");
        assert_eq!(bytes_to_hex(&[0x00; 4]), "00000000");
    }

    #[test]
    fn test_output_length_is_twice_byte_count() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(bytes_to_hex(&bytes).len(), 512);
    }

    #[test]
    fn test_hex_to_bytes_even_length() {
        assert_eq!(
            hex_to_bytes("abcdef0123456789").unwrap(),
            vec![0xab, 0xcd, 0xef, 0x01, 0x23, 0x45, 0x67, 0x89]
        );
    }

    #[test]
    fn test_hex_to_bytes_odd_length_is_left_padded() {
        assert_eq!(hex_to_bytes("f").unwrap(), vec![0x0f]);
        assert_eq!(hex_to_bytes("123").unwrap(), vec![0x01, 0x23]);
    }

    #[test]
    fn test_hex_to_bytes_accepts_uppercase() {
        assert_eq!(hex_to_bytes("ABCD").unwrap(), vec![0xab, 0xcd]);
    }

    #[test]
    fn test_hex_to_bytes_empty() {
        assert!(hex_to_bytes("").unwrap().is_empty());
    }

    #[test]
    fn test_hex_to_bytes_reports_first_invalid_digit() {
        let err = hex_to_bytes("00g1h").unwrap_err();
        assert_eq!(
            err,
            HexError::InvalidDigit {
                digit: 'g',
                index: 2
            }
        );
    }

    #[test]
    fn test_hex_to_bytes_rejects_whitespace() {
        assert!(hex_to_bytes("ab cd").is_err());
    }
}

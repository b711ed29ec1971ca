//! Property tests for the hex codec

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use slip39_tool::hex_codec::{bytes_to_hex, hex_to_bytes};

/// Even-length lowercase hex string
#[derive(Clone, Debug)]
struct EvenHex(String);

impl Arbitrary for EvenHex {
    fn arbitrary(g: &mut Gen) -> Self {
        let bytes = Vec::<u8>::arbitrary(g);
        EvenHex(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }
}

#[quickcheck]
fn prop_hex_string_round_trip(hex: EvenHex) -> bool {
    let EvenHex(hex) = hex;
    hex_to_bytes(&hex).is_ok_and(|bytes| bytes_to_hex(&bytes) == hex)
}

#[quickcheck]
fn prop_bytes_round_trip(bytes: Vec<u8>) -> bool {
    let hex = bytes_to_hex(&bytes);
    hex.len() == 2 * bytes.len() && hex_to_bytes(&hex).is_ok_and(|decoded| decoded == bytes)
}

/// Odd-length input decodes as if a leading zero digit were present
#[quickcheck]
fn prop_odd_length_is_left_padded(hex: EvenHex, digit: u8) -> bool {
    let EvenHex(hex) = hex;
    let nibble = char::from_digit(u32::from(digit % 16), 16).unwrap_or('0');
    let odd = format!("{nibble}{hex}");
    hex_to_bytes(&odd).ok() == hex_to_bytes(&format!("0{odd}")).ok()
}

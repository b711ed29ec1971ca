//! RS1024 checksum over 10-bit words
//!
//! A Reed-Solomon code over GF(1024) that guarantees detection of any error
//! affecting at most 3 words. The checksum is bound to a customization string
//! so shares of different formats cannot be mixed.

/// Number of checksum words appended to every mnemonic
pub(super) const CHECKSUM_LENGTH_WORDS: usize = 3;

const CUSTOMIZATION_STRING: &[u8] = b"shamir";
const CUSTOMIZATION_STRING_EXTENDABLE: &[u8] = b"shamir_extendable";

const GEN: [u32; 10] = [
    0x00E0_E040,
    0x01C1_C080,
    0x0383_8100,
    0x0707_0200,
    0x0E0E_0009,
    0x1C0C_2412,
    0x3808_6C24,
    0x3090_FC48,
    0x21B1_F890,
    0x03F3_F120,
];

/// Customization string for the share format
pub(super) fn customization(extendable: bool) -> &'static [u8] {
    if extendable {
        CUSTOMIZATION_STRING_EXTENDABLE
    } else {
        CUSTOMIZATION_STRING
    }
}

fn polymod(values: impl IntoIterator<Item = u32>) -> u32 {
    let mut chk: u32 = 1;
    for value in values {
        let top = chk >> 20;
        chk = ((chk & 0x000F_FFFF) << 10) ^ value;
        for (i, generator) in GEN.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

fn prefixed<'a>(data: &'a [u16], extendable: bool) -> impl Iterator<Item = u32> + 'a {
    customization(extendable)
        .iter()
        .map(|&byte| u32::from(byte))
        .chain(data.iter().map(|&word| u32::from(word)))
}

/// Computes the three checksum words for `data`
pub(super) fn create_checksum(data: &[u16], extendable: bool) -> [u16; CHECKSUM_LENGTH_WORDS] {
    let values = prefixed(data, extendable).chain([0; CHECKSUM_LENGTH_WORDS]);
    let residue = polymod(values) ^ 1;

    #[allow(
        clippy::cast_possible_truncation,
        reason = "masked to 10 bits before narrowing"
    )]
    let word = |i: usize| ((residue >> (10 * i)) & 0x3FF) as u16;
    [word(2), word(1), word(0)]
}

/// Checks that `data` (checksum words included) carries a valid checksum
pub(super) fn verify_checksum(data: &[u16], extendable: bool) -> bool {
    polymod(prefixed(data, extendable)) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_checksum_verifies() {
        let data = [1u16, 2, 3, 4, 1000, 512, 0, 77];
        for extendable in [false, true] {
            let mut full = data.to_vec();
            full.extend(create_checksum(&data, extendable));
            assert!(verify_checksum(&full, extendable));
        }
    }

    #[test]
    fn test_customization_is_part_of_checksum() {
        let data = [10u16, 20, 30, 40];
        let mut full = data.to_vec();
        full.extend(create_checksum(&data, false));
        assert!(!verify_checksum(&full, true));
    }

    #[test]
    fn test_single_word_change_is_detected() {
        let data = [5u16, 6, 7, 8, 9, 10, 11];
        let mut full = data.to_vec();
        full.extend(create_checksum(&data, false));

        for position in 0..full.len() {
            let mut corrupted = full.clone();
            corrupted[position] ^= 0x155;
            assert!(!verify_checksum(&corrupted, false), "position {position}");
        }
    }
}

//! Mnemonic encoding of a single SLIP-39 share
//!
//! A share mnemonic is a sequence of 10-bit words:
//!
//! ```text
//! [identifier (15) | extendable (1) | iteration exponent (4)]   2 words
//! [group index (4) | group threshold - 1 (4) | group count - 1 (4)
//!  | member index (4) | member threshold - 1 (4)]               2 words
//! [zero padding | share value]                                  n words
//! [RS1024 checksum]                                             3 words
//! ```

use zeroize::Zeroizing;

use super::gf256::RawShare;
use super::rs1024::{self, CHECKSUM_LENGTH_WORDS};
use super::wordlist::{self, RADIX_BITS};
use crate::primitive::{CombineError, ShareMnemonic};

const ID_EXP_LENGTH_WORDS: usize = 2;
const PARAMS_LENGTH_WORDS: usize = 2;
const METADATA_LENGTH_WORDS: usize = ID_EXP_LENGTH_WORDS + PARAMS_LENGTH_WORDS + CHECKSUM_LENGTH_WORDS;

/// Words shared by every mnemonic of one group
const GROUP_PREFIX_LENGTH_WORDS: usize = ID_EXP_LENGTH_WORDS + 1;

/// Shortest valid mnemonic: metadata plus a 128-bit value
pub(super) const MIN_MNEMONIC_LENGTH_WORDS: usize = METADATA_LENGTH_WORDS + 13;

const MAX_PADDING_BITS: usize = 8;

/// Parameters that must agree across every share of one secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CommonParameters {
    pub identifier: u16,
    pub extendable: bool,
    pub iteration_exponent: u8,
    pub group_threshold: u8,
    pub group_count: u8,
}

/// A decoded share with its metadata
#[derive(Clone, PartialEq, Eq)]
pub(super) struct Share {
    pub identifier: u16,
    pub extendable: bool,
    pub iteration_exponent: u8,
    pub group_index: u8,
    pub group_threshold: u8,
    pub group_count: u8,
    pub member_index: u8,
    pub member_threshold: u8,
    pub value: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Share")
            .field("identifier", &self.identifier)
            .field("group_index", &self.group_index)
            .field("member_index", &self.member_index)
            .field("value", &format_args!("{} bytes", self.value.len()))
            .finish_non_exhaustive()
    }
}

impl Share {
    pub(super) fn common_parameters(&self) -> CommonParameters {
        CommonParameters {
            identifier: self.identifier,
            extendable: self.extendable,
            iteration_exponent: self.iteration_exponent,
            group_threshold: self.group_threshold,
            group_count: self.group_count,
        }
    }

    /// The member point this share carries inside its group
    pub(super) fn raw(&self) -> RawShare {
        RawShare::new(self.member_index, self.value.clone())
    }

    fn id_exp_words(&self) -> [u16; ID_EXP_LENGTH_WORDS] {
        let id_exp = (u32::from(self.identifier) << 5)
            | (u32::from(self.extendable) << 4)
            | u32::from(self.iteration_exponent);
        split_20_bits(id_exp)
    }

    fn params_words(&self) -> [u16; PARAMS_LENGTH_WORDS] {
        let params = [
            self.group_index,
            self.group_threshold - 1,
            self.group_count - 1,
            self.member_index,
            self.member_threshold - 1,
        ]
        .iter()
        .fold(0u32, |acc, &nibble| (acc << 4) | u32::from(nibble & 0x0F));
        split_20_bits(params)
    }

    /// Opening words common to all members of this share's group
    pub(super) fn group_prefix(&self) -> String {
        let [id_high, id_low] = self.id_exp_words();
        let [params_high, _] = self.params_words();
        let prefix: [u16; GROUP_PREFIX_LENGTH_WORDS] = [id_high, id_low, params_high];
        prefix
            .iter()
            .map(|&index| wordlist::word_from_index(index))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders the share as a mnemonic
    pub(super) fn to_mnemonic(&self) -> ShareMnemonic {
        let mut data: Vec<u16> = Vec::with_capacity(METADATA_LENGTH_WORDS + self.value.len());
        data.extend(self.id_exp_words());
        data.extend(self.params_words());
        data.extend(encode_value(&self.value));
        let checksum = rs1024::create_checksum(&data, self.extendable);
        data.extend(checksum);

        let words = data
            .iter()
            .map(|&index| wordlist::word_from_index(index))
            .collect::<Vec<_>>()
            .join(" ");
        ShareMnemonic::new(words)
    }

    /// Parses and checks one mnemonic
    ///
    /// # Errors
    /// Returns the first problem found, checked in this order: unknown word,
    /// length, checksum, group parameters, padding
    pub(super) fn from_mnemonic(mnemonic: &str) -> Result<Self, CombineError> {
        let data = mnemonic
            .split_whitespace()
            .map(wordlist::word_to_index)
            .collect::<Result<Vec<u16>, _>>()?;

        if data.len() < MIN_MNEMONIC_LENGTH_WORDS {
            return Err(CombineError::InvalidLength);
        }
        let value_words = data.len() - METADATA_LENGTH_WORDS;
        if (RADIX_BITS * value_words) % 16 > MAX_PADDING_BITS {
            return Err(CombineError::InvalidLength);
        }

        let id_exp = join_20_bits(data[0], data[1]);
        let extendable = (id_exp >> 4) & 1 == 1;
        if !rs1024::verify_checksum(&data, extendable) {
            return Err(CombineError::InvalidChecksum);
        }

        #[allow(
            clippy::cast_possible_truncation,
            reason = "masked to the field width before narrowing"
        )]
        let nibble = |value: u32, shift: u32| ((value >> shift) & 0x0F) as u8;

        let params = join_20_bits(data[2], data[3]);
        let group_threshold = nibble(params, 12) + 1;
        let group_count = nibble(params, 8) + 1;
        if group_count < group_threshold {
            return Err(CombineError::InvalidGroupParameters);
        }

        let value_end = data.len() - CHECKSUM_LENGTH_WORDS;
        let value = decode_value(&data[ID_EXP_LENGTH_WORDS + PARAMS_LENGTH_WORDS..value_end])?;

        #[allow(
            clippy::cast_possible_truncation,
            reason = "the identifier is the top 15 of 20 bits"
        )]
        let identifier = (id_exp >> 5) as u16;

        Ok(Self {
            identifier,
            extendable,
            iteration_exponent: nibble(id_exp, 0),
            group_index: nibble(params, 16),
            group_threshold,
            group_count,
            member_index: nibble(params, 4),
            member_threshold: nibble(params, 0) + 1,
            value,
        })
    }
}

fn split_20_bits(value: u32) -> [u16; 2] {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "each half is masked to 10 bits"
    )]
    let half = |shift: u32| ((value >> shift) & 0x3FF) as u16;
    [half(10), half(0)]
}

fn join_20_bits(high: u16, low: u16) -> u32 {
    (u32::from(high) << RADIX_BITS) | u32::from(low)
}

/// Packs bytes into 10-bit words, left-padding with zero bits
fn encode_value(value: &[u8]) -> Vec<u16> {
    let bit_count = value.len() * 8;
    let padding = (RADIX_BITS - bit_count % RADIX_BITS) % RADIX_BITS;
    let mut words = Vec::with_capacity((bit_count + padding) / RADIX_BITS);

    let mut buffer: u32 = 0;
    let mut bits_in_buffer = padding;
    for &byte in value {
        buffer = (buffer << 8) | u32::from(byte);
        bits_in_buffer += 8;
        if bits_in_buffer >= RADIX_BITS {
            bits_in_buffer -= RADIX_BITS;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "masked to 10 bits before narrowing"
            )]
            words.push(((buffer >> bits_in_buffer) & 0x3FF) as u16);
            buffer &= (1 << bits_in_buffer) - 1;
        }
    }
    words
}

/// Unpacks 10-bit words into bytes, rejecting non-zero padding bits
fn decode_value(words: &[u16]) -> Result<Zeroizing<Vec<u8>>, CombineError> {
    let total_bits = words.len() * RADIX_BITS;
    let padding = total_bits % 16;
    let mut bytes = Zeroizing::new(Vec::with_capacity((total_bits - padding) / 8));

    let mut buffer: u32 = 0;
    let mut bits_in_buffer: usize = 0;
    let mut skipped = false;
    for &word in words {
        buffer = (buffer << RADIX_BITS) | u32::from(word);
        bits_in_buffer += RADIX_BITS;

        if !skipped && bits_in_buffer >= padding {
            bits_in_buffer -= padding;
            if buffer >> bits_in_buffer != 0 {
                return Err(CombineError::InvalidPadding);
            }
            buffer &= (1 << bits_in_buffer) - 1;
            skipped = true;
        }

        while skipped && bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "masked to 8 bits before narrowing"
            )]
            bytes.push(((buffer >> bits_in_buffer) & 0xFF) as u8);
            buffer &= (1 << bits_in_buffer) - 1;
        }
    }
    Ok(bytes)
}

//! Contract between the pipelines and the secret-sharing primitive
//!
//! The pipelines never touch share math directly. They hand a secret and
//! [`SplitOptions`] to a [`Splitter`], read mnemonics back through a
//! [`ShareSet`], and give mnemonics plus a passphrase to a [`Combiner`].
//! [`crate::slip39::Slip39`] implements all three.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::{DerivationPath, SplitConfig};
use crate::hex_codec;

/// Iteration exponent used when none is requested (2500 PBKDF2 rounds per Feistel round)
pub const DEFAULT_ITERATION_EXPONENT: u8 = 0;

/// `(member_threshold, member_count)` of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupSpec {
    pub member_threshold: u8,
    pub member_count: u8,
}

impl GroupSpec {
    /// A group holding exactly one share
    pub const SINGLE: Self = Self {
        member_threshold: 1,
        member_count: 1,
    };
}

/// Everything a split needs besides the secret itself
#[derive(Clone)]
pub struct SplitOptions {
    pub passphrase: Zeroizing<String>,
    /// Number of groups required to reconstruct
    pub threshold: u8,
    pub groups: Vec<GroupSpec>,
    pub iteration_exponent: u8,
}

impl SplitOptions {
    /// Flat M-of-N sharing without sub-groups
    ///
    /// Every share is a 1-of-1 group and the group threshold is M. Sub-groups
    /// are not offered; the group list is kept only as the carrier for N
    /// independent shares (a single group with member threshold 1 and several
    /// members is not a valid SLIP-39 layout).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slip39_tool::domain::{ShareCount, SplitConfig, Threshold};
    /// use slip39_tool::primitive::{GroupSpec, SplitOptions};
    ///
    /// let config = SplitConfig::new(Threshold::new(2).unwrap(), ShareCount::new(3).unwrap()).unwrap();
    /// let options = SplitOptions::flat(config, "");
    ///
    /// assert_eq!(options.threshold, 2);
    /// assert_eq!(options.groups, vec![GroupSpec::SINGLE; 3]);
    /// ```
    #[must_use]
    pub fn flat(config: SplitConfig, passphrase: &str) -> Self {
        Self {
            passphrase: Zeroizing::new(passphrase.to_string()),
            threshold: *config.threshold(),
            groups: vec![GroupSpec::SINGLE; usize::from(*config.share_count())],
            iteration_exponent: DEFAULT_ITERATION_EXPONENT,
        }
    }
}

impl fmt::Debug for SplitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitOptions")
            .field("passphrase", &"<redacted>")
            .field("threshold", &self.threshold)
            .field("groups", &self.groups)
            .field("iteration_exponent", &self.iteration_exponent)
            .finish()
    }
}

/// One share rendered as a space-separated word list
///
/// Wraps the mnemonic in `Zeroizing` to ensure secure memory cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMnemonic(Zeroizing<String>);

impl ShareMnemonic {
    pub(crate) fn new(words: String) -> Self {
        Self(Zeroizing::new(words))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secret bytes produced by a successful combine
#[derive(Clone, PartialEq, Eq)]
pub struct RecoveredSecret(Zeroizing<Vec<u8>>);

impl RecoveredSecret {
    pub(crate) fn new(bytes: Zeroizing<Vec<u8>>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex form, as shown in the reconstructed-secret field
    #[must_use]
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex_codec::bytes_to_hex(&self.0))
    }
}

impl fmt::Debug for RecoveredSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoveredSecret({} bytes)", self.0.len())
    }
}

/// Errors raised while splitting or deriving shares
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("The length of the master secret must be at least {min_bits} bits.")]
    SecretTooShort { min_bits: usize },

    #[error("The length of the master secret in bytes must be an even number.")]
    OddSecretLength,

    #[error("The requested threshold must be a positive integer.")]
    ZeroThreshold,

    #[error(
        "The requested group threshold ({threshold}) must not exceed the number of groups ({groups})."
    )]
    GroupThresholdTooLarge { threshold: u8, groups: usize },

    #[error("The requested member threshold ({threshold}) must not exceed the number of members ({members}).")]
    MemberThresholdTooLarge { threshold: u8, members: u8 },

    #[error("The requested number of shares must be between 1 and {max}.")]
    InvalidShareCount { max: u8 },

    #[error(
        "Creating multiple member shares with member threshold 1 is not allowed. Use 1-of-1 member sharing instead."
    )]
    SingleMemberThreshold,

    #[error("The iteration exponent must be at most {max}.")]
    IterationExponentTooLarge { max: u8 },

    #[error("Invalid derivation path {0:?}")]
    InvalidPath(String),

    #[error("No share at derivation path {0}")]
    PathNotFound(DerivationPath),
}

/// Errors raised while combining mnemonics
///
/// The `Display` text of each variant is the message shown in the
/// reconstruction error slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    #[error("The list of mnemonics is empty.")]
    Empty,

    #[error("Invalid mnemonic word {0}.")]
    InvalidWord(String),

    #[error("Invalid mnemonic length.")]
    InvalidLength,

    #[error("Invalid mnemonic checksum.")]
    InvalidChecksum,

    #[error("Invalid mnemonic padding.")]
    InvalidPadding,

    #[error("Invalid mnemonic. Group threshold cannot be greater than group count.")]
    InvalidGroupParameters,

    #[error(
        "Invalid set of mnemonics. All mnemonics must begin with the same 2 words, must have the same group threshold and the same group count."
    )]
    MismatchedShares,

    #[error("Invalid set of mnemonics. All mnemonics in a group must have the same member threshold.")]
    InconsistentMembers,

    #[error("Invalid set of shares. Share indices must be unique.")]
    DuplicateIndex,

    #[error("Invalid set of shares. All share values must have the same length.")]
    MismatchedLengths,

    #[error(
        "Insufficient number of mnemonic groups ({provided}). The required number of groups is {required}."
    )]
    InsufficientShares { required: u8, provided: usize },

    #[error(
        "Insufficient number of mnemonics. Expected {required} mnemonics starting with \"{prefix} ...\", but {provided} were provided."
    )]
    InsufficientMembers {
        required: u8,
        provided: usize,
        prefix: String,
    },

    #[error("Invalid digest of the shared secret.")]
    InvalidDigest,
}

/// Addressable result of a split
pub trait ShareSet {
    /// Mnemonics selected by `path`, in group then member order
    ///
    /// # Errors
    /// Returns [`SplitError::PathNotFound`] if the path points past the split
    fn derive(&self, path: &DerivationPath) -> Result<Vec<ShareMnemonic>, SplitError>;
}

/// Splits a secret into mnemonic shares
pub trait Splitter {
    type Shares: ShareSet;

    /// # Errors
    /// Returns a [`SplitError`] if the secret or options are rejected
    fn split(&self, secret: &[u8], options: &SplitOptions) -> Result<Self::Shares, SplitError>;
}

/// Rebuilds a secret from mnemonic shares
pub trait Combiner {
    /// # Errors
    /// Returns a [`CombineError`] describing why the mnemonics do not combine
    fn combine(&self, mnemonics: &[String], passphrase: &str)
    -> Result<RecoveredSecret, CombineError>;
}

//! SLIP-39 Shamir's Secret-Sharing for mnemonic codes
//!
//! The master secret is encrypted with the passphrase, split into group
//! shares, and each group share is split again into member shares. Every
//! member share is rendered as a mnemonic carrying enough metadata to be
//! recombined with its siblings.
//!
//! # Examples
//!
//! ```rust
//! use slip39_tool::domain::{DerivationPath, ShareCount, SplitConfig, Threshold};
//! use slip39_tool::primitive::{Combiner, ShareSet, SplitOptions, Splitter};
//! use slip39_tool::slip39::Slip39;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = [0x42u8; 16];
//! let config = SplitConfig::new(Threshold::new(2)?, ShareCount::new(3)?)?;
//! let shares = Slip39.split(&secret, &SplitOptions::flat(config, "TREZOR"))?;
//!
//! let picked: Vec<String> = [0, 2]
//!     .iter()
//!     .flat_map(|&i| shares.derive(&DerivationPath::group(i)).unwrap())
//!     .map(|mnemonic| mnemonic.to_string())
//!     .collect();
//!
//! let recovered = Slip39.combine(&picked, "TREZOR")?;
//! assert_eq!(recovered.as_bytes(), &secret);
//! # Ok(())
//! # }
//! ```

mod cipher;
mod entropy;
mod gf256;
mod rs1024;
mod share;
mod wordlist;

use tracing::debug;
use zeroize::Zeroizing;

use self::cipher::CipherParams;
use self::entropy::ShareEntropy;
use self::gf256::RawShare;
use self::share::Share;
use crate::domain::DerivationPath;
use crate::primitive::{
    CombineError, Combiner, RecoveredSecret, ShareMnemonic, ShareSet, SplitError, SplitOptions,
    Splitter,
};

/// Group count and member count are 4-bit fields
pub const MAX_SHARE_COUNT: u8 = 16;

/// Shortest master secret the format accepts
pub const MIN_STRENGTH_BITS: usize = 128;

const DIGEST_LENGTH_BYTES: usize = 4;
const SECRET_INDEX: u8 = 255;
const DIGEST_INDEX: u8 = 254;

/// SLIP-39 splitter and combiner
#[derive(Debug, Default, Clone, Copy)]
pub struct Slip39;

/// Shares produced by one split, member mnemonics grouped by group index
#[derive(Debug, Clone)]
pub struct Slip39Shares {
    groups: Vec<Vec<Share>>,
}

impl Slip39Shares {
    /// Number of groups in the split
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn mnemonics<'a>(shares: impl IntoIterator<Item = &'a Share>) -> Vec<ShareMnemonic> {
        shares.into_iter().map(Share::to_mnemonic).collect()
    }
}

impl ShareSet for Slip39Shares {
    fn derive(&self, path: &DerivationPath) -> Result<Vec<ShareMnemonic>, SplitError> {
        let not_found = || SplitError::PathNotFound(*path);
        match *path {
            DerivationPath::Root => Ok(Self::mnemonics(self.groups.iter().flatten())),
            DerivationPath::Group(group) => self
                .groups
                .get(usize::from(group))
                .map(Self::mnemonics)
                .ok_or_else(not_found),
            DerivationPath::Member { group, member } => self
                .groups
                .get(usize::from(group))
                .and_then(|members| members.get(usize::from(member)))
                .map(|share| vec![share.to_mnemonic()])
                .ok_or_else(not_found),
        }
    }
}

fn create_digest(random_part: &[u8], shared_secret: &[u8]) -> [u8; DIGEST_LENGTH_BYTES] {
    let mac = entropy::hmac_sha256(random_part, &[shared_secret]);
    let mut digest = [0u8; DIGEST_LENGTH_BYTES];
    digest.copy_from_slice(&mac[..DIGEST_LENGTH_BYTES]);
    digest
}

/// Splits `shared_secret` into `share_count` points, any `threshold` of which recover it
fn split_secret(
    threshold: u8,
    share_count: u8,
    shared_secret: &[u8],
    entropy: &mut ShareEntropy,
) -> Result<Vec<RawShare>, SplitError> {
    if threshold == 0 {
        return Err(SplitError::ZeroThreshold);
    }
    if threshold > share_count {
        return Err(SplitError::MemberThresholdTooLarge {
            threshold,
            members: share_count,
        });
    }
    if share_count > MAX_SHARE_COUNT {
        return Err(SplitError::InvalidShareCount {
            max: MAX_SHARE_COUNT,
        });
    }

    if threshold == 1 {
        return Ok((0..share_count)
            .map(|x| RawShare::new(x, Zeroizing::new(shared_secret.to_vec())))
            .collect());
    }

    let len = shared_secret.len();
    let random_share_count = threshold - 2;
    let mut shares: Vec<RawShare> = (0..random_share_count)
        .map(|x| RawShare::new(x, entropy.take(len)))
        .collect();

    let random_part = entropy.take(len - DIGEST_LENGTH_BYTES);
    let mut digest_value = Zeroizing::new(create_digest(&random_part, shared_secret).to_vec());
    digest_value.extend_from_slice(&random_part);

    let mut base = shares.clone();
    base.push(RawShare::new(DIGEST_INDEX, digest_value));
    base.push(RawShare::new(
        SECRET_INDEX,
        Zeroizing::new(shared_secret.to_vec()),
    ));

    for x in random_share_count..share_count {
        let value = gf256::interpolate(&base, x)
            .unwrap_or_else(|_| unreachable!("base points have distinct x and equal lengths"));
        shares.push(RawShare::new(x, value));
    }
    Ok(shares)
}

/// Recovers the secret from `threshold` points and checks its digest
fn recover_secret(
    threshold: u8,
    shares: &[RawShare],
) -> Result<Zeroizing<Vec<u8>>, CombineError> {
    if threshold == 1 {
        return shares
            .first()
            .map(|share| share.value.clone())
            .ok_or(CombineError::Empty);
    }

    let shared_secret = gf256::interpolate(shares, SECRET_INDEX)?;
    let digest_share = gf256::interpolate(shares, DIGEST_INDEX)?;
    let (digest, random_part) = digest_share.split_at(DIGEST_LENGTH_BYTES.min(digest_share.len()));

    if digest != create_digest(random_part, &shared_secret).as_slice() {
        return Err(CombineError::InvalidDigest);
    }
    Ok(shared_secret)
}

fn check_options(secret: &[u8], options: &SplitOptions) -> Result<u8, SplitError> {
    if secret.len() * 8 < MIN_STRENGTH_BITS {
        return Err(SplitError::SecretTooShort {
            min_bits: MIN_STRENGTH_BITS,
        });
    }
    if secret.len() % 2 != 0 {
        return Err(SplitError::OddSecretLength);
    }
    if options.threshold == 0 {
        return Err(SplitError::ZeroThreshold);
    }

    let group_count = u8::try_from(options.groups.len())
        .ok()
        .filter(|count| (1..=MAX_SHARE_COUNT).contains(count))
        .ok_or(SplitError::InvalidShareCount {
            max: MAX_SHARE_COUNT,
        })?;
    if options.threshold > group_count {
        return Err(SplitError::GroupThresholdTooLarge {
            threshold: options.threshold,
            groups: options.groups.len(),
        });
    }
    if options.iteration_exponent > cipher::MAX_ITERATION_EXPONENT {
        return Err(SplitError::IterationExponentTooLarge {
            max: cipher::MAX_ITERATION_EXPONENT,
        });
    }
    if options
        .groups
        .iter()
        .any(|group| group.member_threshold == 1 && group.member_count > 1)
    {
        return Err(SplitError::SingleMemberThreshold);
    }
    Ok(group_count)
}

impl Splitter for Slip39 {
    type Shares = Slip39Shares;

    fn split(&self, secret: &[u8], options: &SplitOptions) -> Result<Slip39Shares, SplitError> {
        let group_count = check_options(secret, options)?;
        let passphrase = options.passphrase.as_bytes();

        let mut entropy = ShareEntropy::new(
            secret,
            passphrase,
            options.threshold,
            &options.groups,
            options.iteration_exponent,
        );
        let params = CipherParams {
            identifier: entropy.identifier(),
            extendable: false,
            iteration_exponent: options.iteration_exponent,
        };
        let encrypted = cipher::encrypt(secret, passphrase, &params);

        let group_shares = split_secret(options.threshold, group_count, &encrypted, &mut entropy)?;

        let groups = options
            .groups
            .iter()
            .zip(group_shares)
            .map(|(spec, group)| -> Result<Vec<Share>, SplitError> {
                let members = split_secret(
                    spec.member_threshold,
                    spec.member_count,
                    &group.value,
                    &mut entropy,
                )?;
                Ok(members
                    .into_iter()
                    .map(|member| Share {
                        identifier: params.identifier,
                        extendable: params.extendable,
                        iteration_exponent: params.iteration_exponent,
                        group_index: group.x,
                        group_threshold: options.threshold,
                        group_count,
                        member_index: member.x,
                        member_threshold: spec.member_threshold,
                        value: member.value,
                    })
                    .collect())
            })
            .collect::<Result<Vec<Vec<Share>>, SplitError>>()?;

        debug!(
            identifier = params.identifier,
            group_threshold = options.threshold,
            group_count,
            secret_bytes = secret.len(),
            "split master secret"
        );
        Ok(Slip39Shares { groups })
    }
}

/// Shares of one group, deduplicated, in input order
struct MemberGroup {
    index: u8,
    member_threshold: u8,
    prefix: String,
    members: Vec<Share>,
}

impl MemberGroup {
    fn new(share: Share) -> Self {
        Self {
            index: share.group_index,
            member_threshold: share.member_threshold,
            prefix: share.group_prefix(),
            members: vec![share],
        }
    }

    fn add(&mut self, share: Share) -> Result<(), CombineError> {
        if share.member_threshold != self.member_threshold {
            return Err(CombineError::InconsistentMembers);
        }
        if let Some(existing) = self
            .members
            .iter()
            .find(|member| member.member_index == share.member_index)
        {
            return if existing.value == share.value {
                Ok(())
            } else {
                Err(CombineError::DuplicateIndex)
            };
        }
        self.members.push(share);
        Ok(())
    }

    fn recover(&self) -> Result<RawShare, CombineError> {
        let required = usize::from(self.member_threshold);
        if self.members.len() < required {
            return Err(CombineError::InsufficientMembers {
                required: self.member_threshold,
                provided: self.members.len(),
                prefix: self.prefix.clone(),
            });
        }
        let points: Vec<RawShare> = self.members[..required].iter().map(Share::raw).collect();
        let value = recover_secret(self.member_threshold, &points)?;
        Ok(RawShare::new(self.index, value))
    }
}

impl Combiner for Slip39 {
    fn combine(
        &self,
        mnemonics: &[String],
        passphrase: &str,
    ) -> Result<RecoveredSecret, CombineError> {
        let shares = mnemonics
            .iter()
            .map(|mnemonic| Share::from_mnemonic(mnemonic))
            .collect::<Result<Vec<Share>, _>>()?;

        let Some(first) = shares.first() else {
            return Err(CombineError::Empty);
        };
        let params = first.common_parameters();
        if shares.iter().any(|share| share.common_parameters() != params) {
            return Err(CombineError::MismatchedShares);
        }

        let mut groups: Vec<MemberGroup> = Vec::new();
        for share in shares {
            match groups
                .iter_mut()
                .find(|group| group.index == share.group_index)
            {
                Some(group) => group.add(share)?,
                None => groups.push(MemberGroup::new(share)),
            }
        }

        if groups.len() < usize::from(params.group_threshold) {
            return Err(CombineError::InsufficientShares {
                required: params.group_threshold,
                provided: groups.len(),
            });
        }

        let group_points = groups[..usize::from(params.group_threshold)]
            .iter()
            .map(MemberGroup::recover)
            .collect::<Result<Vec<RawShare>, _>>()?;
        let encrypted = recover_secret(params.group_threshold, &group_points)?;

        let cipher_params = CipherParams {
            identifier: params.identifier,
            extendable: params.extendable,
            iteration_exponent: params.iteration_exponent,
        };
        let secret = cipher::decrypt(&encrypted, passphrase.as_bytes(), &cipher_params);

        debug!(
            identifier = params.identifier,
            mnemonics = mnemonics.len(),
            groups_used = group_points.len(),
            "combined master secret"
        );
        Ok(RecoveredSecret::new(secret))
    }
}

//! Property tests for split/combine workflows
//!
//! Every combine runs the PBKDF2 cipher, so the heavier properties run a
//! reduced number of cases.

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;
use slip39_tool::hex_codec::bytes_to_hex;
use slip39_tool::pipeline::generation::{self, GenerationInput};
use slip39_tool::pipeline::reconstruction::{self, ReconstructionInput};
use slip39_tool::primitive::CombineError;
use slip39_tool::slip39::Slip39;

const HEAVY_CASES: u64 = 16;

/// Wrapper for valid master secrets: even byte length, 16 to 48 bytes
#[derive(Clone, Debug)]
struct ValidSecret(Vec<u8>);

impl Arbitrary for ValidSecret {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = 16 + 2 * usize::from(u8::arbitrary(g) % 17);
        ValidSecret((0..len).map(|_| u8::arbitrary(g)).collect())
    }
}

/// Wrapper for valid threshold and share count pairs
#[derive(Clone, Copy, Debug)]
struct ValidShareParams {
    threshold: u8,
    total_shares: u8,
}

impl Arbitrary for ValidShareParams {
    fn arbitrary(g: &mut Gen) -> Self {
        let total_shares = (u8::arbitrary(g) % 16) + 1; // 1..=16
        let threshold = (u8::arbitrary(g) % total_shares) + 1; // 1..=total_shares
        ValidShareParams {
            threshold,
            total_shares,
        }
    }
}

/// Short printable passphrase, often empty
#[derive(Clone, Debug)]
struct Passphrase(String);

impl Arbitrary for Passphrase {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            return Passphrase(String::new());
        }
        let len = usize::from(u8::arbitrary(g) % 12);
        let chars = (0..len).map(|_| char::from(b' ' + u8::arbitrary(g) % 95));
        Passphrase(chars.collect())
    }
}

fn split(secret: &[u8], passphrase: &str, params: ValidShareParams) -> Option<Vec<String>> {
    let input = GenerationInput {
        secret: bytes_to_hex(secret),
        passphrase: passphrase.to_string(),
        total_shares: params.total_shares.to_string(),
        threshold: params.threshold.to_string(),
    };
    let shares = generation::generate(&input, &Slip39).ok()?;
    Some(
        shares
            .mnemonics()
            .iter()
            .map(|m| m.as_str().to_string())
            .collect(),
    )
}

fn combine(shares: &[&String], passphrase: &str) -> ReconstructionInput {
    ReconstructionInput {
        shares: shares
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        passphrase: passphrase.to_string(),
    }
}

/// Deterministic shuffle of `0..len` driven by `seed`
fn shuffled(len: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut seed = seed;
    for i in 0..indices.len() {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let range = u64::try_from(indices.len() - i)
            .unwrap_or_else(|_| unreachable!("range fits in u64"));
        let offset = usize::try_from((seed >> 33) % range)
            .unwrap_or_else(|_| unreachable!("offset < range fits in usize"));
        indices.swap(i, i + offset);
    }
    indices
}

/// Any threshold-sized selection of shares recovers the secret
fn check_random_selection_recovers(
    secret: ValidSecret,
    passphrase: Passphrase,
    params: ValidShareParams,
    seed: u64,
) -> bool {
    let ValidSecret(secret) = secret;
    let Passphrase(passphrase) = passphrase;
    let Some(shares) = split(&secret, &passphrase, params) else {
        return false;
    };
    if shares.len() != usize::from(params.total_shares) {
        return false;
    }

    let selected: Vec<&String> = shuffled(shares.len(), seed)
        .into_iter()
        .take(usize::from(params.threshold))
        .map(|i| &shares[i])
        .collect();

    let view = reconstruction::run(&combine(&selected, &passphrase), &Slip39);
    view.error.is_none() && view.secret == bytes_to_hex(&secret)
}

#[test]
fn prop_random_selection_recovers() {
    QuickCheck::new().tests(HEAVY_CASES).quickcheck(
        check_random_selection_recovers as fn(ValidSecret, Passphrase, ValidShareParams, u64) -> bool,
    );
}

/// One share short of the threshold is an error, never a wrong secret
fn check_insufficient_shares_fail(secret: ValidSecret, params: ValidShareParams) -> bool {
    let ValidSecret(secret) = secret;
    if params.threshold < 2 {
        return true;
    }
    let Some(shares) = split(&secret, "", params) else {
        return false;
    };

    let selected: Vec<&String> = shares
        .iter()
        .take(usize::from(params.threshold - 1))
        .collect();
    let result = reconstruction::recover(&combine(&selected, ""), &Slip39);

    matches!(result, Err(CombineError::InsufficientShares { required, .. }) if required == params.threshold)
}

#[test]
fn prop_insufficient_shares_fail() {
    QuickCheck::new()
        .tests(HEAVY_CASES)
        .quickcheck(check_insufficient_shares_fail as fn(ValidSecret, ValidShareParams) -> bool);
}

/// Shares from two different secrets never combine
fn check_mixed_shares_fail(first: ValidSecret, second: ValidSecret, threshold: u8) -> bool {
    let (ValidSecret(first), ValidSecret(second)) = (first, second);
    if first == second {
        return true;
    }
    let threshold = (threshold % 4) + 2; // 2..=5
    let params = ValidShareParams {
        threshold,
        total_shares: threshold,
    };
    let (Some(a), Some(b)) = (split(&first, "", params), split(&second, "", params)) else {
        return false;
    };

    let half = usize::from(threshold) / 2;
    let mixed: Vec<&String> = a
        .iter()
        .take(half)
        .chain(b.iter().skip(half))
        .collect();

    reconstruction::recover(&combine(&mixed, ""), &Slip39).is_err()
}

#[test]
fn prop_mixed_shares_fail() {
    QuickCheck::new()
        .tests(HEAVY_CASES)
        .quickcheck(check_mixed_shares_fail as fn(ValidSecret, ValidSecret, u8) -> bool);
}

/// The same inputs always produce the same shares
#[quickcheck]
fn prop_generation_is_deterministic(
    secret: ValidSecret,
    passphrase: Passphrase,
    params: ValidShareParams,
) -> bool {
    let ValidSecret(secret) = secret;
    let Passphrase(passphrase) = passphrase;
    let first = split(&secret, &passphrase, params);
    first.is_some() && first == split(&secret, &passphrase, params)
}

/// Every share has the word count implied by the secret length
#[quickcheck]
fn prop_share_length_follows_secret(secret: ValidSecret, params: ValidShareParams) -> bool {
    let ValidSecret(secret) = secret;
    let expected_words = 7 + (secret.len() * 8).div_ceil(10);
    split(&secret, "", params).is_some_and(|shares| {
        shares
            .iter()
            .all(|share| share.split(' ').count() == expected_words)
    })
}

/// Out-of-range share counts are reported on the total shares field
#[quickcheck]
fn prop_share_count_out_of_range_is_rejected(total: i64) -> bool {
    if (1..=16).contains(&total) {
        return true;
    }
    let input = GenerationInput {
        secret: "abcdef0123456789abcdef0123456789".to_string(),
        passphrase: String::new(),
        total_shares: total.to_string(),
        threshold: "1".to_string(),
    };
    let view = generation::run(&input, &Slip39);
    view.shares.is_empty() && view.total_shares_error.is_some() && view.threshold_error.is_none()
}

//! Lagrange interpolation over GF(256)
//!
//! Arithmetic uses the Rijndael polynomial x^8 + x^4 + x^3 + x + 1 with
//! generator x + 1, through precomputed exponent and logarithm tables.

use zeroize::Zeroizing;

use crate::primitive::CombineError;

/// A point on the sharing polynomial: x coordinate and one y byte per secret byte
#[derive(Clone, PartialEq, Eq)]
pub(super) struct RawShare {
    pub x: u8,
    pub value: Zeroizing<Vec<u8>>,
}

impl RawShare {
    pub(super) fn new(x: u8, value: Zeroizing<Vec<u8>>) -> Self {
        Self { x, value }
    }
}

struct Tables {
    exp: [u8; 255],
    log: [u8; 256],
}

const TABLES: Tables = build_tables();

const fn build_tables() -> Tables {
    let mut exp = [0u8; 255];
    let mut log = [0u8; 256];
    let mut poly: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = poly as u8;
        log[poly as usize] = i as u8;
        // multiply by x + 1
        poly ^= poly << 1;
        if poly & 0x100 != 0 {
            poly ^= 0x11B;
        }
        i += 1;
    }
    Tables { exp, log }
}

fn log(value: u8) -> i32 {
    i32::from(TABLES.log[usize::from(value)])
}

fn exp(power: i32) -> u8 {
    #[allow(
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        reason = "rem_euclid(255) is in 0..255"
    )]
    TABLES.exp[power.rem_euclid(255) as usize]
}

/// Evaluates at `x` the unique polynomial passing through `shares`
///
/// # Errors
/// Returns [`CombineError::DuplicateIndex`] if two shares have the same x
/// coordinate and [`CombineError::MismatchedLengths`] if their values differ
/// in length
pub(super) fn interpolate(shares: &[RawShare], x: u8) -> Result<Zeroizing<Vec<u8>>, CombineError> {
    let Some(first) = shares.first() else {
        return Err(CombineError::Empty);
    };
    let len = first.value.len();

    for (i, share) in shares.iter().enumerate() {
        if share.value.len() != len {
            return Err(CombineError::MismatchedLengths);
        }
        if shares[..i].iter().any(|other| other.x == share.x) {
            return Err(CombineError::DuplicateIndex);
        }
    }

    if let Some(share) = shares.iter().find(|share| share.x == x) {
        return Ok(share.value.clone());
    }

    let log_prod: i32 = shares.iter().map(|share| log(share.x ^ x)).sum();

    let mut result = Zeroizing::new(vec![0u8; len]);
    for share in shares {
        let log_basis_eval = log_prod
            - log(share.x ^ x)
            - shares.iter().map(|other| log(share.x ^ other.x)).sum::<i32>();

        for (out, &y) in result.iter_mut().zip(share.value.iter()) {
            if y != 0 {
                *out ^= exp(log(y) + log_basis_eval);
            }
        }
    }
    Ok(result)
}

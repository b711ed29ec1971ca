//! Passphrase encryption of the master secret
//!
//! A 4-round Feistel network whose round function is PBKDF2-HMAC-SHA256 keyed
//! by the round number and the passphrase. Any passphrase decrypts to some
//! secret; a wrong one simply yields different bytes.

use sha2::Sha256;
use zeroize::Zeroizing;

use super::rs1024;

const ROUND_COUNT: u8 = 4;

/// Total PBKDF2 iterations at exponent 0, spread over all rounds
const BASE_ITERATION_COUNT: u32 = 10_000;

/// Largest iteration exponent a mnemonic can carry (4 bits)
pub(super) const MAX_ITERATION_EXPONENT: u8 = 15;

/// Parameters binding the cipher to one set of shares
#[derive(Debug, Clone, Copy)]
pub(super) struct CipherParams {
    pub identifier: u16,
    pub extendable: bool,
    pub iteration_exponent: u8,
}

impl CipherParams {
    fn salt(&self) -> Vec<u8> {
        if self.extendable {
            return Vec::new();
        }
        let mut salt = rs1024::customization(false).to_vec();
        salt.extend_from_slice(&self.identifier.to_be_bytes());
        salt
    }

    fn iterations(&self) -> u32 {
        (BASE_ITERATION_COUNT << self.iteration_exponent) / u32::from(ROUND_COUNT)
    }
}

fn round_function(
    round: u8,
    passphrase: &[u8],
    params: &CipherParams,
    salt: &[u8],
    right: &[u8],
) -> Zeroizing<Vec<u8>> {
    let mut password = Zeroizing::new(Vec::with_capacity(1 + passphrase.len()));
    password.push(round);
    password.extend_from_slice(passphrase);

    let mut round_salt = salt.to_vec();
    round_salt.extend_from_slice(right);

    let mut output = Zeroizing::new(vec![0u8; right.len()]);
    pbkdf2::pbkdf2_hmac::<Sha256>(&password, &round_salt, params.iterations(), &mut output);
    output
}

fn feistel(
    input: &[u8],
    passphrase: &[u8],
    params: &CipherParams,
    rounds: impl Iterator<Item = u8>,
) -> Zeroizing<Vec<u8>> {
    let half = input.len() / 2;
    let mut left = Zeroizing::new(input[..half].to_vec());
    let mut right = Zeroizing::new(input[half..].to_vec());
    let salt = params.salt();

    for round in rounds {
        let mask = round_function(round, passphrase, params, &salt, &right);
        let mixed: Vec<u8> = left.iter().zip(mask.iter()).map(|(l, m)| l ^ m).collect();
        left = std::mem::replace(&mut right, Zeroizing::new(mixed));
    }

    let mut output = Zeroizing::new(Vec::with_capacity(input.len()));
    output.extend_from_slice(&right);
    output.extend_from_slice(&left);
    output
}

/// Encrypts an even-length master secret
pub(super) fn encrypt(
    master_secret: &[u8],
    passphrase: &[u8],
    params: &CipherParams,
) -> Zeroizing<Vec<u8>> {
    feistel(master_secret, passphrase, params, 0..ROUND_COUNT)
}

/// Decrypts an encrypted master secret
pub(super) fn decrypt(
    encrypted: &[u8],
    passphrase: &[u8],
    params: &CipherParams,
) -> Zeroizing<Vec<u8>> {
    feistel(encrypted, passphrase, params, (0..ROUND_COUNT).rev())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: CipherParams = CipherParams {
        identifier: 7945,
        extendable: false,
        iteration_exponent: 0,
    };

    #[test]
    fn test_decrypt_inverts_encrypt() {
        let secret = [0xabu8; 16];
        let encrypted = encrypt(&secret, b"TREZOR", &PARAMS);
        assert_ne!(*encrypted, secret.to_vec());
        assert_eq!(*decrypt(&encrypted, b"TREZOR", &PARAMS), secret.to_vec());
    }

    #[test]
    fn test_wrong_passphrase_gives_other_bytes() {
        let secret = [0x01u8; 32];
        let encrypted = encrypt(&secret, b"right", &PARAMS);
        let decrypted = decrypt(&encrypted, b"wrong", &PARAMS);
        assert_eq!(decrypted.len(), 32);
        assert_ne!(*decrypted, secret.to_vec());
    }

    #[test]
    fn test_identifier_is_part_of_salt() {
        let secret = [0x5au8; 16];
        let other = CipherParams {
            identifier: 1,
            ..PARAMS
        };
        assert_ne!(
            *encrypt(&secret, b"", &PARAMS),
            *encrypt(&secret, b"", &other)
        );
    }

    #[test]
    fn test_iterations_scale_with_exponent() {
        assert_eq!(PARAMS.iterations(), 2_500);
        let slower = CipherParams {
            iteration_exponent: 2,
            ..PARAMS
        };
        assert_eq!(slower.iterations(), 10_000);
    }
}

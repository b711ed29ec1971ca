//! Deterministic randomness for share generation
//!
//! Shares must be reproducible once shown, so the identifier, the random
//! polynomial coefficients and the digest randomness are drawn from an
//! HMAC-SHA256 stream keyed by the master secret instead of a system RNG.
//! The stream is bound to every split parameter, so changing the passphrase,
//! threshold or group layout yields unrelated shares.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::primitive::GroupSpec;

const DOMAIN: &[u8] = b"slip39-tool share entropy v1";
const BLOCK_LABEL: &[u8] = b"block";
const BLOCK_LEN: usize = 32;

/// HMAC-SHA256 over the concatenation of `parts`
pub(super) fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> Zeroizing<[u8; BLOCK_LEN]> {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; BLOCK_LEN]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Byte stream derived from the master secret and split parameters
pub(super) struct ShareEntropy {
    key: Zeroizing<[u8; BLOCK_LEN]>,
    counter: u32,
    block: Zeroizing<[u8; BLOCK_LEN]>,
    used: usize,
}

impl ShareEntropy {
    pub(super) fn new(
        master_secret: &[u8],
        passphrase: &[u8],
        threshold: u8,
        groups: &[GroupSpec],
        iteration_exponent: u8,
    ) -> Self {
        let layout: Vec<u8> = groups
            .iter()
            .flat_map(|group| [group.member_threshold, group.member_count])
            .collect();
        let params = [iteration_exponent, threshold];
        let passphrase_len = u32::try_from(passphrase.len())
            .unwrap_or(u32::MAX)
            .to_be_bytes();

        let key = hmac_sha256(
            master_secret,
            &[DOMAIN, &params, &layout, &passphrase_len, passphrase],
        );

        Self {
            key,
            counter: 0,
            block: Zeroizing::new([0u8; BLOCK_LEN]),
            used: BLOCK_LEN,
        }
    }

    fn refill(&mut self) {
        self.block = hmac_sha256(&*self.key, &[BLOCK_LABEL, &self.counter.to_be_bytes()]);
        self.counter = self.counter.wrapping_add(1);
        self.used = 0;
    }

    /// Fills `out` with the next bytes of the stream
    pub(super) fn fill(&mut self, out: &mut [u8]) {
        for byte in out {
            if self.used == BLOCK_LEN {
                self.refill();
            }
            *byte = self.block[self.used];
            self.used += 1;
        }
    }

    /// Next `len` bytes of the stream
    pub(super) fn take(&mut self, len: usize) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(vec![0u8; len]);
        self.fill(&mut bytes);
        bytes
    }

    /// A 15-bit share set identifier
    pub(super) fn identifier(&mut self) -> u16 {
        let mut bytes = [0u8; 2];
        self.fill(&mut bytes);
        u16::from_be_bytes(bytes) & 0x7FFF
    }
}

//! Salted one-way password hashing.
//!
//! Hashes are keyed BLAKE3 over a per-credential random salt, iterated
//! `rounds` times. Comparison goes through `blake3::Hash`, whose equality is
//! constant-time.

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Rounds used for newly derived credentials.
pub const DEFAULT_ROUNDS: u32 = 10_000;

const SALT_LEN: usize = 32;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Hex-encoded 32-byte salt.
    pub salt: String,
    /// Hex-encoded 32-byte digest.
    pub hash: String,
    pub rounds: u32,
}

// Never print hash material.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

impl Credential {
    /// Derive a credential for `secret` with a fresh random salt.
    pub fn derive(secret: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);
        let digest = stretch(&salt, secret, DEFAULT_ROUNDS);
        Self {
            salt: hex::encode(salt),
            hash: digest.to_hex().to_string(),
            rounds: DEFAULT_ROUNDS,
        }
    }

    /// Check `secret` against this credential in constant time.
    ///
    /// A malformed stored credential never verifies.
    pub fn verify(&self, secret: &str) -> bool {
        let Some(salt) = decode_salt(&self.salt) else {
            return false;
        };
        let Ok(expected) = blake3::Hash::from_hex(&self.hash) else {
            return false;
        };
        stretch(&salt, secret, self.rounds) == expected
    }
}

fn decode_salt(salt_hex: &str) -> Option<[u8; SALT_LEN]> {
    let bytes = hex::decode(salt_hex).ok()?;
    bytes.try_into().ok()
}

fn stretch(salt: &[u8; SALT_LEN], secret: &str, rounds: u32) -> blake3::Hash {
    let mut digest = blake3::keyed_hash(salt, secret.as_bytes());
    for _ in 1..rounds.max(1) {
        digest = blake3::keyed_hash(salt, digest.as_bytes());
    }
    digest
}

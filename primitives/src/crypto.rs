//! Hashing and signing helpers.
//!
//! Keccak-256 for ABI function selectors, SHA-256 and Ed25519 for signing
//! host-chain transactions.

use ed25519_dalek::{Signer, SigningKey};
use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// 32-byte digest.
pub type Hash = [u8; 32];

/// Keccak-256 as used by the EVM (pre-standard SHA-3 padding).
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// SHA-256 digest of a borsh-encoded host transaction.
pub fn hash_sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Detached Ed25519 signature over `message`.
pub fn sign_ed25519(message: &[u8], key: &SigningKey) -> [u8; 64] {
    key.sign(message).to_bytes()
}

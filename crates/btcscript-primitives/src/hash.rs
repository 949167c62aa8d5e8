//! Hash function primitives.
//!
//! The compositions here (SHA-256d, Hash160) are the standard Bitcoin
//! constructions: double SHA-256 for identifiers and checksums,
//! RIPEMD-160 over SHA-256 for compact public key digests.

use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Compute SHA-256 of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute double SHA-256 (SHA-256d) of the input data.
///
/// The standard Bitcoin hash used for transaction and block identifiers:
/// SHA-256(SHA-256(data)).
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute SHA-1 of the input data.
///
/// Kept only for the legacy OP_SHA1 opcode; SHA-1 is collision-broken and
/// must not be used where preimage uniqueness matters.
pub fn sha1(data: &[u8]) -> [u8; 20] {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute RIPEMD-160 of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// Used to derive the compact 20-byte digest of a public key that P2PKH
/// locking scripts commit to.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

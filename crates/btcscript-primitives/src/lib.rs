//! Cryptographic primitives backing the btcscript interpreter.
//!
//! Provides the hash functions (SHA-256, SHA-256d, SHA-1, RIPEMD-160,
//! Hash160) and the secp256k1 ECDSA types (private key, public key, DER
//! signature) that the script engine's crypto opcodes are built on.

pub mod ec;
pub mod hash;

mod error;

pub use ec::{PrivateKey, PublicKey, Signature};
pub use error::PrimitivesError;

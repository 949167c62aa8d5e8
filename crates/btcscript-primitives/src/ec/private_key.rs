use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::ec::{PublicKey, Signature};
use crate::PrimitivesError;

/// A secp256k1 private key.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a fresh random private key using the OS entropy source.
    pub fn new() -> Self {
        Self {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Build a private key from a 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let inner = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Build a private key from a hex-encoded 32-byte scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the key as a 32-byte big-endian scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Serialize the key as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key().clone())
    }

    /// Sign a 32-byte message digest, producing a low-S signature.
    pub fn sign(&self, digest: &[u8]) -> Result<Signature, PrimitivesError> {
        Signature::sign(self, digest)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_hex() {
        let key = PrivateKey::new();
        let hex_str = key.to_hex();
        let restored = PrivateKey::from_hex(&hex_str).unwrap();
        assert_eq!(key.to_bytes(), restored.to_bytes());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let zeros = [0u8; 32];
        assert!(PrivateKey::from_bytes(&zeros).is_err());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(PrivateKey::from_bytes(&[1u8; 31]).is_err());
        assert!(PrivateKey::from_bytes(&[1u8; 33]).is_err());
    }

    #[test]
    fn test_known_pub_key() {
        // Scalar 1 maps to the curve generator point.
        let mut scalar = [0u8; 32];
        scalar[31] = 1;
        let key = PrivateKey::from_bytes(&scalar).unwrap();
        assert_eq!(
            hex::encode(key.pub_key().to_compressed()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }
}

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::Signature as EcdsaSignature;

use crate::ec::{PrivateKey, PublicKey};
use crate::PrimitivesError;

/// The secp256k1 group order n, big-endian.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
    0x41, 0x41,
];

/// n / 2, the low-S boundary.
const HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b,
    0x20, 0xa0,
];

/// An ECDSA signature as its two scalar components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl Signature {
    /// Parse a signature from strict DER encoding.
    ///
    /// The encoding must be exactly one SEQUENCE of two INTEGERs with no
    /// trailing bytes, and each integer must be minimally encoded (no
    /// redundant leading zeros, a single 0x00 pad only when the high bit of
    /// the value is set).
    pub fn from_der(der: &[u8]) -> Result<Self, PrimitivesError> {
        if der.len() < 8 {
            return Err(PrimitivesError::InvalidSignature(
                "DER signature too short".to_string(),
            ));
        }
        if der[0] != 0x30 {
            return Err(PrimitivesError::InvalidSignature(
                "missing DER sequence tag".to_string(),
            ));
        }
        if der[1] as usize != der.len() - 2 {
            return Err(PrimitivesError::InvalidSignature(
                "DER length mismatch".to_string(),
            ));
        }
        let (r, rest) = read_der_int(&der[2..])?;
        let (s, rest) = read_der_int(rest)?;
        if !rest.is_empty() {
            return Err(PrimitivesError::InvalidSignature(
                "trailing bytes after DER signature".to_string(),
            ));
        }
        let r = to_32_bytes(r)?;
        let s = to_32_bytes(s)?;
        if is_zero(&r) || is_zero(&s) {
            return Err(PrimitivesError::InvalidSignature(
                "signature scalar is zero".to_string(),
            ));
        }
        if !is_less_than(&r, &CURVE_ORDER) || !is_less_than(&s, &CURVE_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature scalar exceeds curve order".to_string(),
            ));
        }
        Ok(Self { r, s })
    }

    /// Parse a signature from hex-encoded DER.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_der(&bytes)
    }

    /// Serialize as DER, normalizing S to the low half of the order.
    pub fn to_der(&self) -> Vec<u8> {
        let s = if is_greater_than(&self.s, &HALF_ORDER) {
            subtract_from_order(&self.s)
        } else {
            self.s
        };
        let r_enc = canonicalize_int(&self.r);
        let s_enc = canonicalize_int(&s);
        let mut der = Vec::with_capacity(6 + r_enc.len() + s_enc.len());
        der.push(0x30);
        der.push((4 + r_enc.len() + s_enc.len()) as u8);
        der.push(0x02);
        der.push(r_enc.len() as u8);
        der.extend_from_slice(&r_enc);
        der.push(0x02);
        der.push(s_enc.len() as u8);
        der.extend_from_slice(&s_enc);
        der
    }

    /// Serialize as hex-encoded DER.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_der())
    }

    /// Sign a message digest with the given key, producing a low-S signature.
    pub fn sign(key: &PrivateKey, digest: &[u8]) -> Result<Self, PrimitivesError> {
        let prehash = normalize_hash(digest);
        let (sig, _recovery_id) = key
            .signing_key()
            .sign_prehash_recoverable(&prehash)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let sig = sig.normalize_s().unwrap_or(sig);
        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Self { r, s })
    }

    /// Verify this signature over a message digest with the given key.
    ///
    /// Returns `Ok(false)` when the signature does not match; an `Err` only
    /// when the scalars cannot form a valid signature at all.
    pub fn verify(&self, key: &PublicKey, digest: &[u8]) -> Result<bool, PrimitivesError> {
        let prehash = normalize_hash(digest);
        let sig = EcdsaSignature::from_scalars(self.r, self.s)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(key.verifying_key().verify_prehash(&prehash, &sig).is_ok())
    }
}

/// Read one DER INTEGER, returning its value bytes and the remainder.
fn read_der_int(bytes: &[u8]) -> Result<(&[u8], &[u8]), PrimitivesError> {
    if bytes.len() < 2 || bytes[0] != 0x02 {
        return Err(PrimitivesError::InvalidSignature(
            "missing DER integer tag".to_string(),
        ));
    }
    let len = bytes[1] as usize;
    if len == 0 || bytes.len() < 2 + len {
        return Err(PrimitivesError::InvalidSignature(
            "truncated DER integer".to_string(),
        ));
    }
    let value = &bytes[2..2 + len];
    if value[0] & 0x80 != 0 {
        return Err(PrimitivesError::InvalidSignature(
            "negative DER integer".to_string(),
        ));
    }
    if len > 1 && value[0] == 0x00 && value[1] & 0x80 == 0 {
        return Err(PrimitivesError::InvalidSignature(
            "non-minimal DER integer".to_string(),
        ));
    }
    Ok((value, &bytes[2 + len..]))
}

/// Left-pad a DER integer to 32 bytes, allowing the 0x00 sign pad.
fn to_32_bytes(value: &[u8]) -> Result<[u8; 32], PrimitivesError> {
    let value = if value.len() == 33 && value[0] == 0x00 {
        &value[1..]
    } else {
        value
    };
    if value.len() > 32 {
        return Err(PrimitivesError::InvalidSignature(
            "DER integer too large".to_string(),
        ));
    }
    let mut out = [0u8; 32];
    out[32 - value.len()..].copy_from_slice(value);
    Ok(out)
}

fn is_zero(value: &[u8; 32]) -> bool {
    value.iter().all(|&b| b == 0)
}

fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a < b
}

fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}

/// Compute n - s, big-endian, for low-S normalization.
fn subtract_from_order(s: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i16 - s[i] as i16 - borrow;
        if diff < 0 {
            out[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            out[i] = diff as u8;
            borrow = 0;
        }
    }
    out
}

/// Minimal big-endian encoding of a scalar for DER: strip leading zeros and
/// re-add a single 0x00 pad when the top bit is set.
fn canonicalize_int(value: &[u8; 32]) -> Vec<u8> {
    let start = value.iter().position(|&b| b != 0).unwrap_or(31);
    let trimmed = &value[start..];
    let mut out = Vec::with_capacity(trimmed.len() + 1);
    if trimmed[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

/// Coerce a message digest to exactly 32 bytes, left-padding short inputs
/// with zeros and truncating long ones.
fn normalize_hash(digest: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    if digest.len() >= 32 {
        out.copy_from_slice(&digest[..32]);
    } else {
        out[32 - digest.len()..].copy_from_slice(digest);
    }
    out
}

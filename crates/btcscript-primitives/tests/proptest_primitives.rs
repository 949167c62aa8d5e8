use btcscript_primitives::ec::{PrivateKey, PublicKey, Signature};
use btcscript_primitives::hash::{hash160, sha256, sha256d};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn sign_der_roundtrip_verifies(message in proptest::collection::vec(any::<u8>(), 0..256)) {
        let key = PrivateKey::new();
        let digest = sha256d(&message);
        let sig = key.sign(&digest).unwrap();

        let der = sig.to_der();
        let parsed = Signature::from_der(&der).unwrap();
        prop_assert_eq!(sig, parsed);
        prop_assert!(parsed.verify(&key.pub_key(), &digest).unwrap());
    }

    #[test]
    fn pub_key_encodings_parse_to_same_point(seed in proptest::collection::vec(any::<u8>(), 1..64)) {
        // Derive a key deterministically from arbitrary seed material.
        let key = PrivateKey::from_bytes(&sha256(&seed)).unwrap();
        let pub_key = key.pub_key();
        let from_compressed = PublicKey::from_bytes(&pub_key.to_compressed()).unwrap();
        let from_uncompressed = PublicKey::from_bytes(&pub_key.to_uncompressed()).unwrap();
        prop_assert_eq!(from_compressed, from_uncompressed);
    }

    #[test]
    fn hash160_matches_composition(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let direct = hash160(&data);
        let inner = sha256(&data);
        prop_assert_eq!(direct, btcscript_primitives::hash::ripemd160(&inner));
    }
}

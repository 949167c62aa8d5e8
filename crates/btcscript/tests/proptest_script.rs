//! Property tests for script encoding and evaluation.

use btcscript::interpreter::ScriptNumber;
use btcscript::opcodes::*;
use btcscript::{Engine, Script};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn script_number_roundtrip(n in -2147483647i64..=2147483647) {
        let encoded = ScriptNumber::new(n).to_bytes();
        let decoded = ScriptNumber::from_bytes(&encoded, 4).unwrap();
        prop_assert_eq!(decoded.value(), n);
    }

    #[test]
    fn push_data_script_hex_roundtrip(chunks in prop::collection::vec(
        prop::collection::vec(any::<u8>(), 1..100),
        1..8,
    )) {
        let mut script = Script::new();
        for chunk in &chunks {
            script.append_push_data(chunk).unwrap();
        }

        let parsed = Script::from_hex(&script.to_hex()).unwrap();
        prop_assert_eq!(&parsed, &script);

        let from_asm = Script::from_asm(&script.to_asm()).unwrap();
        prop_assert_eq!(&from_asm, &script);
    }

    #[test]
    fn addition_scripts_evaluate(a in -1000i64..1000, b in -1000i64..1000) {
        let mut unlock = Script::new();
        unlock.append_push_data(&ScriptNumber::new(a).to_bytes()).unwrap();
        unlock.append_push_data(&ScriptNumber::new(b).to_bytes()).unwrap();

        let mut lock = Script::new();
        lock.append_opcodes(&[OP_ADD]).unwrap();
        lock.append_push_data(&ScriptNumber::new(a + b).to_bytes()).unwrap();
        lock.append_opcodes(&[OP_EQUAL]).unwrap();

        let engine = Engine::new();
        prop_assert!(engine.execute(&unlock, &lock, None).is_ok());
    }

    #[test]
    fn comparison_scripts_agree_with_ints(a in -1000i64..1000, b in -1000i64..1000) {
        let mut unlock = Script::new();
        unlock.append_push_data(&ScriptNumber::new(a).to_bytes()).unwrap();
        unlock.append_push_data(&ScriptNumber::new(b).to_bytes()).unwrap();

        let mut lock = Script::new();
        lock.append_opcodes(&[OP_LESSTHAN]).unwrap();

        let engine = Engine::new();
        let result = engine.execute(&unlock, &lock, None);
        prop_assert_eq!(result.is_ok(), a < b);
    }
}

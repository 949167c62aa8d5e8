//! Bitcoin script parsing, serialization, and interpretation.
//!
//! Provides the Bitcoin Script type, opcode definitions, script chunk parsing,
//! and a stack-based script interpreter engine with per-engine opcode
//! overrides.

pub mod chunk;
pub mod interpreter;
pub mod opcodes;
pub mod script;

mod error;

pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use interpreter::{Engine, InterpreterError, InterpreterErrorCode, OpcodeHandler, OpcodeTable};
pub use script::Script;

//! Bitcoin script interpreter.
//!
//! Executes an unlocking script followed by a locking script over a shared
//! stack and reports whether the final stack entry is truthy.
//!
//! # Architecture
//!
//! The interpreter does not compute signature hashes itself. Callers that
//! want OP_CHECKSIG to verify against a real message supply a precomputed
//! 32-byte digest; scripts without signature opcodes can pass `None`.
//!
//! Individual opcodes can be swapped out per engine through
//! [`Engine::with_override`], which installs a handler consulted ahead of
//! the built-in dispatch table.
//!
//! # Example
//!
//! ```ignore
//! use btcscript::interpreter::Engine;
//! use btcscript::Script;
//!
//! let engine = Engine::new();
//! engine.execute(&unlocking_script, &locking_script, None)?;
//! ```

pub mod config;
pub mod error;
pub mod parsed_opcode;
pub mod scriptnum;
pub mod stack;
pub mod thread;

mod ops_arithmetic;
mod ops_crypto;
mod ops_data;
mod ops_flow;
mod ops_stack;

pub use error::{is_error_code, InterpreterError, InterpreterErrorCode};
pub use parsed_opcode::{ParsedOpcode, ParsedScript};
pub use scriptnum::ScriptNumber;
pub use stack::Stack;

use std::collections::HashMap;

use crate::Script;
use thread::Thread;

/// An opcode handler installed on an [`Engine`].
///
/// Handlers receive the data stack and the engine's optional message digest
/// and take full responsibility for the opcode's stack effects.
pub type OpcodeHandler = fn(&mut Stack, Option<&[u8; 32]>) -> Result<(), InterpreterError>;

/// Map from opcode byte to replacement handler.
pub type OpcodeTable = HashMap<u8, OpcodeHandler>;

/// The script execution engine.
///
/// Each engine carries its own opcode override table, so two engines with
/// different overrides never interfere with each other.
pub struct Engine {
    overrides: OpcodeTable,
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            overrides: OpcodeTable::new(),
        }
    }

    /// Install a replacement handler for `opcode` on this engine.
    ///
    /// The handler is consulted before the built-in dispatch table whenever
    /// the opcode executes, including inside conditional branches.
    pub fn with_override(mut self, opcode: u8, handler: OpcodeHandler) -> Self {
        self.overrides.insert(opcode, handler);
        self
    }

    /// Execute unlocking + locking scripts.
    ///
    /// # Arguments
    /// * `unlocking_script` - The input's unlocking (signature) script.
    /// * `locking_script` - The output's locking (pubkey) script.
    /// * `digest` - Optional 32-byte message digest for signature opcodes.
    pub fn execute(
        &self,
        unlocking_script: &Script,
        locking_script: &Script,
        digest: Option<[u8; 32]>,
    ) -> Result<(), InterpreterError> {
        let mut thread = Thread::new(unlocking_script, locking_script, digest, &self.overrides)?;
        thread.execute()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

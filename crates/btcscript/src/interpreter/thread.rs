//! Script execution thread - the core interpreter engine.

use crate::opcodes::*;
use crate::Script;

use super::config::*;
use super::error::{InterpreterError, InterpreterErrorCode};
use super::ops_crypto::HashType;
use super::parsed_opcode::*;
use super::scriptnum::ScriptNumber;
use super::stack::*;
use super::OpcodeTable;

/// Conditional execution constants.
pub(crate) const OP_COND_FALSE: i32 = 0;
pub(crate) const OP_COND_TRUE: i32 = 1;
pub(crate) const OP_COND_SKIP: i32 = 2;

/// The execution thread for the script interpreter.
pub struct Thread<'a> {
    /// The main data stack used during script execution.
    pub dstack: Stack,
    /// The alternate stack used by OP_TOALTSTACK and OP_FROMALTSTACK.
    pub astack: Stack,
    /// Stack tracking nested IF/ELSE/ENDIF conditional execution state.
    pub else_stack: BoolStack,
    /// The parsed scripts to execute (unlocking then locking).
    pub scripts: Vec<ParsedScript>,
    /// Stack of conditional execution flags for nested IF/ELSE blocks.
    pub cond_stack: Vec<i32>,
    /// Index of the currently executing script in the scripts array.
    pub script_idx: usize,
    /// Offset of the currently executing opcode within the current script.
    pub script_off: usize,
    /// Running count of non-push opcodes executed (checked against MAX_OPS).
    pub num_ops: usize,
    /// Optional 32-byte message digest available to signature opcodes.
    pub digest: Option<[u8; 32]>,
    /// Handler overrides consulted ahead of the built-in dispatch table.
    overrides: &'a OpcodeTable,
}

impl<'a> Thread<'a> {
    /// Create a new execution thread from unlocking and locking scripts.
    ///
    /// Validates script sizes, parses both scripts, and initializes the
    /// execution environment.
    pub fn new(
        unlocking_script: &Script,
        locking_script: &Script,
        digest: Option<[u8; 32]>,
        overrides: &'a OpcodeTable,
    ) -> Result<Self, InterpreterError> {
        for (name, script) in [("unlocking", unlocking_script), ("locking", locking_script)] {
            if script.len() > MAX_SCRIPT_SIZE {
                return Err(InterpreterError::new(
                    InterpreterErrorCode::ScriptTooBig,
                    format!(
                        "{} script size {} is larger than the max allowed size {}",
                        name,
                        script.len(),
                        MAX_SCRIPT_SIZE
                    ),
                ));
            }
        }

        // Empty scripts = eval false
        if unlocking_script.is_empty() && locking_script.is_empty() {
            return Err(InterpreterError::new(
                InterpreterErrorCode::EvalFalse,
                "false stack entry at end of script execution".to_string(),
            ));
        }

        let uscript = parse_script(unlocking_script)?;
        let lscript = parse_script(locking_script)?;

        let scripts = vec![uscript, lscript];
        let mut script_idx = 0;

        // Skip empty unlocking script
        if unlocking_script.is_empty() {
            script_idx = 1;
        }

        Ok(Thread {
            dstack: Stack::new(MAX_SCRIPT_NUMBER_LENGTH),
            astack: Stack::new(MAX_SCRIPT_NUMBER_LENGTH),
            else_stack: BoolStack::new(),
            scripts,
            cond_stack: Vec::new(),
            script_idx,
            script_off: 0,
            num_ops: 0,
            digest,
            overrides,
        })
    }

    /// Return true if the current conditional branch is executing.
    pub fn is_branch_executing(&self) -> bool {
        match self.cond_stack.last() {
            None => true,
            Some(&v) => v == OP_COND_TRUE,
        }
    }

    /// Execute all scripts.
    pub fn execute(&mut self) -> Result<(), InterpreterError> {
        loop {
            let done = self.step()?;
            if done {
                break;
            }
        }
        self.check_error_condition()
    }

    /// Execute one step. Returns true if execution is complete.
    pub fn step(&mut self) -> Result<bool, InterpreterError> {
        // Valid PC check
        if self.script_idx >= self.scripts.len()
            || self.script_off >= self.scripts[self.script_idx].len()
        {
            return Err(InterpreterError::new(
                InterpreterErrorCode::InvalidProgramCounter,
                format!(
                    "past input scripts {}:{} {}",
                    self.script_idx,
                    self.script_off,
                    self.scripts.len()
                ),
            ));
        }

        let opcode = self.scripts[self.script_idx][self.script_off].clone();
        self.execute_opcode(&opcode)?;
        self.script_off += 1;

        // Stack size check
        let combined = self.dstack.depth() + self.astack.depth();
        if combined > MAX_STACK_SIZE as i32 {
            return Err(InterpreterError::new(
                InterpreterErrorCode::StackOverflow,
                format!(
                    "combined stack size {} > max allowed {}",
                    combined, MAX_STACK_SIZE
                ),
            ));
        }

        if self.script_off < self.scripts[self.script_idx].len() {
            return Ok(false);
        }

        // End of script - check conditionals
        if !self.cond_stack.is_empty() {
            return Err(InterpreterError::new(
                InterpreterErrorCode::UnbalancedConditional,
                "end of script reached in conditional execution".to_string(),
            ));
        }

        // Alt stack doesn't persist between scripts
        self.astack.clear();

        // Move to next script, skipping zero-length ones
        self.num_ops = 0;
        self.script_off = 0;
        self.script_idx += 1;
        while self.script_idx < self.scripts.len() && self.scripts[self.script_idx].is_empty() {
            self.script_idx += 1;
        }

        Ok(self.script_idx >= self.scripts.len())
    }

    /// Verify the final stack state: execution succeeds only when the top
    /// entry is truthy.
    pub fn check_error_condition(&mut self) -> Result<(), InterpreterError> {
        if self.dstack.depth() < 1 {
            return Err(InterpreterError::new(
                InterpreterErrorCode::EmptyStack,
                "stack empty at end of script execution".to_string(),
            ));
        }

        let v = self.dstack.pop_bool()?;
        if !v {
            return Err(InterpreterError::new(
                InterpreterErrorCode::EvalFalse,
                "false stack entry at end of script execution".to_string(),
            ));
        }

        Ok(())
    }

    fn execute_opcode(&mut self, pop: &ParsedOpcode) -> Result<(), InterpreterError> {
        // Element size check
        if pop.data.len() > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(InterpreterError::new(
                InterpreterErrorCode::ElementTooBig,
                format!(
                    "element size {} exceeds max allowed size {}",
                    pop.data.len(),
                    MAX_SCRIPT_ELEMENT_SIZE
                ),
            ));
        }

        // Disabled opcodes fail wherever they appear
        if pop.is_disabled() {
            return Err(InterpreterError::new(
                InterpreterErrorCode::DisabledOpcode,
                format!("attempt to execute disabled opcode {}", pop.name()),
            ));
        }

        // Count non-push operations
        if pop.opcode > OP_16 {
            self.num_ops += 1;
            if self.num_ops > MAX_OPS {
                return Err(InterpreterError::new(
                    InterpreterErrorCode::TooManyOperations,
                    format!("exceeded max operation limit of {}", MAX_OPS),
                ));
            }
        }

        // Not executing and not conditional => skip
        if !self.is_branch_executing() && !pop.is_conditional() {
            return Ok(());
        }

        self.dispatch_opcode(pop)
    }

    fn dispatch_opcode(&mut self, pop: &ParsedOpcode) -> Result<(), InterpreterError> {
        // Handler overrides win over the built-in dispatch table.
        if let Some(handler) = self.overrides.get(&pop.opcode) {
            return handler(&mut self.dstack, self.digest.as_ref());
        }

        match pop.opcode {
            OP_0 => {
                self.dstack.push_byte_array(vec![]);
                Ok(())
            }
            op if (0x01..=0x4b).contains(&op) => {
                self.dstack.push_byte_array(pop.data.clone());
                Ok(())
            }
            OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4 => {
                self.dstack.push_byte_array(pop.data.clone());
                Ok(())
            }
            OP_1NEGATE => {
                self.dstack.push_int(&ScriptNumber::new(-1));
                Ok(())
            }
            op if (OP_1..=OP_16).contains(&op) => {
                self.dstack.push_byte_array(vec![op - (OP_1 - 1)]);
                Ok(())
            }
            OP_NOP => Ok(()),
            OP_IF => self.op_if(),
            OP_NOTIF => self.op_notif(),
            OP_ELSE => self.op_else(pop),
            OP_ENDIF => self.op_endif(pop),
            OP_VERIFY => self.op_verify(pop),
            OP_RETURN => self.op_return(),

            // Stack ops
            OP_TOALTSTACK => self.op_to_alt_stack(),
            OP_FROMALTSTACK => self.op_from_alt_stack(),
            OP_2DROP => self.dstack.drop_n(2),
            OP_2DUP => self.dstack.dup_n(2),
            OP_3DUP => self.dstack.dup_n(3),
            OP_2OVER => self.dstack.over_n(2),
            OP_2ROT => self.dstack.rot_n(2),
            OP_2SWAP => self.dstack.swap_n(2),
            OP_IFDUP => self.op_ifdup(),
            OP_DEPTH => {
                let d = self.dstack.depth();
                self.dstack.push_int(&ScriptNumber::new(d as i64));
                Ok(())
            }
            OP_DROP => self.dstack.drop_n(1),
            OP_DUP => self.dstack.dup_n(1),
            OP_NIP => self.dstack.nip_n_discard(1),
            OP_OVER => self.dstack.over_n(1),
            OP_PICK => self.op_pick(),
            OP_ROLL => self.op_roll(),
            OP_ROT => self.dstack.rot_n(1),
            OP_SWAP => self.dstack.swap_n(1),
            OP_TUCK => self.dstack.tuck(),

            // Data ops
            OP_SIZE => self.op_size(),
            OP_EQUAL => self.op_equal(),
            OP_EQUALVERIFY => self.op_equalverify(pop),

            // Arithmetic
            OP_1ADD => self.op_unary_int(|m| m + 1),
            OP_1SUB => self.op_unary_int(|m| m - 1),
            OP_NEGATE => self.op_unary_int(|m| -m),
            OP_ABS => self.op_unary_int(|m| m.abs()),
            OP_NOT => self.op_not(),
            OP_0NOTEQUAL => self.op_0notequal(),
            OP_ADD => self.op_binary_int(|a, b| a + b),
            OP_SUB => self.op_binary_int(|a, b| a - b),
            OP_MUL => self.op_binary_int(|a, b| a * b),
            OP_BOOLAND => self.op_bool_binop(|a, b| a != 0 && b != 0),
            OP_BOOLOR => self.op_bool_binop(|a, b| a != 0 || b != 0),
            OP_NUMEQUAL => self.op_bool_binop(|a, b| a == b),
            OP_NUMEQUALVERIFY => self.op_numequalverify(pop),
            OP_NUMNOTEQUAL => self.op_bool_binop(|a, b| a != b),
            OP_LESSTHAN => self.op_bool_binop(|a, b| a < b),
            OP_GREATERTHAN => self.op_bool_binop(|a, b| a > b),
            OP_LESSTHANOREQUAL => self.op_bool_binop(|a, b| a <= b),
            OP_GREATERTHANOREQUAL => self.op_bool_binop(|a, b| a >= b),
            OP_MIN => self.op_binary_int(|a, b| a.min(b)),
            OP_MAX => self.op_binary_int(|a, b| a.max(b)),
            OP_WITHIN => self.op_within(),

            // Crypto
            OP_RIPEMD160 => self.op_hash(HashType::Ripemd160),
            OP_SHA1 => self.op_hash(HashType::Sha1),
            OP_SHA256 => self.op_hash(HashType::Sha256),
            OP_HASH160 => self.op_hash(HashType::Hash160),
            OP_HASH256 => self.op_hash(HashType::Hash256),
            OP_CHECKSIG => self.op_checksig(),
            OP_CHECKSIGVERIFY => self.op_checksigverify(pop),

            // Upgradable NOP opcodes
            op if (OP_NOP1..=OP_NOP10).contains(&op) => Ok(()),

            // All reserved/unknown opcodes
            _ => Err(InterpreterError::new(
                InterpreterErrorCode::ReservedOpcode,
                format!("attempt to execute reserved opcode {}", pop.name()),
            )),
        }
    }
}

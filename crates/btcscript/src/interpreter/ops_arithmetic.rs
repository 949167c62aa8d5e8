//! Numeric opcodes operating on script numbers.
//!
//! Operands are read with peeks and only dropped once every operand has
//! decoded, so a failing opcode leaves the stack as it found it.

use super::error::{InterpreterError, InterpreterErrorCode};
use super::parsed_opcode::ParsedOpcode;
use super::scriptnum::ScriptNumber;
use super::thread::Thread;

impl Thread<'_> {
    /// Read one number, apply `f`, replace it with the result.
    pub(crate) fn op_unary_int(
        &mut self,
        f: impl FnOnce(i64) -> i64,
    ) -> Result<(), InterpreterError> {
        let m = self.dstack.peek_int(0)?;
        self.dstack.drop_n(1)?;
        self.dstack.push_int(&ScriptNumber::new(f(m.value())));
        Ok(())
    }

    pub(crate) fn op_not(&mut self) -> Result<(), InterpreterError> {
        let m = self.dstack.peek_int(0)?;
        self.dstack.drop_n(1)?;
        self.dstack.push_bool(m.is_zero());
        Ok(())
    }

    pub(crate) fn op_0notequal(&mut self) -> Result<(), InterpreterError> {
        let m = self.dstack.peek_int(0)?;
        self.dstack.drop_n(1)?;
        self.dstack.push_bool(!m.is_zero());
        Ok(())
    }

    /// Read two numbers, apply `f`, replace them with the numeric result.
    pub(crate) fn op_binary_int(
        &mut self,
        f: impl FnOnce(i64, i64) -> i64,
    ) -> Result<(), InterpreterError> {
        self.dstack.require(2)?;
        let v1 = self.dstack.peek_int(0)?;
        let v0 = self.dstack.peek_int(1)?;
        self.dstack.drop_n(2)?;
        self.dstack
            .push_int(&ScriptNumber::new(f(v0.value(), v1.value())));
        Ok(())
    }

    /// Read two numbers, apply `f`, replace them with the boolean result.
    pub(crate) fn op_bool_binop(
        &mut self,
        f: impl FnOnce(i64, i64) -> bool,
    ) -> Result<(), InterpreterError> {
        self.dstack.require(2)?;
        let v1 = self.dstack.peek_int(0)?;
        let v0 = self.dstack.peek_int(1)?;
        self.dstack.drop_n(2)?;
        self.dstack.push_bool(f(v0.value(), v1.value()));
        Ok(())
    }

    pub(crate) fn op_numequalverify(&mut self, pop: &ParsedOpcode) -> Result<(), InterpreterError> {
        self.op_bool_binop(|a, b| a == b)?;
        self.abstract_verify(pop, InterpreterErrorCode::NumEqualVerify)
    }

    pub(crate) fn op_within(&mut self) -> Result<(), InterpreterError> {
        self.dstack.require(3)?;
        let max = self.dstack.peek_int(0)?;
        let min = self.dstack.peek_int(1)?;
        let x = self.dstack.peek_int(2)?;
        self.dstack.drop_n(3)?;
        self.dstack
            .push_bool(min.value() <= x.value() && x.value() < max.value());
        Ok(())
    }
}

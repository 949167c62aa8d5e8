//! Flow control opcodes: conditionals, verify, and return.

use super::error::{InterpreterError, InterpreterErrorCode};
use super::parsed_opcode::ParsedOpcode;
use super::thread::*;

impl Thread<'_> {
    pub(crate) fn op_if(&mut self) -> Result<(), InterpreterError> {
        let mut cond = OP_COND_SKIP;
        if self.is_branch_executing() {
            let ok = self.dstack.pop_bool()?;
            cond = if ok { OP_COND_TRUE } else { OP_COND_FALSE };
        }
        self.cond_stack.push(cond);
        self.else_stack.push_bool(false);
        Ok(())
    }

    pub(crate) fn op_notif(&mut self) -> Result<(), InterpreterError> {
        let mut cond = OP_COND_SKIP;
        if self.is_branch_executing() {
            let ok = self.dstack.pop_bool()?;
            cond = if ok { OP_COND_FALSE } else { OP_COND_TRUE };
        }
        self.cond_stack.push(cond);
        self.else_stack.push_bool(false);
        Ok(())
    }

    pub(crate) fn op_else(&mut self, pop: &ParsedOpcode) -> Result<(), InterpreterError> {
        if self.cond_stack.is_empty() {
            return Err(InterpreterError::new(
                InterpreterErrorCode::UnbalancedConditional,
                format!("encountered opcode {} with no matching opcode to begin conditional execution", pop.name()),
            ));
        }

        // An OP_ELSE after a previous OP_ELSE in the same block is invalid.
        let seen_else = self.else_stack.pop_bool()?;
        if seen_else {
            return Err(InterpreterError::new(
                InterpreterErrorCode::UnbalancedConditional,
                format!("encountered opcode {} after another opcode {}", pop.name(), pop.name()),
            ));
        }
        self.else_stack.push_bool(true);

        if let Some(cond) = self.cond_stack.last_mut() {
            *cond = match *cond {
                OP_COND_TRUE => OP_COND_FALSE,
                OP_COND_FALSE => OP_COND_TRUE,
                _ => OP_COND_SKIP,
            };
        }
        Ok(())
    }

    pub(crate) fn op_endif(&mut self, pop: &ParsedOpcode) -> Result<(), InterpreterError> {
        if self.cond_stack.is_empty() {
            return Err(InterpreterError::new(
                InterpreterErrorCode::UnbalancedConditional,
                format!("encountered opcode {} with no matching opcode to begin conditional execution", pop.name()),
            ));
        }
        self.cond_stack.pop();
        self.else_stack.pop_bool()?;
        Ok(())
    }

    /// Pop the top stack entry and fail with `code` if it is false.
    pub(crate) fn abstract_verify(
        &mut self,
        pop: &ParsedOpcode,
        code: InterpreterErrorCode,
    ) -> Result<(), InterpreterError> {
        let verified = self.dstack.pop_bool()?;
        if !verified {
            return Err(InterpreterError::new(
                code,
                format!("{} failed", pop.name()),
            ));
        }
        Ok(())
    }

    pub(crate) fn op_verify(&mut self, pop: &ParsedOpcode) -> Result<(), InterpreterError> {
        self.abstract_verify(pop, InterpreterErrorCode::Verify)
    }

    pub(crate) fn op_return(&mut self) -> Result<(), InterpreterError> {
        Err(InterpreterError::new(
            InterpreterErrorCode::EarlyReturn,
            "script returned early".to_string(),
        ))
    }
}

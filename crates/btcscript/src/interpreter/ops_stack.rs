//! Stack manipulation opcodes that need more than a direct `Stack` call.

use super::error::{InterpreterError, InterpreterErrorCode};
use super::thread::Thread;

impl Thread<'_> {
    pub(crate) fn op_to_alt_stack(&mut self) -> Result<(), InterpreterError> {
        let v = self.dstack.pop_byte_array()?;
        self.astack.push_byte_array(v);
        Ok(())
    }

    pub(crate) fn op_from_alt_stack(&mut self) -> Result<(), InterpreterError> {
        let v = self.astack.pop_byte_array()?;
        self.dstack.push_byte_array(v);
        Ok(())
    }

    pub(crate) fn op_ifdup(&mut self) -> Result<(), InterpreterError> {
        if self.dstack.peek_bool(0)? {
            let v = self.dstack.peek_byte_array(0)?;
            self.dstack.push_byte_array(v);
        }
        Ok(())
    }

    pub(crate) fn op_pick(&mut self) -> Result<(), InterpreterError> {
        let n = self.peek_pick_depth()?;
        self.dstack.drop_n(1)?;
        self.dstack.pick_n(n)
    }

    pub(crate) fn op_roll(&mut self) -> Result<(), InterpreterError> {
        let n = self.peek_pick_depth()?;
        self.dstack.drop_n(1)?;
        self.dstack.roll_n(n)
    }

    /// Read the PICK/ROLL depth operand from the top of the stack without
    /// consuming it, checking that the target item exists below the operand.
    fn peek_pick_depth(&self) -> Result<i32, InterpreterError> {
        let n = self.dstack.peek_int(0)?.to_i32();
        if n < 0 || n > self.dstack.depth() - 2 {
            return Err(InterpreterError::new(
                InterpreterErrorCode::InvalidStackOperation,
                format!(
                    "index {} is invalid for stack size {}",
                    n,
                    self.dstack.depth() - 1
                ),
            ));
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::OpcodeTable;
    use crate::opcodes::OP_1;
    use crate::Script;

    fn test_thread(table: &OpcodeTable) -> Thread<'_> {
        Thread::new(
            &Script::from_bytes(&[OP_1]),
            &Script::from_bytes(&[OP_1]),
            None,
            table,
        )
        .unwrap()
    }

    #[test]
    fn test_pick_copies_target() {
        let table = OpcodeTable::new();
        let mut thread = test_thread(&table);
        thread.dstack.push_byte_array(vec![0x0a]);
        thread.dstack.push_byte_array(vec![0x0b]);
        thread.dstack.push_byte_array(vec![0x01]);

        thread.op_pick().unwrap();
        assert_eq!(
            thread.dstack.get_stack(),
            vec![vec![0x0a], vec![0x0b], vec![0x0a]]
        );
    }

    #[test]
    fn test_roll_moves_target() {
        let table = OpcodeTable::new();
        let mut thread = test_thread(&table);
        thread.dstack.push_byte_array(vec![0x0a]);
        thread.dstack.push_byte_array(vec![0x0b]);
        thread.dstack.push_byte_array(vec![0x01]);

        thread.op_roll().unwrap();
        assert_eq!(thread.dstack.get_stack(), vec![vec![0x0b], vec![0x0a]]);
    }

    #[test]
    fn test_pick_out_of_range_leaves_stack() {
        let table = OpcodeTable::new();
        let mut thread = test_thread(&table);
        thread.dstack.push_byte_array(vec![0x02]);

        let err = thread.op_pick().unwrap_err();
        assert_eq!(err.code, InterpreterErrorCode::InvalidStackOperation);
        assert_eq!(thread.dstack.get_stack(), vec![vec![0x02]]);
    }

    #[test]
    fn test_roll_out_of_range_leaves_stack() {
        let table = OpcodeTable::new();
        let mut thread = test_thread(&table);
        thread.dstack.push_byte_array(vec![0x0a]);
        thread.dstack.push_byte_array(vec![0x05]);

        let err = thread.op_roll().unwrap_err();
        assert_eq!(err.code, InterpreterErrorCode::InvalidStackOperation);
        assert_eq!(thread.dstack.get_stack(), vec![vec![0x0a], vec![0x05]]);
    }

    #[test]
    fn test_pick_negative_depth_leaves_stack() {
        let table = OpcodeTable::new();
        let mut thread = test_thread(&table);
        thread.dstack.push_byte_array(vec![0x0a]);
        // -1 as a script number
        thread.dstack.push_byte_array(vec![0x81]);

        let err = thread.op_pick().unwrap_err();
        assert_eq!(err.code, InterpreterErrorCode::InvalidStackOperation);
        assert_eq!(thread.dstack.get_stack(), vec![vec![0x0a], vec![0x81]]);
    }

    #[test]
    fn test_pick_oversized_depth_operand_leaves_stack() {
        let table = OpcodeTable::new();
        let mut thread = test_thread(&table);
        thread.dstack.push_byte_array(vec![0x0a]);
        thread.dstack.push_byte_array(vec![0x01, 0x02, 0x03, 0x04, 0x05]);

        let err = thread.op_pick().unwrap_err();
        assert_eq!(err.code, InterpreterErrorCode::NumberTooBig);
        assert_eq!(
            thread.dstack.get_stack(),
            vec![vec![0x0a], vec![0x01, 0x02, 0x03, 0x04, 0x05]]
        );
    }
}

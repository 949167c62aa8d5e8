//! Script number encoding with Bitcoin consensus rules.
//!
//! All numbers on the script stack are encoded as little-endian byte arrays
//! with a sign bit in the most significant bit of the last byte. Numeric
//! opcodes accept operands of at most 4 bytes, so an i64 value comfortably
//! holds every operand and every arithmetic result.

use super::error::{InterpreterError, InterpreterErrorCode};

/// A numeric stack value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptNumber {
    val: i64,
}

impl ScriptNumber {
    /// Create a new ScriptNumber from an i64 value.
    pub fn new(val: i64) -> Self {
        ScriptNumber { val }
    }

    /// Parse a byte array into a ScriptNumber.
    ///
    /// `script_num_len` is the max allowed byte length for the operand.
    pub fn from_bytes(bb: &[u8], script_num_len: usize) -> Result<Self, InterpreterError> {
        if bb.len() > script_num_len {
            return Err(InterpreterError::new(
                InterpreterErrorCode::NumberTooBig,
                format!(
                    "numeric value encoded as {:02x?} is {} bytes which exceeds the max allowed of {}",
                    bb,
                    bb.len(),
                    script_num_len
                ),
            ));
        }

        if bb.is_empty() {
            return Ok(ScriptNumber { val: 0 });
        }

        // Decode from little endian with sign bit
        let mut v: u64 = 0;
        for (i, &b) in bb.iter().enumerate() {
            v |= (b as u64) << (8 * i);
        }

        let sign_mask = 0x80u64 << (8 * (bb.len() - 1));
        let val = if v & sign_mask != 0 {
            -((v & !sign_mask) as i64)
        } else {
            v as i64
        };

        Ok(ScriptNumber { val })
    }

    /// Serialize the number to bytes in little-endian with sign bit.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.val == 0 {
            return vec![];
        }

        let is_negative = self.val < 0;
        let mut abs_val = self.val.unsigned_abs();

        let mut result: Vec<u8> = Vec::new();
        while abs_val > 0 {
            result.push((abs_val & 0xff) as u8);
            abs_val >>= 8;
        }

        // Handle sign bit
        if result[result.len() - 1] & 0x80 != 0 {
            // Need an extra byte for the sign
            result.push(if is_negative { 0x80 } else { 0x00 });
        } else if is_negative {
            let last = result.len() - 1;
            result[last] |= 0x80;
        }

        result
    }

    /// The i64 value.
    pub fn value(&self) -> i64 {
        self.val
    }

    /// Return true if this number is zero.
    pub fn is_zero(&self) -> bool {
        self.val == 0
    }

    /// Convert to i32, clamping on overflow.
    pub fn to_i32(&self) -> i32 {
        if self.val > i32::MAX as i64 {
            i32::MAX
        } else if self.val < i32::MIN as i64 {
            i32::MIN
        } else {
            self.val as i32
        }
    }
}

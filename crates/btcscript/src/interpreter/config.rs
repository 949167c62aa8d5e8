//! Interpreter consensus limits.
//!
//! These match the limits enforced by the original Bitcoin client.

/// Maximum number of non-push operations per script.
pub const MAX_OPS: usize = 201;

/// Maximum combined depth of the data and alt stacks.
pub const MAX_STACK_SIZE: usize = 1000;

/// Maximum script size in bytes.
pub const MAX_SCRIPT_SIZE: usize = 10000;

/// Maximum size of a single stack element in bytes.
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Maximum byte length of a numeric operand.
pub const MAX_SCRIPT_NUMBER_LENGTH: usize = 4;

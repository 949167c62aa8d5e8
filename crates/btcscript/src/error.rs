/// Error types for script construction and parsing.
///
/// Covers byte-level decode failures, ASM parsing errors, and script
/// classification problems. Runtime evaluation failures use
/// [`crate::interpreter::InterpreterError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// An unrecognized opcode name was encountered during ASM parsing.
    #[error("invalid opcode: {0}")]
    InvalidOpcode(String),

    /// Attempted to use append_opcodes for a push data opcode.
    #[error("use append_push_data for push data funcs: {0}")]
    InvalidOpcodeType(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// A push data part exceeds protocol limits.
    #[error("part too big '{0}'")]
    PartTooBig(usize),

    /// Script index is out of range.
    #[error("script index out of range")]
    IndexOutOfRange,
}

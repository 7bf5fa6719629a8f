//! Per-instruction error types
//!
//! An [`InstructionError`] never stops a run. The engine wraps it in a
//! [`Diagnostic`] with the offending line, logs it, and moves on to the next
//! instruction.

use crate::parser::ast::{Address, Opcode};
use crate::parser::parse::{OperandError, ParseError};
use std::fmt;
use thiserror::Error;

/// Errors raised while decoding or applying a single instruction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionError {
    /// First token is not a recognized mnemonic
    #[error("unknown instruction '{mnemonic}'")]
    UnknownOpcode { mnemonic: String },

    /// `Load` from an address that was never seeded or written
    #[error("address {address} has never been written")]
    UnseededAddress { address: Address },

    /// Wrong operand count or an operand that does not parse
    #[error("malformed operand: {0}")]
    MalformedOperand(OperandError),

    /// Result does not fit in a machine word
    #[error("integer overflow in {opcode}")]
    Overflow { opcode: Opcode },
}

impl From<ParseError> for InstructionError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnknownOpcode { mnemonic } => InstructionError::UnknownOpcode { mnemonic },
            ParseError::MalformedOperand(inner) => InstructionError::MalformedOperand(inner),
        }
    }
}

/// An instruction error tied to the source line that raised it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number
    pub line: usize,
    /// Raw line text, trimmed
    pub text: String,
    pub error: InstructionError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            InstructionError::UnknownOpcode { .. } => {
                write!(f, "Unknown instruction at line {}: {}", self.line, self.text)
            }
            err => write!(f, "Error at line {}: {} -> {}", self.line, self.text, err),
        }
    }
}

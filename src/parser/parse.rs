//! Single-line instruction decoder
//!
//! [`parse_line`] turns one source line into an [`Instruction`], `None` for a
//! blank line, or a [`ParseError`]. Errors are not fatal here: the program keeps
//! them next to the line and the engine reports them when it gets there.

use super::ast::{Address, Instruction, Opcode, Word};
use super::lexer::{strip_brackets, strip_hash, tokenize};
use thiserror::Error;

/// Why an operand could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    #[error("{opcode} expects {expected} operand(s), got {got}")]
    Arity {
        opcode: Opcode,
        expected: usize,
        got: usize,
    },

    #[error("invalid integer literal '{token}'")]
    InvalidInteger { token: String },

    #[error("invalid memory address '{token}'")]
    InvalidAddress { token: String },

    #[error("invalid jump target '{token}'")]
    InvalidTarget { token: String },
}

/// Line-level decode failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown instruction '{mnemonic}'")]
    UnknownOpcode { mnemonic: String },

    #[error(transparent)]
    MalformedOperand(#[from] OperandError),
}

/// Decode one line of source text
pub fn parse_line(line: &str) -> Result<Option<Instruction>, ParseError> {
    let tokens = tokenize(line);
    let Some((mnemonic, operands)) = tokens.split_first() else {
        return Ok(None);
    };

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| ParseError::UnknownOpcode {
        mnemonic: mnemonic.clone(),
    })?;

    if operands.len() != opcode.operand_count() {
        return Err(OperandError::Arity {
            opcode,
            expected: opcode.operand_count(),
            got: operands.len(),
        }
        .into());
    }

    let instruction = match opcode {
        Opcode::Load => Instruction::Load {
            reg: operands[0].clone(),
            addr: parse_address(&operands[1])?,
        },
        Opcode::Store => Instruction::Store {
            reg: operands[0].clone(),
            addr: parse_address(&operands[1])?,
        },
        // The middle token is a separator and is not checked
        Opcode::Set => Instruction::Set {
            reg: operands[0].clone(),
            value: parse_integer(&operands[2])?,
        },
        Opcode::Add => Instruction::Add {
            lhs: operands[0].clone(),
            rhs: operands[1].clone(),
            dest: operands[2].clone(),
        },
        Opcode::Neg => Instruction::Neg {
            reg: operands[0].clone(),
        },
        Opcode::Jump => Instruction::Jump {
            target: parse_target(&operands[0])?,
        },
        Opcode::JumpPositive => Instruction::JumpPositive {
            reg: operands[0].clone(),
            target: parse_target(&operands[1])?,
        },
    };

    Ok(Some(instruction))
}

fn parse_integer(token: &str) -> Result<Word, OperandError> {
    token.parse().map_err(|_| OperandError::InvalidInteger {
        token: token.to_string(),
    })
}

fn parse_address(token: &str) -> Result<Address, OperandError> {
    strip_brackets(token)
        .parse()
        .map_err(|_| OperandError::InvalidAddress {
            token: token.to_string(),
        })
}

fn parse_target(token: &str) -> Result<i64, OperandError> {
    strip_hash(token)
        .parse()
        .map_err(|_| OperandError::InvalidTarget {
            token: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Instruction {
        parse_line(line)
            .expect("parse failed")
            .expect("line was blank")
    }

    #[test]
    fn test_blank_line_is_skip() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn test_every_opcode() {
        assert_eq!(
            parse("Load R1 [7]"),
            Instruction::Load {
                reg: "R1".into(),
                addr: 7
            }
        );
        assert_eq!(
            parse("Store R2, [1023]"),
            Instruction::Store {
                reg: "R2".into(),
                addr: 1023
            }
        );
        assert_eq!(
            parse("Set R1 = -42"),
            Instruction::Set {
                reg: "R1".into(),
                value: -42
            }
        );
        assert_eq!(
            parse("Add R1, R2, R3"),
            Instruction::Add {
                lhs: "R1".into(),
                rhs: "R2".into(),
                dest: "R3".into()
            }
        );
        assert_eq!(parse("Neg R4"), Instruction::Neg { reg: "R4".into() });
        assert_eq!(parse("Jump #3"), Instruction::Jump { target: 3 });
        assert_eq!(
            parse("JP R1 #0"),
            Instruction::JumpPositive {
                reg: "R1".into(),
                target: 0
            }
        );
    }

    #[test]
    fn test_set_separator_is_not_checked() {
        for line in ["Set R1 := 5", "Set R1 to 5"] {
            assert_eq!(
                parse(line),
                Instruction::Set {
                    reg: "R1".into(),
                    value: 5
                }
            );
        }
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(
            parse_line("load R1 [1]"),
            Err(ParseError::UnknownOpcode {
                mnemonic: "load".into()
            })
        );
    }

    #[test]
    fn test_malformed_operands() {
        assert!(matches!(
            parse_line("Load R1"),
            Err(ParseError::MalformedOperand(OperandError::Arity {
                expected: 2,
                got: 1,
                ..
            }))
        ));
        assert!(matches!(
            parse_line("Set R1 = five"),
            Err(ParseError::MalformedOperand(
                OperandError::InvalidInteger { .. }
            ))
        ));
        assert!(matches!(
            parse_line("Set R1 5"),
            Err(ParseError::MalformedOperand(OperandError::Arity {
                expected: 3,
                got: 2,
                ..
            }))
        ));
        assert!(matches!(
            parse_line("Store R1 [-3]"),
            Err(ParseError::MalformedOperand(
                OperandError::InvalidAddress { .. }
            ))
        ));
        assert!(matches!(
            parse_line("Jump #x"),
            Err(ParseError::MalformedOperand(
                OperandError::InvalidTarget { .. }
            ))
        ));
    }
}

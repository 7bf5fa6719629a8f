// Instruction set and program representation

use super::parse::{parse_line, ParseError};
use std::fmt;

/// Memory address (decimal in source and in the persisted store)
pub type Address = u64;

/// Machine word held by registers and memory cells
pub type Word = i64;

/// Recognized opcode mnemonics (case-sensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Load,
    Store,
    Set,
    Add,
    Neg,
    Jump,
    JumpPositive,
}

impl Opcode {
    pub const ALL: [Opcode; 7] = [
        Opcode::Load,
        Opcode::Store,
        Opcode::Set,
        Opcode::Add,
        Opcode::Neg,
        Opcode::Jump,
        Opcode::JumpPositive,
    ];

    /// Look up an opcode by its exact mnemonic
    pub fn from_mnemonic(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == token)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Load => "Load",
            Opcode::Store => "Store",
            Opcode::Set => "Set",
            Opcode::Add => "Add",
            Opcode::Neg => "Neg",
            Opcode::Jump => "Jump",
            Opcode::JumpPositive => "JP",
        }
    }

    /// Number of tokens following the mnemonic
    pub fn operand_count(self) -> usize {
        match self {
            Opcode::Load | Opcode::Store | Opcode::JumpPositive => 2,
            Opcode::Set => 3, // separator token included
            Opcode::Add => 3,
            Opcode::Neg | Opcode::Jump => 1,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// One decoded instruction.
///
/// Jump targets are kept as written: 1-indexed source line numbers, possibly
/// zero or negative. The engine converts them to a program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `Load <reg> [<addr>]`
    Load { reg: String, addr: Address },
    /// `Store <reg> [<addr>]`
    Store { reg: String, addr: Address },
    /// `Set <reg> = <int>`
    Set { reg: String, value: Word },
    /// `Add <r1> <r2> <r3>`: r3 := r1 + r2
    Add {
        lhs: String,
        rhs: String,
        dest: String,
    },
    /// `Neg <reg>`
    Neg { reg: String },
    /// `Jump #<line>`
    Jump { target: i64 },
    /// `JP <reg> #<line>`: taken when the register is strictly positive
    JumpPositive { reg: String, target: i64 },
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Load { .. } => Opcode::Load,
            Instruction::Store { .. } => Opcode::Store,
            Instruction::Set { .. } => Opcode::Set,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Neg { .. } => Opcode::Neg,
            Instruction::Jump { .. } => Opcode::Jump,
            Instruction::JumpPositive { .. } => Opcode::JumpPositive,
        }
    }
}

/// Result of decoding one source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Blank or whitespace-only line
    Blank,
    Instruction(Instruction),
    /// Decoding failed; reported only if execution reaches the line
    Invalid(ParseError),
}

/// A program line: raw text plus its decoded form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number
    pub number: usize,
    pub text: String,
    pub decoded: Decoded,
}

impl SourceLine {
    pub fn new(number: usize, text: &str) -> Self {
        let decoded = match parse_line(text) {
            Ok(Some(instruction)) => Decoded::Instruction(instruction),
            Ok(None) => Decoded::Blank,
            Err(err) => Decoded::Invalid(err),
        };
        SourceLine {
            number,
            text: text.to_string(),
            decoded,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.decoded, Decoded::Blank)
    }
}

/// An immutable, ordered program. Line order is execution order absent jumps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    lines: Vec<SourceLine>,
}

impl Program {
    /// Decode every line of `source`. Never fails: bad lines carry their error.
    pub fn parse(source: &str) -> Self {
        let lines = source
            .lines()
            .enumerate()
            .map(|(idx, text)| SourceLine::new(idx + 1, text))
            .collect();
        Program { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Fetch by zero-based program counter
    pub fn get(&self, index: usize) -> Option<&SourceLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic_lookup_is_case_sensitive() {
        assert_eq!(Opcode::from_mnemonic("JP"), Some(Opcode::JumpPositive));
        assert_eq!(Opcode::from_mnemonic("Load"), Some(Opcode::Load));
        assert_eq!(Opcode::from_mnemonic("load"), None);
        assert_eq!(Opcode::from_mnemonic("Jp"), None);
    }

    #[test]
    fn test_program_keeps_blank_and_invalid_lines() {
        let program = Program::parse("Set R1 = 1\n\nFoo R1\n");
        assert_eq!(program.len(), 3);
        assert!(program.get(1).unwrap().is_blank());
        assert!(matches!(
            program.get(2).unwrap().decoded,
            Decoded::Invalid(ParseError::UnknownOpcode { .. })
        ));
        assert_eq!(program.get(2).unwrap().number, 3);
    }
}

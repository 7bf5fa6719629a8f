//! Assembly source parser
//!
//! This module turns program text into a decoded [`ast::Program`]:
//! - [`lexer`]: line tokenization (comma stripping, operand decorations)
//! - [`parse`]: decoding one line into an [`ast::Instruction`]
//! - [`ast`]: opcode, instruction and program definitions
//!
//! # Grammar
//!
//! One instruction per line, mnemonics are case-sensitive:
//!
//! ```text
//! Load  <reg> [<addr>]
//! Store <reg> [<addr>]
//! Set   <reg> = <int>
//! Add   <r1> <r2> <r3>
//! Neg   <reg>
//! Jump  #<line>
//! JP    <reg> #<line>
//! ```
//!
//! Blank lines are kept so that line numbers stay aligned with jump targets.

pub mod ast;
pub mod lexer;
pub mod parse;

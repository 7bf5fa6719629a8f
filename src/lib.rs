//! # Introduction
//!
//! regvm runs programs for a tiny register machine written in a line-oriented
//! assembly language, optionally stopping before every line in a terminal
//! debugger. Memory survives between runs in a JSON store; registers do not.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → Program → Interpreter (+ Observer) → Change-set report
//!                                          ↕
//!                                    Machine state ↔ JSON store
//! ```
//!
//! 1. [`parser`]: splits lines into tokens and decodes each into an
//!    [`parser::ast::Instruction`], keeping parse failures for later.
//! 2. [`interpreter`]: the fetch-decode-execute loop; reports per-line errors
//!    and records every `Store` in a [`interpreter::changes::ChangeSet`].
//! 3. [`memory`]: default-zero [`memory::Registers`] and seeded
//!    [`memory::Memory`] bundled as a [`memory::MachineState`].
//! 4. [`debugger`]: the read-only [`debugger::Observer`] hook and the
//!    interactive step/state debugger.
//! 5. [`persist`]: the JSON memory store.
//! 6. [`runner`]: load, run, save and report one program.
//! 7. [`repl`]: live set mode for registers and memory.
//! 8. [`ui`]: ratatui front-end; not part of the stable library API.
//!
//! ## Instruction set
//!
//! `Load`, `Store`, `Set`, `Add`, `Neg`, `Jump` and `JP` (jump if positive).
//! Jump targets are 1-indexed line numbers; a target outside the program ends
//! the run.

pub mod config;
pub mod debugger;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod persist;
pub mod repl;
pub mod runner;
pub mod ui;

pub use runner::run_program;

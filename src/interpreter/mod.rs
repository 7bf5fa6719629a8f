//! Instruction execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the fetch-decode-execute loop ([`engine::Interpreter`])
//! - [`errors`]: per-instruction error types and diagnostics
//! - [`changes`]: the change-set of stored addresses and its report
//!
//! # Execution Model
//!
//! The program counter starts at 0 and advances by one line per step unless a
//! jump assigns it directly. The run halts when the counter falls outside the
//! program; there is no halt opcode. A failing instruction is reported and
//! skipped, it never stops the run.

pub mod changes;
pub mod engine;
pub mod errors;
mod jumps;
mod ops;

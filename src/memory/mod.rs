//! Machine state for the interpreter
//!
//! This module provides the two stores an instruction can touch:
//! - [`registers`]: named registers with default-zero reads, never persisted
//! - [`cells`]: flat memory seeded with addresses `0..1024`, persisted between runs
//!
//! [`MachineState`] bundles both and is passed by reference into the engine and
//! the debugger. It is built at run start (memory optionally loaded from disk)
//! and only the engine mutates it.

pub mod cells;
pub mod registers;

pub use cells::Memory;
pub use registers::Registers;

/// Registers plus memory for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineState {
    pub registers: Registers,
    pub memory: Memory,
}

impl MachineState {
    /// Empty registers and freshly seeded memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registers over previously loaded memory
    pub fn with_memory(memory: Memory) -> Self {
        MachineState {
            registers: Registers::new(),
            memory,
        }
    }
}

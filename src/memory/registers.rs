//! Register file with default-zero reads

use crate::parser::ast::Word;
use rustc_hash::FxHashMap;

/// Named registers. Names are free-form tokens (`R0`, `R1`, `acc`, ...).
///
/// Registers are never persisted; each process starts with an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    values: FxHashMap<String, Word>,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a register; unset registers read as 0
    pub fn get(&self, name: &str) -> Word {
        self.values.get(name).copied().unwrap_or(0)
    }

    pub fn set(&mut self, name: &str, value: Word) {
        self.values.insert(name.to_string(), value);
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All assigned registers, sorted by name for stable display
    pub fn sorted(&self) -> Vec<(&str, Word)> {
        let mut entries: Vec<(&str, Word)> = self
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

//! Addressable memory cells

use crate::config::MEMORY_SIZE;
use crate::parser::ast::{Address, Word};
use std::collections::BTreeMap;

/// Flat memory: address to signed value.
///
/// Addresses `0..MEMORY_SIZE` are seeded with 0. Writes outside that range are
/// accepted and create new cells; reads of a cell that was never seeded or
/// written return `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: BTreeMap<Address, Word>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: (0..MEMORY_SIZE).map(|addr| (addr, 0)).collect(),
        }
    }

    pub fn read(&self, addr: Address) -> Option<Word> {
        self.cells.get(&addr).copied()
    }

    pub fn write(&mut self, addr: Address, value: Word) {
        self.cells.insert(addr, value);
    }

    /// Merge stored values over the current cells
    pub fn overlay<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (Address, Word)>,
    {
        self.cells.extend(values);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells holding a non-zero value, in address order
    pub fn non_zero(&self) -> impl Iterator<Item = (Address, Word)> + '_ {
        self.cells
            .iter()
            .filter(|(_, value)| **value != 0)
            .map(|(addr, value)| (*addr, *value))
    }

    pub fn cells(&self) -> &BTreeMap<Address, Word> {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_range() {
        let mem = Memory::new();
        assert_eq!(mem.len(), 1024);
        assert_eq!(mem.read(0), Some(0));
        assert_eq!(mem.read(1023), Some(0));
        assert_eq!(mem.read(1024), None);
    }

    #[test]
    fn test_write_outside_seeded_range() {
        let mut mem = Memory::new();
        mem.write(5000, 7);
        assert_eq!(mem.read(5000), Some(7));
        assert_eq!(mem.len(), 1025);
    }

    #[test]
    fn test_overlay_and_non_zero() {
        let mut mem = Memory::new();
        mem.overlay([(3, 9), (2000, -1), (4, 0)]);
        let non_zero: Vec<_> = mem.non_zero().collect();
        assert_eq!(non_zero, vec![(3, 9), (2000, -1)]);
    }
}

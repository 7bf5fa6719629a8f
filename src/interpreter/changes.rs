//! Change-set tracking and the end-of-run memory report

use crate::parser::ast::{Address, Word};
use std::collections::BTreeMap;
use std::fmt;

/// Notice printed when a run stored nothing
pub const NO_CHANGES: &str = "No memory values changed.";

/// Final value of every address written by a `Store` during one run.
///
/// Reporting only; not part of the machine state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: BTreeMap<Address, Word>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, addr: Address, value: Word) {
        self.entries.insert(addr, value);
    }

    pub fn get(&self, addr: Address) -> Option<Word> {
        self.entries.get(&addr).copied()
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.entries.contains_key(&addr)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = (Address, Word)> + '_ {
        self.entries.iter().map(|(addr, value)| (*addr, *value))
    }

    /// One `[<addr>] = <value>` line per entry, or the no-change notice
    pub fn report_lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![NO_CHANGES.to_string()];
        }
        self.iter()
            .map(|(addr, value)| format!("[{}] = {}", addr, value))
            .collect()
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.report_lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_sorted_numerically() {
        let mut changes = ChangeSet::new();
        changes.record(100, 1);
        changes.record(9, -2);
        changes.record(20, 0);
        assert_eq!(
            changes.report_lines(),
            vec!["[9] = -2", "[20] = 0", "[100] = 1"]
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut changes = ChangeSet::new();
        changes.record(5, 1);
        changes.record(5, 2);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get(5), Some(2));
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(ChangeSet::new().report_lines(), vec![NO_CHANGES]);
    }
}

//! One program execution against a memory store
//!
//! [`run_program`] loads memory, runs the program under an observer and writes
//! memory back, except when the observer quit the run. A run cut short by the
//! step limit is still saved. [`report`] renders the text printed after a run.

use crate::debugger::{DebugError, Observer};
use crate::interpreter::changes::NO_CHANGES;
use crate::interpreter::engine::{Halt, Interpreter, RunOutcome};
use crate::memory::MachineState;
use crate::parser::ast::Program;
use crate::persist::{MemoryStore, PersistError};
use thiserror::Error;

pub const COMPLETE_BANNER: &str = "=== EXECUTION COMPLETE ===";
pub const CHANGED_HEADER: &str = "Changed Memory Values:";

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Debug(#[from] DebugError),
}

/// Load, run and (unless aborted) save
pub fn run_program<O>(
    program: &Program,
    store: &MemoryStore,
    observer: &mut O,
    max_steps: Option<u64>,
) -> Result<RunOutcome, RunError>
where
    O: Observer + ?Sized,
{
    let mut state = MachineState::with_memory(store.load()?);
    let outcome = Interpreter::new(program)
        .with_step_limit(max_steps)
        .run(&mut state, observer)?;

    if outcome.halt == Halt::Aborted {
        tracing::info!(path = %store.path().display(), "run aborted, memory not saved");
    } else {
        store.save(&state.memory)?;
    }
    Ok(outcome)
}

/// Lines printed after a finished run
pub fn report(outcome: &RunOutcome) -> Vec<String> {
    let mut lines = vec![COMPLETE_BANNER.to_string()];
    if outcome.halt == Halt::StepLimit {
        lines.push(format!("Stopped after {} steps (step limit).", outcome.steps));
    }
    if !outcome.diagnostics.is_empty() {
        lines.push(format!("{} error(s) reported.", outcome.diagnostics.len()));
    }
    if outcome.changes.is_empty() {
        lines.push(NO_CHANGES.to_string());
    } else {
        lines.push(CHANGED_HEADER.to_string());
        lines.extend(outcome.changes.report_lines());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debugger::NoDebugger;

    fn run_in_tempdir(source: &str, max_steps: Option<u64>) -> RunOutcome {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new(dir.path().join("memory.json"));
        run_program(&Program::parse(source), &store, &mut NoDebugger, max_steps).unwrap()
    }

    #[test]
    fn test_report_without_changes_has_no_header() {
        let outcome = run_in_tempdir("Set R1 = 1", None);
        assert_eq!(report(&outcome), vec![COMPLETE_BANNER, NO_CHANGES]);
    }

    #[test]
    fn test_report_lists_changes_under_header() {
        let outcome = run_in_tempdir("Set R1 = 3\nStore R1 [20]\nStore R1 [4]", None);
        assert_eq!(
            report(&outcome),
            vec![COMPLETE_BANNER, CHANGED_HEADER, "[4] = 3", "[20] = 3"]
        );
    }

    #[test]
    fn test_report_mentions_step_limit_and_errors() {
        let outcome = run_in_tempdir("Bogus\nJump #1", Some(10));
        let lines = report(&outcome);
        assert_eq!(lines[1], "Stopped after 10 steps (step limit).");
        // the bad line runs on every other step
        assert_eq!(lines[2], "5 error(s) reported.");
    }
}

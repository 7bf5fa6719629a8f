// End-to-end runs: control flow, error isolation and persistence

use regvm::debugger::NoDebugger;
use regvm::interpreter::changes::NO_CHANGES;
use regvm::interpreter::engine::{Halt, Interpreter, RunOutcome};
use regvm::interpreter::errors::InstructionError;
use regvm::memory::MachineState;
use regvm::parser::ast::Program;
use regvm::persist::MemoryStore;
use regvm::run_program;

fn run_with(state: &mut MachineState, source: &str, limit: u64) -> RunOutcome {
    let program = Program::parse(source);
    Interpreter::new(&program)
        .with_step_limit(Some(limit))
        .run(state, &mut NoDebugger)
        .expect("run failed")
}

#[test]
fn test_conditional_jump_skips_line() {
    let mut state = MachineState::new();
    let outcome = run_with(
        &mut state,
        "Set R1 = 1\nJP R1 #4\nSet R2 = 99\nSet R3 = 7",
        100,
    );
    assert_eq!(outcome.halt, Halt::Completed);
    assert_eq!(state.registers.get("R2"), 0);
    assert_eq!(state.registers.get("R3"), 7);
}

#[test]
fn test_jump_to_first_line_needs_a_bound() {
    let mut state = MachineState::new();
    let outcome = run_with(&mut state, "Jump #1", 500);
    assert_eq!(outcome.halt, Halt::StepLimit);
    assert_eq!(outcome.steps, 500);
}

#[test]
fn test_unseeded_load_does_not_stop_the_run() {
    let mut state = MachineState::new();
    let outcome = run_with(&mut state, "Set R1 = 9\nLoad R1 [2048]\nStore R1 [1]", 100);
    assert_eq!(outcome.halt, Halt::Completed);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].error,
        InstructionError::UnseededAddress { address: 2048 }
    );
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "Error at line 2: Load R1 [2048] -> address 2048 has never been written"
    );
    // register untouched, later lines still ran
    assert_eq!(state.memory.read(1), Some(9));
}

#[test]
fn test_unknown_opcode_is_reported_with_line() {
    let mut state = MachineState::new();
    let outcome = run_with(&mut state, "Set R1 = 1\nMul R1 R1 R2\nNeg R1", 100);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "Unknown instruction at line 2: Mul R1 R1 R2"
    );
    assert_eq!(state.registers.get("R1"), -1);
}

#[test]
fn test_unreached_bad_line_is_never_reported() {
    let mut state = MachineState::new();
    let outcome = run_with(&mut state, "Jump #3\nGarbage here\nSet R1 = 1", 100);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(state.registers.get("R1"), 1);
}

#[test]
fn test_report_without_stores() {
    let mut state = MachineState::new();
    let outcome = run_with(&mut state, "Set R1 = 1", 100);
    assert_eq!(outcome.changes.report_lines(), vec![NO_CHANGES.to_string()]);
}

#[test]
fn test_memory_survives_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new(dir.path().join("memory.json"));

    let mut first = MachineState::with_memory(store.load().unwrap());
    run_with(&mut first, "Set R1 = 11\nStore R1 [3]\nStore R1 [1500]", 100);
    store.save(&first.memory).unwrap();

    // registers start empty, memory comes back from disk
    let mut second = MachineState::with_memory(store.load().unwrap());
    assert!(second.registers.is_empty());
    let outcome = run_with(&mut second, "Load R1 [3]\nLoad R2 [1500]\nAdd R1 R2 R3\nStore R3 [4]", 100);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(second.memory.read(4), Some(22));
    assert_eq!(outcome.changes.report_lines(), vec!["[4] = 22".to_string()]);
}

#[test]
fn test_save_then_load_is_identity() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new(dir.path().join("memory.json"));

    let mut state = MachineState::new();
    state.memory.write(0, -5);
    state.memory.write(1023, 7);
    state.memory.write(4096, 1);
    store.save(&state.memory).unwrap();

    assert_eq!(store.load().unwrap(), state.memory);
    let cells = store.read_cells().unwrap().unwrap();
    assert_eq!(cells.len(), 1025);
    assert_eq!(cells.get(&4096), Some(&1));
}

#[test]
fn test_step_limited_run_is_still_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory.json");
    let store = MemoryStore::new(&path);
    let program = Program::parse("Set R1 = 3\nStore R1 [8]\nJump #1");

    let outcome = run_program(&program, &store, &mut NoDebugger, Some(20)).unwrap();
    assert_eq!(outcome.halt, Halt::StepLimit);
    assert!(path.exists());
    assert_eq!(store.load().unwrap().read(8), Some(3));
}

#[test]
fn test_run_continues_from_stored_memory() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new(dir.path().join("memory.json"));
    let program = Program::parse("Load R1 [0]\nSet R2 = 1\nAdd R1 R2 R1\nStore R1 [0]");

    run_program(&program, &store, &mut NoDebugger, None).unwrap();
    let outcome = run_program(&program, &store, &mut NoDebugger, None).unwrap();
    assert_eq!(outcome.changes.get(0), Some(2));
    assert_eq!(store.load().unwrap().read(0), Some(2));
}

#[test]
fn test_set_separator_token_is_ignored() {
    let mut state = MachineState::new();
    let outcome = run_with(&mut state, "Set R1 := 5\nSet R2 to 7", 100);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(state.registers.get("R1"), 5);
    assert_eq!(state.registers.get("R2"), 7);
}

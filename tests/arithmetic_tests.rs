// Register arithmetic through the public API

use regvm::debugger::NoDebugger;
use regvm::interpreter::engine::{Halt, Interpreter, RunOutcome};
use regvm::memory::MachineState;
use regvm::parser::ast::Program;

fn run(source: &str) -> (MachineState, RunOutcome) {
    let program = Program::parse(source);
    let mut state = MachineState::new();
    let outcome = Interpreter::new(&program)
        .with_step_limit(Some(1_000))
        .run(&mut state, &mut NoDebugger)
        .expect("run failed");
    (state, outcome)
}

#[test]
fn test_unassigned_registers_read_zero() {
    let (state, outcome) = run("Add R7 R8 R9\nStore R9 [12]");
    assert_eq!(outcome.halt, Halt::Completed);
    assert_eq!(state.registers.get("R9"), 0);
    assert_eq!(state.registers.get("R100"), 0);
    assert_eq!(outcome.changes.get(12), Some(0));
}

#[test]
fn test_set_then_add_doubles() {
    let (state, _) = run("Set R1 = 5\nAdd R1 R1 R2");
    assert_eq!(state.registers.get("R2"), 10);
    assert_eq!(state.registers.get("R1"), 5);
}

#[test]
fn test_neg_and_double_neg() {
    let (state, _) = run("Set R1 = 3\nNeg R1");
    assert_eq!(state.registers.get("R1"), -3);

    let (state, _) = run("Set R1 = 3\nNeg R1\nNeg R1");
    assert_eq!(state.registers.get("R1"), 3);
}

#[test]
fn test_commas_and_negative_literals() {
    let (state, outcome) = run("Set R1 = -4\nSet R2 = 6\nAdd R1, R2, R3");
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(state.registers.get("R3"), 2);
}

#[test]
fn test_store_unset_register_records_zero() {
    let (state, outcome) = run("Store R1 [50]");
    assert_eq!(state.memory.read(50), Some(0));
    assert!(outcome.changes.contains(50));
    assert_eq!(outcome.changes.report_lines(), vec!["[50] = 0".to_string()]);
}

#[test]
fn test_load_store_round_trip_through_memory() {
    let (state, outcome) = run("Set R1 = 42\nStore R1 [7]\nLoad R2 [0007]");
    assert_eq!(state.registers.get("R2"), 42);
    assert_eq!(outcome.changes.len(), 1);
}

#[test]
fn test_add_overflow_is_reported_and_skipped() {
    let source = format!("Set R1 = {}\nSet R2 = 1\nAdd R1 R2 R3\nSet R4 = 4", i64::MAX);
    let (state, outcome) = run(&source);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].line, 3);
    assert!(!state.registers.is_set("R3"));
    assert_eq!(state.registers.get("R4"), 4);
}

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::memory::MachineState;

impl Interpreter<'_> {
    /// `Jump #<line>`: always taken
    pub(crate) fn execute_jump(&self, target: i64) -> ControlFlow {
        ControlFlow::JumpTo(target)
    }

    /// `JP <reg> #<line>`: taken only when the register is strictly positive
    pub(crate) fn execute_jump_positive(
        &self,
        reg: &str,
        target: i64,
        state: &MachineState,
    ) -> ControlFlow {
        if state.registers.get(reg) > 0 {
            ControlFlow::JumpTo(target)
        } else {
            ControlFlow::Advance
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::debugger::NoDebugger;
    use crate::interpreter::engine::{Halt, Interpreter};
    use crate::memory::MachineState;
    use crate::parser::ast::Program;

    #[test]
    fn test_conditional_jump_taken() {
        let program = Program::parse("Set R1 = 1\nJP R1 #4\nSet R2 = 99\nSet R3 = 7");
        let mut state = MachineState::new();
        Interpreter::new(&program)
            .run(&mut state, &mut NoDebugger)
            .unwrap();
        assert!(!state.registers.is_set("R2"));
        assert_eq!(state.registers.get("R3"), 7);
    }

    #[test]
    fn test_conditional_jump_not_taken_on_zero_or_negative() {
        for value in ["0", "-3"] {
            let source = format!("Set R1 = {}\nJP R1 #4\nSet R2 = 99\nSet R3 = 7", value);
            let program = Program::parse(&source);
            let mut state = MachineState::new();
            Interpreter::new(&program)
                .run(&mut state, &mut NoDebugger)
                .unwrap();
            assert_eq!(state.registers.get("R2"), 99);
            assert_eq!(state.registers.get("R3"), 7);
        }
    }

    #[test]
    fn test_countdown_loop() {
        // R1 counts down from 3, R2 accumulates one per pass
        let source = "\
Set R1 = 3
Set R9 = -1
Set R8 = 1
Add R2 R8 R2
Add R1 R9 R1
JP R1 #4
Store R2 [0]";
        let program = Program::parse(source);
        let mut state = MachineState::new();
        let outcome = Interpreter::new(&program)
            .with_step_limit(Some(1_000))
            .run(&mut state, &mut NoDebugger)
            .unwrap();
        assert_eq!(outcome.halt, Halt::Completed);
        assert_eq!(state.memory.read(0), Some(3));
        assert_eq!(outcome.changes.get(0), Some(3));
    }

    #[test]
    fn test_negative_target_halts() {
        let program = Program::parse("Set R1 = 1\nJP R1 #-5\nSet R2 = 2");
        let mut state = MachineState::new();
        let mut interpreter = Interpreter::new(&program);
        interpreter.step(&mut state, &mut NoDebugger).unwrap();
        interpreter.step(&mut state, &mut NoDebugger).unwrap();
        assert_eq!(interpreter.pc(), -6);
        let outcome = interpreter.run(&mut state, &mut NoDebugger).unwrap();
        assert_eq!(outcome.halt, Halt::Completed);
        assert!(!state.registers.is_set("R2"));
    }
}

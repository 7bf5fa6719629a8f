// Execution engine for the assembly interpreter

use crate::debugger::{DebugError, Directive, Observer, StepContext};
use crate::interpreter::changes::ChangeSet;
use crate::interpreter::errors::{Diagnostic, InstructionError};
use crate::memory::MachineState;
use crate::parser::ast::{Address, Decoded, Program, SourceLine, Word};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The program counter left the program
    Completed,
    /// The debugger asked to quit
    Aborted,
    /// The configured step budget ran out
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(Halt),
}

/// What a single call to [`Interpreter::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction line was fetched and handled (successfully or not)
    Executed,
    /// A blank line was passed over
    Skipped,
    Halted(Halt),
}

/// How the program counter moves after an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlFlow {
    Advance,
    /// 1-indexed target line; pc becomes `line - 1` with no extra advance
    JumpTo(i64),
}

/// Result of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub halt: Halt,
    pub changes: ChangeSet,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of lines fetched, blank ones included
    pub steps: u64,
}

/// Fetch-decode-execute loop over a decoded program.
///
/// The interpreter owns only control-flow bookkeeping; registers and memory
/// live in a [`MachineState`] handed in by the caller.
pub struct Interpreter<'p> {
    program: &'p Program,

    /// Zero-based index of the next line. Jumps may set any value; anything
    /// outside `0..program.len()` halts on the next fetch.
    pc: i64,

    status: Status,

    /// Addresses written by `Store` in this run
    changes: ChangeSet,

    diagnostics: Vec<Diagnostic>,

    steps: u64,
    max_steps: Option<u64>,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p Program) -> Self {
        Interpreter {
            program,
            pc: 0,
            status: Status::Running,
            changes: ChangeSet::new(),
            diagnostics: Vec::new(),
            steps: 0,
            max_steps: None,
        }
    }

    /// Stop with [`Halt::StepLimit`] after `limit` fetched lines
    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.max_steps = limit;
        self
    }

    pub fn pc(&self) -> i64 {
        self.pc
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run until the program counter leaves the program, the observer quits,
    /// or the step limit is reached.
    pub fn run<O>(
        mut self,
        state: &mut MachineState,
        observer: &mut O,
    ) -> Result<RunOutcome, DebugError>
    where
        O: Observer + ?Sized,
    {
        tracing::debug!(lines = self.program.len(), "starting run");

        let halt = loop {
            if let Step::Halted(halt) = self.step(state, observer)? {
                break halt;
            }
        };

        tracing::info!(
            ?halt,
            steps = self.steps,
            changed = self.changes.len(),
            errors = self.diagnostics.len(),
            "run finished"
        );

        Ok(RunOutcome {
            halt,
            changes: self.changes,
            diagnostics: self.diagnostics,
            steps: self.steps,
        })
    }

    /// Fetch and handle exactly one line
    pub fn step<O>(
        &mut self,
        state: &mut MachineState,
        observer: &mut O,
    ) -> Result<Step, DebugError>
    where
        O: Observer + ?Sized,
    {
        if let Status::Halted(halt) = self.status {
            return Ok(Step::Halted(halt));
        }

        let program = self.program;
        let Some((index, line)) = self.fetch(program) else {
            return Ok(self.halt(Halt::Completed));
        };

        if self.max_steps.is_some_and(|limit| self.steps >= limit) {
            tracing::warn!(steps = self.steps, "step limit reached");
            return Ok(self.halt(Halt::StepLimit));
        }

        // Observation happens before decode, so blank lines are shown too
        let ctx = StepContext {
            pc: index,
            program,
            state,
            diagnostics: &self.diagnostics,
        };
        if observer.observe(&ctx)? == Directive::Quit {
            tracing::info!(line = line.number, "run aborted from debugger");
            return Ok(self.halt(Halt::Aborted));
        }

        self.steps += 1;

        let (flow, step) = match &line.decoded {
            Decoded::Blank => (ControlFlow::Advance, Step::Skipped),
            Decoded::Invalid(err) => {
                self.report(line, err.clone().into());
                (ControlFlow::Advance, Step::Executed)
            }
            Decoded::Instruction(instruction) => {
                tracing::trace!(line = line.number, opcode = %instruction.opcode(), "execute");
                let flow = match self.apply(instruction, state) {
                    Ok(flow) => flow,
                    Err(err) => {
                        self.report(line, err);
                        ControlFlow::Advance
                    }
                };
                (flow, Step::Executed)
            }
        };

        match flow {
            ControlFlow::Advance => self.pc += 1,
            ControlFlow::JumpTo(target) => self.pc = target.saturating_sub(1),
        }

        Ok(step)
    }

    fn fetch(&self, program: &'p Program) -> Option<(usize, &'p SourceLine)> {
        let index = usize::try_from(self.pc).ok()?;
        program.get(index).map(|line| (index, line))
    }

    fn halt(&mut self, halt: Halt) -> Step {
        self.status = Status::Halted(halt);
        Step::Halted(halt)
    }

    /// Record an instruction error and keep going
    fn report(&mut self, line: &SourceLine, error: InstructionError) {
        let diagnostic = Diagnostic {
            line: line.number,
            text: line.text.trim().to_string(),
            error,
        };
        tracing::error!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn record_store(&mut self, addr: Address, value: Word) {
        self.changes.record(addr, value);
    }
}

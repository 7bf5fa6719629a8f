//! Data-moving and arithmetic opcodes
//!
//! [`Interpreter::apply`] is the single dispatch point: every [`Instruction`]
//! variant is matched exhaustively here. Control-flow opcodes are delegated to
//! the helpers in `jumps`.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::InstructionError;
use crate::memory::MachineState;
use crate::parser::ast::{Address, Instruction, Opcode};

impl Interpreter<'_> {
    /// Apply one decoded instruction to the machine state
    pub(crate) fn apply(
        &mut self,
        instruction: &Instruction,
        state: &mut MachineState,
    ) -> Result<ControlFlow, InstructionError> {
        match instruction {
            Instruction::Load { reg, addr } => {
                self.execute_load(reg, *addr, state)?;
                Ok(ControlFlow::Advance)
            }
            Instruction::Store { reg, addr } => {
                self.execute_store(reg, *addr, state);
                Ok(ControlFlow::Advance)
            }
            Instruction::Set { reg, value } => {
                state.registers.set(reg, *value);
                Ok(ControlFlow::Advance)
            }
            Instruction::Add { lhs, rhs, dest } => {
                let sum = state
                    .registers
                    .get(lhs)
                    .checked_add(state.registers.get(rhs))
                    .ok_or(InstructionError::Overflow {
                        opcode: Opcode::Add,
                    })?;
                state.registers.set(dest, sum);
                Ok(ControlFlow::Advance)
            }
            Instruction::Neg { reg } => {
                let negated = state
                    .registers
                    .get(reg)
                    .checked_neg()
                    .ok_or(InstructionError::Overflow {
                        opcode: Opcode::Neg,
                    })?;
                state.registers.set(reg, negated);
                Ok(ControlFlow::Advance)
            }
            Instruction::Jump { target } => Ok(self.execute_jump(*target)),
            Instruction::JumpPositive { reg, target } => {
                Ok(self.execute_jump_positive(reg, *target, state))
            }
        }
    }

    fn execute_load(
        &mut self,
        reg: &str,
        addr: Address,
        state: &mut MachineState,
    ) -> Result<(), InstructionError> {
        let value = state
            .memory
            .read(addr)
            .ok_or(InstructionError::UnseededAddress { address: addr })?;
        state.registers.set(reg, value);
        Ok(())
    }

    fn execute_store(&mut self, reg: &str, addr: Address, state: &mut MachineState) {
        let value = state.registers.get(reg);
        state.memory.write(addr, value);
        self.record_store(addr, value);
    }
}

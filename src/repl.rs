//! Live set mode: assign registers and memory cells from a prompt
//!
//! Each line has the form `<name> = <int>`. Names starting with `R` (either
//! case) write the upper-cased register; anything else must be a memory address.
//! `exit` (any case) or end of input leaves the loop. Bad input is reported and
//! the prompt continues.

use crate::config::REGISTER_PREFIX;
use crate::memory::MachineState;
use crate::parser::ast::{Address, Word};
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const PROMPT: &str = "set> ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input '{input}'. Use format: R1 = 5 or 42 = 99")]
pub struct SetError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetCommand {
    Exit,
    /// Empty line
    Nothing,
    Register { name: String, value: Word },
    Memory { address: Address, value: Word },
}

pub fn parse_command(line: &str) -> Result<SetCommand, SetError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(SetCommand::Nothing);
    }
    if line.eq_ignore_ascii_case("exit") {
        return Ok(SetCommand::Exit);
    }

    let invalid = || SetError {
        input: line.to_string(),
    };

    let (left, right) = line.split_once('=').ok_or_else(invalid)?;
    let (left, right) = (left.trim(), right.trim());
    let value: Word = right.parse().map_err(|_| invalid())?;

    let is_register = left
        .chars()
        .next()
        .is_some_and(|c| c.to_ascii_uppercase() == REGISTER_PREFIX);
    if is_register {
        if left.contains(char::is_whitespace) {
            return Err(invalid());
        }
        return Ok(SetCommand::Register {
            name: left.to_ascii_uppercase(),
            value,
        });
    }

    let address: Address = left.parse().map_err(|_| invalid())?;
    Ok(SetCommand::Memory { address, value })
}

/// Apply a command; returns the confirmation to show
pub fn apply(state: &mut MachineState, command: &SetCommand) -> Option<String> {
    match command {
        SetCommand::Register { name, value } => {
            state.registers.set(name, *value);
            Some(format!("{} set to {}", name, value))
        }
        SetCommand::Memory { address, value } => {
            state.memory.write(*address, *value);
            Some(format!("memory[{}] = {}", address, value))
        }
        SetCommand::Exit | SetCommand::Nothing => None,
    }
}

/// Prompt loop over arbitrary input and output
pub fn run_set_mode<R: BufRead, W: Write>(
    state: &mut MachineState,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "Live SET mode. Type `exit` to quit.")?;
    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match parse_command(&line) {
            Ok(SetCommand::Exit) => break,
            Ok(command) => {
                if let Some(message) = apply(state, &command) {
                    writeln!(out, "{}", message)?;
                }
            }
            Err(err) => {
                tracing::warn!("{}", err);
                writeln!(out, "{}", err)?;
            }
        }
    }
    Ok(())
}

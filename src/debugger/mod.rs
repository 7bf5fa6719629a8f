//! Single-step debugger
//!
//! The engine calls an [`Observer`] before every fetched line. The observer sees
//! a read-only [`StepContext`] and answers with a [`Directive`]: continue with
//! this line, or quit the run.
//!
//! [`Debugger`] is the interactive observer. It owns a [`DebugSession`] (the
//! view state machine) and two injectable pieces:
//!
//! - a [`KeySource`] that blocks until the operator presses a key
//! - a [`ViewRenderer`] that draws the current view
//!
//! The terminal front-end plugs crossterm key events and a ratatui renderer in
//! here (see `ui::app`); tests use [`ScriptedKeys`] and [`text::TextRenderer`].
//!
//! # Views
//!
//! ```text
//!            Toggle
//!   Step  <-------->  State
//!    |                  |
//!   Next -> Continue   Next -> Continue
//!   Quit -> Quit       Quit -> Quit
//! ```

pub mod text;

use crate::interpreter::errors::Diagnostic;
use crate::memory::MachineState;
use crate::parser::ast::{Program, SourceLine};
use std::collections::VecDeque;
use std::io;
use thiserror::Error;

/// Failure inside the debugger; aborts the run
#[derive(Debug, Error)]
pub enum DebugError {
    #[error("debugger I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Everything an observer may look at before a line executes
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Zero-based index of the line about to execute
    pub pc: usize,
    pub program: &'a Program,
    pub state: &'a MachineState,
    /// Errors reported so far in this run
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> StepContext<'a> {
    pub fn current_line(&self) -> Option<&'a SourceLine> {
        self.program.get(self.pc)
    }

    pub fn last_diagnostic(&self) -> Option<&'a Diagnostic> {
        self.diagnostics.last()
    }
}

/// Observer verdict for the pending line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Continue,
    Quit,
}

/// Read-only instrumentation invoked before each line
pub trait Observer {
    fn observe(&mut self, ctx: &StepContext<'_>) -> Result<Directive, DebugError>;
}

/// Observer used when debugging is off
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDebugger;

impl Observer for NoDebugger {
    fn observe(&mut self, _ctx: &StepContext<'_>) -> Result<Directive, DebugError> {
        Ok(Directive::Continue)
    }
}

/// Debugger render mode, kept for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Source listing with the current line highlighted
    #[default]
    Step,
    /// Current instruction plus registers and non-zero memory
    State,
}

impl View {
    pub fn toggle(self) -> Self {
        match self {
            View::Step => View::State,
            View::State => View::Step,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Step => "STEP VIEW",
            View::State => "STATE VIEW",
        }
    }
}

/// Operator input, already decoded from raw key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugKey {
    Next,
    Toggle,
    Quit,
    Other,
}

/// View state machine for one debugging session
#[derive(Debug, Clone, Default)]
pub struct DebugSession {
    view: View,
}

impl DebugSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Feed one key. `None` means stay on this line and redraw.
    pub fn handle(&mut self, key: DebugKey) -> Option<Directive> {
        match key {
            DebugKey::Next => Some(Directive::Continue),
            DebugKey::Quit => Some(Directive::Quit),
            DebugKey::Toggle => {
                self.view = self.view.toggle();
                None
            }
            DebugKey::Other => None,
        }
    }
}

/// Blocking source of operator keys
pub trait KeySource {
    fn read_key(&mut self) -> io::Result<DebugKey>;
}

/// Draws the debugger for the pending line
pub trait ViewRenderer {
    fn render(&mut self, view: View, ctx: &StepContext<'_>) -> io::Result<()>;
}

/// Interactive observer: render, wait for a key, repeat until the session
/// yields a directive.
pub struct Debugger<K, R> {
    session: DebugSession,
    keys: K,
    renderer: R,
}

impl<K: KeySource, R: ViewRenderer> Debugger<K, R> {
    pub fn new(keys: K, renderer: R) -> Self {
        Debugger {
            session: DebugSession::new(),
            keys,
            renderer,
        }
    }

    pub fn view(&self) -> View {
        self.session.view()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (K, R) {
        (self.keys, self.renderer)
    }
}

impl<K: KeySource, R: ViewRenderer> Observer for Debugger<K, R> {
    fn observe(&mut self, ctx: &StepContext<'_>) -> Result<Directive, DebugError> {
        loop {
            self.renderer.render(self.session.view(), ctx)?;
            let key = self.keys.read_key()?;
            if let Some(directive) = self.session.handle(key) {
                return Ok(directive);
            }
        }
    }
}

/// Pre-recorded key sequence for headless runs.
///
/// Running out of keys is an `UnexpectedEof` error so a short script cannot
/// hang a test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<DebugKey>,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = DebugKey>>(keys: I) -> Self {
        ScriptedKeys {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<DebugKey> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted")
        })
    }
}

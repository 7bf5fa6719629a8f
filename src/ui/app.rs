//! Terminal debugger: crossterm key input plus a ratatui renderer

use crate::debugger::text::TextRenderer;
use crate::debugger::{DebugKey, Debugger, KeySource, StepContext, View, ViewRenderer};
use crate::ui::panes::{render_source_pane, render_state_pane, render_status_bar, SourceScrollState};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io::{self, Stdout};

/// Full-screen debugger used by the binary
pub type TerminalDebugger = Debugger<CrosstermKeys, TuiRenderer<CrosstermBackend<Stdout>>>;

/// Plain-text debugger on a raw-mode terminal
pub type PlainDebugger = Debugger<CrosstermKeys, TextRenderer<Stdout>>;

/// Puts the terminal into raw mode (and optionally the alternate screen) and
/// restores it on drop, including on early returns and panics.
pub struct TerminalGuard {
    alternate_screen: bool,
}

impl TerminalGuard {
    /// Raw mode plus alternate screen, for the ratatui front-end
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(TerminalGuard {
            alternate_screen: true,
        })
    }

    /// Raw mode only, for plain-text debugging
    pub fn raw() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(TerminalGuard {
            alternate_screen: false,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.alternate_screen {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        }
    }
}

/// Blocking key reader over crossterm events
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> io::Result<DebugKey> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(map_key(key));
                }
            }
        }
    }
}

/// Translate a raw key event into a debugger key
pub fn map_key(key: KeyEvent) -> DebugKey {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => DebugKey::Quit,
        KeyCode::Char(' ') | KeyCode::Right | KeyCode::Down | KeyCode::Enter => DebugKey::Next,
        KeyCode::Esc | KeyCode::Tab => DebugKey::Toggle,
        KeyCode::Char('q') | KeyCode::Char('Q') => DebugKey::Quit,
        _ => DebugKey::Other,
    }
}

/// ratatui renderer for both debugger views
pub struct TuiRenderer<B: Backend> {
    terminal: Terminal<B>,
    source_scroll: SourceScrollState,
}

impl<B: Backend> TuiRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        TuiRenderer {
            terminal,
            source_scroll: SourceScrollState::default(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> ViewRenderer for TuiRenderer<B> {
    fn render(&mut self, view: View, ctx: &StepContext<'_>) -> io::Result<()> {
        // Diagnostics are logged to stderr between frames; start from a clean screen
        self.terminal.clear()?;
        let scroll = &mut self.source_scroll;
        self.terminal
            .draw(|frame| render_debug_frame(frame, view, ctx, scroll))?;
        Ok(())
    }
}

/// Lay out one debugger frame: the active view above a one-line status bar
pub fn render_debug_frame(
    frame: &mut Frame,
    view: View,
    ctx: &StepContext<'_>,
    source_scroll: &mut SourceScrollState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    match view {
        View::Step => render_source_pane(frame, chunks[0], ctx.program, ctx.pc, source_scroll),
        View::State => render_state_pane(frame, chunks[0], ctx),
    }

    render_status_bar(frame, chunks[1], view, ctx);
}

/// Build the full-screen debugger. Call after [`TerminalGuard::enter`].
pub fn terminal_debugger() -> io::Result<TerminalDebugger> {
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    Ok(Debugger::new(CrosstermKeys, TuiRenderer::new(terminal)))
}

/// Build the plain-text debugger. Call after [`TerminalGuard::raw`].
pub fn plain_debugger() -> PlainDebugger {
    let width = crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80);
    Debugger::new(
        CrosstermKeys,
        TextRenderer::new(io::stdout(), width).with_clear(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MachineState;
    use crate::parser::ast::Program;
    use ratatui::backend::TestBackend;

    fn screen_text(renderer: &TuiRenderer<TestBackend>) -> String {
        renderer
            .terminal()
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_key_mapping() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(map_key(key(KeyCode::Char(' '))), DebugKey::Next);
        assert_eq!(map_key(key(KeyCode::Right)), DebugKey::Next);
        assert_eq!(map_key(key(KeyCode::Esc)), DebugKey::Toggle);
        assert_eq!(map_key(key(KeyCode::Char('q'))), DebugKey::Quit);
        assert_eq!(map_key(key(KeyCode::Char('x'))), DebugKey::Other);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            DebugKey::Quit
        );
    }

    #[test]
    fn test_step_view_frame() {
        let program = Program::parse("Set R1 = 5\nStore R1 [3]");
        let state = MachineState::new();
        let ctx = StepContext {
            pc: 1,
            program: &program,
            state: &state,
            diagnostics: &[],
        };
        let mut renderer = TuiRenderer::new(Terminal::new(TestBackend::new(80, 12)).unwrap());
        renderer.render(View::Step, &ctx).unwrap();

        let text = screen_text(&renderer);
        assert!(text.contains("001 Set R1 = 5"));
        assert!(text.contains("002 Store R1 [3]"));
        assert!(text.contains("STEP VIEW"));
        assert!(text.contains("Line 2/2"));
    }

    #[test]
    fn test_state_view_frame() {
        let program = Program::parse("Store R1 [3]");
        let mut state = MachineState::new();
        state.registers.set("R1", 5);
        state.memory.write(3, 5);
        let ctx = StepContext {
            pc: 0,
            program: &program,
            state: &state,
            diagnostics: &[],
        };
        let mut renderer = TuiRenderer::new(Terminal::new(TestBackend::new(80, 12)).unwrap());
        renderer.render(View::State, &ctx).unwrap();

        let text = screen_text(&renderer);
        assert!(text.contains("Instruction [001]: Store R1 [3]"));
        assert!(text.contains("R1 = 5"));
        assert!(text.contains("[3] = 5"));
    }
}
